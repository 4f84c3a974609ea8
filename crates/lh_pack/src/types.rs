//! Base types for the fixed layouts found inside pack and sound bank files.

use binrw::binrw;

use crate::error::{Error, Result};

/// Size of the fixed-width, NUL-padded block name field
pub const BLOCK_NAME_SIZE: usize = 32;

/// Size of a block header: name field and body size
pub const BLOCK_HEADER_SIZE: usize = BLOCK_NAME_SIZE + 4;

/// Value the `size` field of every [`DdsHeader`] must hold
pub const DDS_HEADER_SIZE: u32 = 124;

/// Value the `size` field of every [`DdsPixelFormat`] must hold
pub const DDS_PIXEL_FORMAT_SIZE: u32 = 32;

/// Size of a [`TextureHeader`]
pub const TEXTURE_HEADER_SIZE: u32 = 16;

/// Size of the per-animation header stored inside the `Body` block
pub const ANIMATION_HEADER_SIZE: usize = 0x54;

/// Size of an [`AudioBankSample`] record
pub const AUDIO_SAMPLE_SIZE: usize = 640;

/// Size of the [`AudioBankSampleTableHeader`] preceding the sample records
pub const AUDIO_SAMPLE_TABLE_HEADER_SIZE: usize = 4;

/// Decode a NUL-terminated, fixed-width string field.
pub(crate) fn fixed_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|c| *c == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Encode a string into a NUL-terminated, fixed-width field, truncating if needed.
pub(crate) fn to_fixed_string<const N: usize>(value: &str) -> [u8; N] {
    let mut raw = [0u8; N];
    let len = value.len().min(N.saturating_sub(1));
    raw[..len].copy_from_slice(&value.as_bytes()[..len]);
    raw
}

/// Block header
///
/// Precedes the body of every block in the file. The name is padded with NUL bytes.
#[binrw]
#[brw(little)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BlockHeader {
    /// NUL-padded name of the block
    pub name: [u8; BLOCK_NAME_SIZE],

    /// Number of bytes in the block body
    pub size: u32,
}

impl BlockHeader {
    /// Create a header for a block, failing if the name does not leave room for a terminator
    pub fn new(name: &str, size: u32) -> Result<Self> {
        if name.len() >= BLOCK_NAME_SIZE || name.as_bytes().contains(&0) {
            return Err(Error::BlockNameTooLong(name.to_owned()));
        }

        Ok(Self {
            name: to_fixed_string(name),
            size,
        })
    }

    /// Name of the block up to the first NUL byte
    pub fn name(&self) -> String {
        fixed_string(&self.name)
    }
}

/// INFO block entry
///
/// References a texture block by the hexadecimal form of `block_id`.
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct InfoLookup {
    /// Id of the texture, also the name of its block
    pub block_id: u32,

    /// Purpose unknown; preserved as read
    pub auxiliary: u32,
}

/// INFO block body
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InfoTable {
    #[bw(try_calc = entries.len().try_into())]
    count: u32,

    /// Texture lookup entries in index order
    #[br(count = count)]
    pub entries: Vec<InfoLookup>,
}

/// Body block entry
///
/// Locates the header of an animation within the `Body` block.
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BodyLookup {
    /// Offset from the start of the `Body` block to the animation header
    pub offset: u32,

    /// Purpose unknown; preserved as read
    pub auxiliary: u32,
}

/// Leading table of the Body block
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BodyTable {
    /// Block tag, expected to be [`crate::names::BLOCK_TAG`]
    pub tag: [u8; 4],

    #[bw(try_calc = entries.len().try_into())]
    count: u32,

    /// Animation lookup entries in index order
    #[br(count = count)]
    pub entries: Vec<BodyLookup>,
}

/// Leading table of the MESHES block
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshTable {
    /// Block tag, expected to be [`crate::names::BLOCK_TAG`]
    pub tag: [u8; 4],

    #[bw(try_calc = offsets.len().try_into())]
    count: u32,

    /// Offsets from the start of the block to each mesh
    #[br(count = count)]
    pub offsets: Vec<u32>,
}

/// Texture block header
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TextureHeader {
    /// Size of the DDS data following this header
    pub size: u32,

    /// Id of the texture, must match the INFO lookup entry
    pub id: u32,

    /// Purpose unknown; preserved as read
    pub kind: u32,

    /// Size of the equivalent DDS file without its magic number
    pub dds_size: u32,
}

/// DDS pixel format
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DdsPixelFormat {
    /// Structure size, always [`DDS_PIXEL_FORMAT_SIZE`]
    pub size: u32,

    /// Which of the following fields are valid; `0x4` marks a four-character code
    pub flags: u32,

    /// Compression format such as `"DXT1"`, padded with NUL bytes or spaces
    pub four_cc: [u8; 4],

    /// Bits per pixel of uncompressed formats
    pub bit_count: u32,

    /// Red channel mask of uncompressed formats
    pub r_bit_mask: u32,

    /// Green channel mask of uncompressed formats
    pub g_bit_mask: u32,

    /// Blue channel mask of uncompressed formats
    pub b_bit_mask: u32,

    /// Alpha channel mask of uncompressed formats
    pub a_bit_mask: u32,
}

/// DDS capabilities
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DdsCapabilities {
    /// Surface and cube map capability flags
    pub caps: [u32; 2],

    /// Extended capability flags
    pub ddsx: u32,

    /// Unused
    pub reserved: u32,
}

/// DDS header without the leading `"DDS "` magic
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DdsHeader {
    /// Structure size, always [`DDS_HEADER_SIZE`]
    pub size: u32,

    /// Which of the following fields are valid
    pub flags: u32,

    /// Height of the top level surface in pixels
    pub height: u32,

    /// Width of the top level surface in pixels
    pub width: u32,

    /// Number of bytes of the top level surface
    pub pitch_or_linear_size: u32,

    /// Depth of volume textures
    pub depth: u32,

    /// Number of mip levels, not stored in pack texture blocks
    pub mip_map_count: u32,

    /// Unused
    pub reserved1: [u32; 11],

    /// Pixel format of the surface
    pub format: DdsPixelFormat,

    /// Surface capabilities
    pub capabilities: DdsCapabilities,

    /// Unused
    pub reserved2: u32,
}

/// How a sample is looped on playback
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioBankLoop {
    None,
    Restart,
    Once,
    Overlap,
}

impl TryFrom<u16> for AudioBankLoop {
    type Error = u16;

    fn try_from(value: u16) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(AudioBankLoop::None),
            1 => Ok(AudioBankLoop::Restart),
            2 => Ok(AudioBankLoop::Once),
            3 => Ok(AudioBankLoop::Overlap),
            other => Err(other),
        }
    }
}

/// Leading counts of the LHAudioBankSampleTable block
#[binrw]
#[brw(little)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AudioBankSampleTableHeader {
    /// Number of [`AudioBankSample`] records following
    pub count: u16,

    /// Repeats the count in every known bank
    pub reserved: u16,
}

/// Metadata for one sample of a sound bank
///
/// The record is always [`AUDIO_SAMPLE_SIZE`] bytes long. Several fields have no known
/// purpose and are only carried so a record can be written back unchanged.
#[binrw]
#[brw(little)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AudioBankSample {
    /// NUL-terminated path of the source file, usually with a drive letter
    pub name: [u8; 255],
    /// Purpose unknown; preserved as read
    #[brw(pad_before = 1)]
    pub unknown0: i32,
    /// Id of the sample within the bank
    pub id: i32,
    /// Bank flag; preserved as read
    pub is_bank: i32,
    /// Number of bytes of wave data
    pub size: u32,
    /// Offset of the wave data from the start of the LHAudioWaveData block
    pub relative_offset: u32,
    /// Clone marker; preserved as read
    pub clone: i32,
    /// Sound group
    pub group: i16,
    /// Atmosphere group
    pub atmos_group: i16,
    /// Purpose unknown; preserved as read
    pub unknown4: i32,
    /// Purpose unknown; preserved as read
    pub unknown5: i32,
    /// Purpose unknown; preserved as read
    pub unknown6a: i16,
    /// Purpose unknown; preserved as read
    pub unknown6b: i16,
    /// Sample rate of the wave data in Hz
    pub sample_rate: u32,
    /// Purpose unknown; preserved as read
    pub unknown_other_a: i16,
    /// Purpose unknown; preserved as read
    pub unknown_other_b: i16,
    /// Purpose unknown; preserved as read
    pub unknown7a: i16,
    /// Purpose unknown; preserved as read
    pub unknown7b: i16,
    /// Purpose unknown; preserved as read
    pub unknown8: i32,
    /// Loop start
    pub loop_start: i32,
    /// Loop end
    pub loop_end: i32,
    /// NUL-terminated free-form description
    pub description: [u8; 255],
    /// 0-9999
    #[brw(pad_before = 1)]
    pub priority: u16,
    /// Purpose unknown; preserved as read
    pub unknown9: u16,
    /// Purpose unknown; preserved as read
    pub unknown10: u16,
    /// Purpose unknown; preserved as read
    pub unknown11: u16,
    /// Loop flag
    pub looping: i16,
    /// Start setting; preserved as read
    pub start: u16,
    /// Pan position
    pub pan: u8,
    /// Purpose unknown; preserved as read
    #[brw(pad_before = 1)]
    pub unknown12: u16,
    /// -9999 to 9999
    pub x_pos: f32,
    /// -9999 to 9999
    pub y_pos: f32,
    /// -9999 to 9999
    pub z_pos: f32,
    /// Playback volume
    pub volume: u8,
    /// User parameter
    #[brw(pad_before = 1)]
    pub user_param: u16,
    /// Playback pitch
    pub pitch: u16,
    /// Purpose unknown; preserved as read
    pub unknown18: u16,
    /// Pitch deviation
    pub pitch_deviation: u16,
    /// Purpose unknown; preserved as read
    pub unknown20: u16,
    /// Minimum attenuation distance
    pub min_dist: f32,
    /// Maximum attenuation distance
    pub max_dist: f32,
    /// 0-50, multiplied by 10
    pub scale: f32,
    /// Raw [`AudioBankLoop`] value
    pub loop_type: u16,
    /// Purpose unknown; preserved as read
    pub unknown21: u16,
    /// Purpose unknown; preserved as read
    pub unknown22: u16,
    /// Purpose unknown; preserved as read
    pub unknown23: u16,
    /// Atmosphere setting; preserved as read
    #[brw(pad_after = 2)]
    pub atmos: u16,
}

impl Default for AudioBankSample {
    fn default() -> Self {
        Self {
            name: [0; 255],
            unknown0: 0,
            id: 0,
            is_bank: 0,
            size: 0,
            relative_offset: 0,
            clone: 0,
            group: 0,
            atmos_group: 0,
            unknown4: 0,
            unknown5: 0,
            unknown6a: 0,
            unknown6b: 0,
            sample_rate: 0,
            unknown_other_a: 0,
            unknown_other_b: 0,
            unknown7a: 0,
            unknown7b: 0,
            unknown8: 0,
            loop_start: 0,
            loop_end: 0,
            description: [0; 255],
            priority: 0,
            unknown9: 0,
            unknown10: 0,
            unknown11: 0,
            looping: 0,
            start: 0,
            pan: 0,
            unknown12: 0,
            x_pos: 0.0,
            y_pos: 0.0,
            z_pos: 0.0,
            volume: 0,
            user_param: 0,
            pitch: 0,
            unknown18: 0,
            pitch_deviation: 0,
            unknown20: 0,
            min_dist: 0.0,
            max_dist: 0.0,
            scale: 0.0,
            loop_type: 0,
            unknown21: 0,
            unknown22: 0,
            unknown23: 0,
            atmos: 0,
        }
    }
}

impl AudioBankSample {
    /// Create a sample record with the given source path and id
    pub fn new(name: &str, id: i32) -> Self {
        Self {
            name: to_fixed_string(name),
            id,
            ..Default::default()
        }
    }

    /// Source path of the sample as stored
    pub fn name(&self) -> String {
        fixed_string(&self.name)
    }

    /// Free-form description of the sample
    pub fn description(&self) -> String {
        fixed_string(&self.description)
    }

    /// File name of the sample with the drive letter and directories removed
    pub fn file_name(&self) -> String {
        let name = self.name();
        let relative = match name.as_bytes() {
            [_, b':', ..] => &name[2..],
            _ => name.as_str(),
        };
        relative
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or_default()
            .to_owned()
    }

    /// Decoded loop type, or the raw value if it is not known
    pub fn loop_type(&self) -> core::result::Result<AudioBankLoop, u16> {
        AudioBankLoop::try_from(self.loop_type)
    }
}

/// Leading fields of the LHFileSegmentBankInfo block
#[binrw]
#[brw(little)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FileSegmentBankInfo {
    /// Purpose unknown; preserved as read
    pub unknown: [u8; 12],

    /// NUL-terminated name of the bank
    pub name: [u8; 255],
}

impl FileSegmentBankInfo {
    /// Name of the bank
    pub fn name(&self) -> String {
        fixed_string(&self.name)
    }
}
