//! Types for creating packs and sound banks
//!

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Seek, Write};
use std::mem;
use tracing::{debug, instrument, warn};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::{
        animation_block_name, texture_block_name, AUDIO_BANK_SAMPLE_TABLE, AUDIO_WAVE_DATA,
        BLOCK_TAG, BODY, INFO, MESHES,
    },
    resolve::TextureRecord,
    types::{
        AudioBankSample, AudioBankSampleTableHeader, InfoLookup, InfoTable,
        ANIMATION_HEADER_SIZE,
    },
};

pub(crate) fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} does not fit in 32 bits"),
        )
        .into()
    })
}

#[derive(Debug, Clone)]
struct StagedAnimation {
    header: [u8; ANIMATION_HEADER_SIZE],
    payload: Vec<u8>,
    auxiliary: u32,
}

/// Pack generator
///
/// Raw blocks are inserted directly; meshes, animations and samples are staged and only
/// turned into blocks by the matching `create_*` call. [`PackBuilder::finish`] ends the
/// building stage and the returned [`BuiltPack`] can be written exactly once.
///
/// ```
/// # fn doit() -> lh_pack::error::Result<()>
/// # {
/// use lh_pack::PackBuilder;
///
/// let mut pack = PackBuilder::new();
/// pack.insert_mesh(b"L3D0".to_vec());
/// pack.create_info_block()?;
/// pack.create_mesh_block()?;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let buf = pack.finish().write(std::io::Cursor::new(Vec::new()))?;
/// assert_eq!(&buf.get_ref()[..8], b"LiOnHeAd");
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackBuilder {
    directory: Directory,
    info: Vec<InfoLookup>,
    meshes: Vec<Vec<u8>>,
    animations: Vec<StagedAnimation>,
    samples: Vec<(AudioBankSample, Vec<u8>)>,
}

impl PackBuilder {
    /// Start an empty pack
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block verbatim
    pub fn create_raw_block(&mut self, name: impl Into<String>, data: Vec<u8>) -> Result<()> {
        self.directory.insert(name, data)
    }

    /// Stage a mesh for the MESHES block
    pub fn insert_mesh(&mut self, data: Vec<u8>) {
        self.meshes.push(data);
    }

    /// Create the block of a texture and stage its INFO lookup entry
    pub fn insert_texture(&mut self, texture: &TextureRecord, auxiliary: u32) -> Result<()> {
        self.directory
            .insert(texture_block_name(texture.id()), texture.to_block()?)?;
        self.info.push(InfoLookup {
            block_id: texture.id(),
            auxiliary,
        });
        Ok(())
    }

    /// Stage an animation for the Body block
    pub fn insert_animation(
        &mut self,
        header: [u8; ANIMATION_HEADER_SIZE],
        payload: Vec<u8>,
        auxiliary: u32,
    ) {
        self.animations.push(StagedAnimation {
            header,
            payload,
            auxiliary,
        });
    }

    /// Stage a sample and its wave data for the sound bank blocks
    ///
    /// The offset and size of the record are filled in by [`PackBuilder::create_audio_blocks`].
    pub fn insert_sample(&mut self, sample: AudioBankSample, data: Vec<u8>) {
        self.samples.push((sample, data));
    }

    /// Create the MESHES block from the staged meshes
    #[instrument(skip(self), err, fields(meshes = self.meshes.len()))]
    pub fn create_mesh_block(&mut self) -> Result<()> {
        if self.directory.contains(MESHES) {
            return Err(Error::DuplicateBlockName(MESHES.to_owned()));
        }

        let meshes = mem::take(&mut self.meshes);
        let table_size = BLOCK_TAG.len() + 4 + 4 * meshes.len();
        let total = table_size + meshes.iter().map(Vec::len).sum::<usize>();

        let mut contents = Vec::with_capacity(total);
        contents.write_all(&BLOCK_TAG)?;
        contents.write_u32::<LittleEndian>(to_u32(meshes.len(), "mesh count")?)?;

        let mut offset = table_size;
        for mesh in &meshes {
            contents.write_u32::<LittleEndian>(to_u32(offset, "mesh offset")?)?;
            offset += mesh.len();
        }
        for mesh in &meshes {
            contents.write_all(mesh)?;
        }

        debug!(size = contents.len(), "created MESHES block");
        self.directory.insert(MESHES, contents)
    }

    /// Create the INFO block from the staged texture lookup entries
    #[instrument(skip(self), err, fields(entries = self.info.len()))]
    pub fn create_info_block(&mut self) -> Result<()> {
        if self.directory.contains(INFO) {
            return Err(Error::DuplicateBlockName(INFO.to_owned()));
        }

        let table = InfoTable {
            entries: mem::take(&mut self.info),
        };
        let mut contents = Cursor::new(Vec::new());
        table.write(&mut contents)?;

        self.directory.insert(INFO, contents.into_inner())
    }

    /// Create the Body block and one payload block per staged animation
    ///
    /// Without staged animations the Body block is left empty. Nothing is inserted and the
    /// staged animations are kept if any of the block names is already taken.
    #[instrument(skip(self), err, fields(animations = self.animations.len()))]
    pub fn create_body_block(&mut self) -> Result<()> {
        let names = (0..self.animations.len())
            .map(animation_block_name)
            .collect::<Vec<_>>();
        for name in std::iter::once(BODY).chain(names.iter().map(String::as_str)) {
            if self.directory.contains(name) {
                return Err(Error::DuplicateBlockName(name.to_owned()));
            }
        }

        let mut contents = Vec::new();
        if !self.animations.is_empty() {
            let count = self.animations.len();
            let table_size = BLOCK_TAG.len() + 4 + 8 * count;
            contents.reserve(table_size + ANIMATION_HEADER_SIZE * count);

            contents.write_all(&BLOCK_TAG)?;
            contents.write_u32::<LittleEndian>(to_u32(count, "animation count")?)?;
            for (index, animation) in self.animations.iter().enumerate() {
                let offset = table_size + index * ANIMATION_HEADER_SIZE;
                contents.write_u32::<LittleEndian>(to_u32(offset, "animation offset")?)?;
                contents.write_u32::<LittleEndian>(animation.auxiliary)?;
            }
            for animation in &self.animations {
                contents.write_all(&animation.header)?;
            }
        }

        for (name, animation) in names.into_iter().zip(mem::take(&mut self.animations)) {
            self.directory.insert(name, animation.payload)?;
        }

        self.directory.insert(BODY, contents)
    }

    /// Create the sample table and wave data blocks from the staged samples
    ///
    /// Wave data is laid out in staging order. A bank needs at least one sample.
    #[instrument(skip(self), err, fields(samples = self.samples.len()))]
    pub fn create_audio_blocks(&mut self) -> Result<()> {
        for name in [AUDIO_BANK_SAMPLE_TABLE, AUDIO_WAVE_DATA] {
            if self.directory.contains(name) {
                return Err(Error::DuplicateBlockName(name.to_owned()));
            }
        }
        if self.samples.is_empty() {
            return Err(Error::NoEntries);
        }

        let count = u16::try_from(self.samples.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "too many samples for one bank")
        })?;

        let mut table = Cursor::new(Vec::new());
        AudioBankSampleTableHeader {
            count,
            reserved: count,
        }
        .write(&mut table)?;

        let mut wave = Vec::new();
        for (sample, data) in &self.samples {
            let sample = AudioBankSample {
                relative_offset: to_u32(wave.len(), "wave data offset")?,
                size: to_u32(data.len(), "sample size")?,
                ..*sample
            };
            sample.write(&mut table)?;
            wave.extend_from_slice(data);
        }

        self.samples.clear();
        self.directory
            .insert(AUDIO_BANK_SAMPLE_TABLE, table.into_inner())?;
        self.directory.insert(AUDIO_WAVE_DATA, wave)
    }

    /// End the building stage
    pub fn finish(self) -> BuiltPack {
        if !self.info.is_empty() {
            warn!(entries = self.info.len(), "INFO block was never created");
        }
        if !self.meshes.is_empty() {
            warn!(meshes = self.meshes.len(), "MESHES block was never created");
        }
        if !self.animations.is_empty() {
            warn!(animations = self.animations.len(), "Body block was never created");
        }
        if !self.samples.is_empty() {
            warn!(samples = self.samples.len(), "sound bank blocks were never created");
        }

        BuiltPack {
            directory: self.directory,
        }
    }
}

/// A finished pack, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPack {
    directory: Directory,
}

impl BuiltPack {
    /// The blocks that will be written
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Write the pack
    ///
    /// This will return the writer, but one should normally not append any data to the end of the file.
    pub fn write<W: Write + Seek>(self, writer: W) -> Result<W> {
        self.directory.write(writer)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::{
        error::{Error, Result},
        types::AudioBankSample,
        write::PackBuilder,
    };

    #[traced_test]
    #[test]
    fn mesh_block_layout() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.insert_mesh(vec![0xAA; 3]);
        pack.insert_mesh(vec![0xBB; 2]);
        pack.create_mesh_block()?;

        #[rustfmt::skip]
        let expected = [
            0x4D, 0x4B, 0x4A, 0x43,
            0x02, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x13, 0x00, 0x00, 0x00,
            0xAA, 0xAA, 0xAA,
            0xBB, 0xBB,
        ];
        assert_eq!(pack.finish().directory().by_name("MESHES")?, &expected);

        Ok(())
    }

    #[test]
    fn empty_mesh_block() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.create_mesh_block()?;

        assert_eq!(
            pack.finish().directory().by_name("MESHES")?,
            &[0x4D, 0x4B, 0x4A, 0x43, 0x00, 0x00, 0x00, 0x00]
        );

        Ok(())
    }

    #[test]
    fn empty_info_and_body_blocks() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.create_info_block()?;
        pack.create_body_block()?;

        let pack = pack.finish();
        assert_eq!(pack.directory().by_name("INFO")?, &[0, 0, 0, 0]);
        assert_eq!(pack.directory().by_name("Body")?, b"");

        Ok(())
    }

    #[test]
    fn body_block_layout() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.insert_animation([1; 0x54], vec![0xA0], 5);
        pack.insert_animation([2; 0x54], vec![0xB0, 0xB1], 6);
        pack.create_body_block()?;

        let pack = pack.finish();
        let body = pack.directory().by_name("Body")?;
        assert_eq!(body.len(), 24 + 2 * 0x54);

        #[rustfmt::skip]
        let table = [
            0x4D, 0x4B, 0x4A, 0x43,
            0x02, 0x00, 0x00, 0x00,
            0x18, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00,
            0x6C, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
        ];
        assert_eq!(&body[..24], &table);
        assert_eq!(&body[0x18..0x6C], &[1; 0x54]);
        assert_eq!(&body[0x6C..], &[2; 0x54]);

        assert_eq!(pack.directory().by_name("Julien0")?, &[0xA0]);
        assert_eq!(pack.directory().by_name("Julien1")?, &[0xB0, 0xB1]);

        Ok(())
    }

    #[test]
    fn audio_blocks_fill_offsets() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.insert_sample(AudioBankSample::new("a.wav", 1), vec![1; 3]);
        pack.insert_sample(AudioBankSample::new("b.wav", 2), vec![2; 5]);
        pack.create_audio_blocks()?;

        let pack = pack.finish();
        let table = pack.directory().by_name("LHAudioBankSampleTable")?;
        assert_eq!(table.len(), 4 + 2 * 640);
        assert_eq!(&table[..4], &[0x02, 0x00, 0x02, 0x00]);
        // second record: size then relative offset
        assert_eq!(&table[4 + 640 + 268..4 + 640 + 276], &[5, 0, 0, 0, 3, 0, 0, 0]);

        assert_eq!(
            pack.directory().by_name("LHAudioWaveData")?,
            &[1, 1, 1, 2, 2, 2, 2, 2]
        );

        Ok(())
    }

    #[test]
    fn synthesized_blocks_reject_duplicates() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.create_raw_block("MESHES", Vec::new())?;
        pack.create_raw_block("INFO", Vec::new())?;
        pack.create_raw_block("Body", Vec::new())?;
        pack.create_raw_block("LHAudioWaveData", Vec::new())?;

        assert!(matches!(
            pack.create_raw_block("MESHES", Vec::new()),
            Err(Error::DuplicateBlockName(name)) if name == "MESHES"
        ));
        assert!(matches!(
            pack.create_mesh_block(),
            Err(Error::DuplicateBlockName(name)) if name == "MESHES"
        ));
        assert!(matches!(
            pack.create_info_block(),
            Err(Error::DuplicateBlockName(name)) if name == "INFO"
        ));
        assert!(matches!(
            pack.create_body_block(),
            Err(Error::DuplicateBlockName(name)) if name == "Body"
        ));
        assert!(matches!(
            pack.create_audio_blocks(),
            Err(Error::DuplicateBlockName(name)) if name == "LHAudioWaveData"
        ));

        Ok(())
    }

    #[test]
    fn taken_payload_name_keeps_staged_animations() -> Result<()> {
        let mut pack = PackBuilder::new();
        pack.create_raw_block("Julien1", vec![0xFF])?;
        pack.insert_animation([1; 0x54], vec![0xA0], 0);
        pack.insert_animation([2; 0x54], vec![0xB0], 0);

        assert!(matches!(
            pack.create_body_block(),
            Err(Error::DuplicateBlockName(name)) if name == "Julien1"
        ));
        assert!(matches!(
            pack.create_body_block(),
            Err(Error::DuplicateBlockName(name)) if name == "Julien1"
        ));

        let pack = pack.finish();
        assert_eq!(pack.directory().names().collect::<Vec<_>>(), vec!["Julien1"]);
        assert_eq!(pack.directory().by_name("Julien1")?, &[0xFF]);

        Ok(())
    }

    #[test]
    fn audio_blocks_need_a_sample() {
        let mut pack = PackBuilder::new();

        assert!(matches!(pack.create_audio_blocks(), Err(Error::NoEntries)));
        assert!(pack.finish().directory().is_empty());
    }

    #[traced_test]
    #[test]
    fn finish_warns_about_staged_data() {
        let mut pack = PackBuilder::new();
        pack.insert_mesh(Vec::new());

        assert!(pack.finish().directory().is_empty());
        assert!(logs_contain("MESHES block was never created"));
    }
}
