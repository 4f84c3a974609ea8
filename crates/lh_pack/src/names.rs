//! Well-known block names and the mapping from record identity to block name.
//!
//! Every place that needs to find or create a block by numeric identity goes
//! through these functions so the read and write paths agree on naming.

/// Magic signature at the start of every pack and sound bank
pub const MAGIC: [u8; 8] = *b"LiOnHeAd";

/// Tag at the start of the `MESHES` and `Body` blocks
pub const BLOCK_TAG: [u8; 4] = *b"MKJC";

/// Texture lookup table of a mesh pack
pub const INFO: &str = "INFO";

/// Concatenated L3D meshes of a mesh pack
pub const MESHES: &str = "MESHES";

/// Animation lookup table of an animation pack
pub const BODY: &str = "Body";

/// Sample metadata table of a sound bank
pub const AUDIO_BANK_SAMPLE_TABLE: &str = "LHAudioBankSampleTable";

/// Pool of wave data of a sound bank
pub const AUDIO_WAVE_DATA: &str = "LHAudioWaveData";

/// Descriptive information of a sound bank
pub const FILE_SEGMENT_BANK_INFO: &str = "LHFileSegmentBankInfo";

const ANIMATION_PREFIX: &str = "Julien";

/// Name of the block holding the texture with the given id.
///
/// The id is written as lowercase hexadecimal without padding.
pub fn texture_block_name(id: u32) -> String {
    format!("{id:x}")
}

/// Name of the block holding the payload of the animation at `index`.
pub fn animation_block_name(index: usize) -> String {
    format!("{ANIMATION_PREFIX}{index}")
}
