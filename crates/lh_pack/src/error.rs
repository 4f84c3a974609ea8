//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is too small to be a valid pack file
    #[error("file is too small to be a valid pack file")]
    FileTooSmall,

    /// unrecognized pack header
    #[error("unrecognized pack header")]
    UnrecognizedHeader,

    /// duplicate block name {0}
    #[error("duplicate block name {0:?}")]
    DuplicateBlockName(String),

    /// file not evenly split into whole blocks
    #[error("file not evenly split into whole blocks")]
    FileNotEvenlySplit,

    /// block name {0} does not fit in a block header
    #[error("block name {0:?} does not fit in a block header")]
    BlockNameTooLong(String),

    /// block {name} is shorter than its contents claim
    #[error("block {name:?} is shorter than its contents claim")]
    MalformedBlock {
        /// Name of the offending block
        name: String,
        /// Underlying decoding failure
        #[source]
        source: binrw::Error,
    },

    /// no INFO block in mesh pack
    #[error("no INFO block in mesh pack")]
    MissingInfoBlock,

    /// required texture block {0} missing
    #[error("required texture block {0:?} missing")]
    MissingTextureBlock(String),

    /// texture block id is not the same as block id
    #[error("texture block id {actual:#x} is not the same as block id {expected:#x}")]
    TextureBlockIdMismatch {
        /// Id taken from the INFO lookup table
        expected: u32,
        /// Id stored in the texture block header
        actual: u32,
    },

    /// duplicate texture {0} extracted
    #[error("duplicate texture {0:?} extracted")]
    TextureDuplicate(String),

    /// texture DDS header sizes are invalid
    #[error("texture {name:?} has invalid DDS header sizes (header {header}, pixel format {pixel_format})")]
    TextureInvalidDDSHeaderSize {
        /// Name of the texture block
        name: String,
        /// Value of the DDS header size field
        header: u32,
        /// Value of the DDS pixel format size field
        pixel_format: u32,
    },

    /// texture pixel data is truncated
    #[error("texture {name:?} needs {expected} pixel bytes but only {available} remain")]
    TextureDataTruncated {
        /// Name of the texture block
        name: String,
        /// Bytes required by the DDS header
        expected: usize,
        /// Bytes left in the block
        available: usize,
    },

    /// no MESHES block in mesh pack
    #[error("no MESHES block in mesh pack")]
    MissingMeshBlock,

    /// unrecognized mesh block header
    #[error("unrecognized mesh block header")]
    MeshBlockHeaderMalformed,

    /// mesh offset table is out of order or out of bounds
    #[error("mesh {index} offset {offset:#x} is out of order or out of bounds")]
    MeshOffsetsInvalid {
        /// Index of the offending mesh
        index: usize,
        /// Offset read from the table
        offset: u32,
    },

    /// no Body block in anim pack
    #[error("no Body block in anim pack")]
    MissingBodyBlock,

    /// unrecognized Body block header
    #[error("unrecognized Body block header")]
    UnrecognizedBlockHeader,

    /// required animation block {0} missing
    #[error("required animation block {0:?} missing")]
    MissingAnimationBlock(String),

    /// animation header lies outside of the Body block
    #[error("animation {index} header at offset {offset:#x} lies outside of the Body block")]
    AnimationHeaderOutOfBounds {
        /// Index of the animation
        index: usize,
        /// Offset read from the Body lookup table
        offset: u32,
    },

    /// no LHAudioBankSampleTable block in sound bank
    #[error("no LHAudioBankSampleTable block in sound bank")]
    MissingAudioBankSampleTableBlock,

    /// no LHAudioWaveData block in sound bank
    #[error("no LHAudioWaveData block in sound bank")]
    MissingAudioWaveDataBlock,

    /// audio bank has no sound entries
    #[error("audio bank has no sound entries")]
    NoEntries,

    /// unable to find requested entry
    #[error("unable to find requested entry")]
    NotFound(#[from] NotFoundError),
}

/// Error type to provide further information when an entry has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested entry")]
pub enum NotFoundError {
    /// block named {0}
    #[error("block named {0}")]
    Block(String),

    /// texture with id {0:x}
    #[error("texture with id {0:x}")]
    Texture(u32),

    /// mesh at index {0}
    #[error("mesh at index {0}")]
    Mesh(usize),

    /// animation at index {0}
    #[error("animation at index {0}")]
    Animation(usize),

    /// sample at index {0}
    #[error("sample at index {0}")]
    Sample(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
