//! Resolvers turning raw blocks into typed records.
//!
//! Each sub-format of a pack is handled by its own resolver. The free functions in the
//! submodules perform one resolution step each, while the [`Resolve`] implementations
//! chain those steps for a whole sub-format and are selected by [`crate::PackFile`]
//! according to the blocks present in the directory.

pub mod animation;
pub mod audio;
pub mod info;
pub mod mesh;
pub mod texture;

use binrw::{meta::ReadEndian, BinRead};
use std::io::Cursor;

use crate::{
    directory::Directory,
    error::{Error, Result},
};

pub use animation::{resolve_animations, resolve_body, AnimationPack, AnimationRecord};
pub use audio::{resolve_audio_bank, resolve_audio_wave, resolve_bank_name, SoundBank};
pub use info::resolve_info;
pub use mesh::{resolve_meshes, MeshPack};
pub use texture::{resolve_textures, TextureRecord};

/// A sub-format that can be resolved from a directory
pub trait Resolve: Sized {
    /// Block whose presence means the directory carries this sub-format
    const TRIGGER: &'static str;

    /// Resolve the sub-format, assuming [`Resolve::TRIGGER`] is present
    fn resolve(directory: &Directory) -> Result<Self>;

    /// Resolve the sub-format if its trigger block is present
    fn resolve_if_present(directory: &Directory) -> Result<Option<Self>> {
        if directory.contains(Self::TRIGGER) {
            Self::resolve(directory).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Decode a fixed layout from the start of a block, naming the block on failure
pub(crate) fn parse_block<T>(name: &str, data: &[u8]) -> Result<T>
where
    T: for<'a> BinRead<Args<'a> = ()> + ReadEndian,
{
    T::read(&mut Cursor::new(data)).map_err(|source| Error::MalformedBlock {
        name: name.to_owned(),
        source,
    })
}
