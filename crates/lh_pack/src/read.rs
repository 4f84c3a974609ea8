//! Types for reading packs and sound banks
//!

use bon::Builder;
use std::io::{Read, Seek};
use tracing::{debug, instrument};

use crate::{
    directory::Directory,
    error::{NotFoundError, Result},
    names::{AUDIO_WAVE_DATA, MESHES},
    resolve::{AnimationPack, AnimationRecord, MeshPack, Resolve, SoundBank, TextureRecord},
    types::{AudioBankSample, BodyLookup, InfoLookup},
};

/// Options for which sub-formats are resolved when a pack is opened
///
/// Directory parsing always happens; these only skip resolvers.
#[derive(Debug, Clone, Copy, Builder)]
pub struct ReadOptions {
    /// Resolve the textures referenced by the INFO block
    #[builder(default = true)]
    pub textures: bool,

    /// Resolve the MESHES block
    #[builder(default = true)]
    pub meshes: bool,

    /// Resolve the Body block and its animations
    #[builder(default = true)]
    pub animations: bool,

    /// Resolve the sample table and wave data of a sound bank
    #[builder(default = true)]
    pub audio: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A parsed pack or sound bank
///
/// Resolvers run once when the pack is opened, chosen by the well-known blocks present.
/// The result cannot be modified afterwards; create a new pack with [`crate::PackBuilder`].
///
/// ```no_run
/// use std::fs::File;
///
/// fn list_textures(path: &str) -> lh_pack::error::Result<()> {
///     let pack = lh_pack::PackFile::open(File::open(path)?, Default::default())?;
///
///     for (id, texture) in pack.textures() {
///         println!("{id:x}: {}x{} {}", texture.dds_header.width, texture.dds_header.height, texture.four_cc());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PackFile {
    directory: Directory,
    mesh_pack: Option<MeshPack>,
    animation_pack: Option<AnimationPack>,
    sound_bank: Option<SoundBank>,
}

impl PackFile {
    /// Read the directory and resolve every sub-format it carries
    #[instrument(skip(reader), err)]
    pub fn open<R: Read + Seek>(reader: R, options: ReadOptions) -> Result<Self> {
        Self::from_directory(Directory::read(reader)?, options)
    }

    /// Resolve the sub-formats of an already parsed directory
    #[instrument(skip(directory), err)]
    pub fn from_directory(directory: Directory, options: ReadOptions) -> Result<Self> {
        let mesh_pack = if options.textures || options.meshes {
            directory
                .contains(MeshPack::TRIGGER)
                .then(|| MeshPack::resolve_parts(&directory, options.textures, options.meshes))
                .transpose()?
        } else {
            None
        };

        let animation_pack = if options.animations {
            AnimationPack::resolve_if_present(&directory)?
        } else {
            None
        };

        let sound_bank = if options.audio {
            SoundBank::resolve_if_present(&directory)?
        } else {
            None
        };

        debug!(
            mesh_pack = mesh_pack.is_some(),
            animation_pack = animation_pack.is_some(),
            sound_bank = sound_bank.is_some(),
            "opened pack"
        );

        Ok(Self {
            directory,
            mesh_pack,
            animation_pack,
            sound_bank,
        })
    }

    /// The blocks of the pack
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Unwrap and return the blocks of the pack
    pub fn into_directory(self) -> Directory {
        self.directory
    }

    /// Contents of a block
    pub fn block(&self, name: &str) -> Result<&[u8]> {
        self.directory.by_name(name)
    }

    /// Whether the INFO block was resolved
    pub fn is_mesh_pack(&self) -> bool {
        self.mesh_pack.is_some()
    }

    /// Whether the Body block was resolved
    pub fn is_animation_pack(&self) -> bool {
        self.animation_pack.is_some()
    }

    /// Whether the sample table was resolved
    pub fn is_sound_bank(&self) -> bool {
        self.sound_bank.is_some()
    }

    /// Entries of the INFO block in index order
    pub fn info_lookup(&self) -> &[InfoLookup] {
        self.mesh_pack
            .as_ref()
            .map(|pack| pack.info.as_slice())
            .unwrap_or_default()
    }

    /// Textures keyed by id, in INFO order
    pub fn textures(&self) -> impl Iterator<Item = (u32, &TextureRecord)> {
        self.mesh_pack
            .iter()
            .flat_map(|pack| pack.textures.iter().map(|(id, texture)| (*id, texture)))
    }

    /// Number of resolved textures
    pub fn texture_count(&self) -> usize {
        self.mesh_pack.as_ref().map_or(0, |pack| pack.textures.len())
    }

    /// Search for a texture by id
    pub fn texture(&self, id: u32) -> Result<&TextureRecord> {
        self.mesh_pack
            .as_ref()
            .and_then(|pack| pack.textures.get(&id))
            .ok_or_else(|| NotFoundError::Texture(id).into())
    }

    /// Number of resolved meshes
    pub fn mesh_count(&self) -> usize {
        self.mesh_pack.as_ref().map_or(0, |pack| pack.meshes.len())
    }

    /// Bytes of every mesh in index order
    pub fn meshes(&self) -> impl Iterator<Item = &[u8]> {
        let block = self.directory.get(MESHES).unwrap_or_default();
        self.mesh_pack
            .iter()
            .flat_map(move |pack| pack.meshes.iter().map(move |range| &block[range.clone()]))
    }

    /// Get the bytes of a mesh by index
    pub fn mesh(&self, index: usize) -> Result<&[u8]> {
        let range = self
            .mesh_pack
            .as_ref()
            .and_then(|pack| pack.meshes.get(index))
            .ok_or(NotFoundError::Mesh(index))?;

        Ok(&self.directory.by_name(MESHES)?[range.clone()])
    }

    /// Entries of the Body block in index order
    pub fn body_lookup(&self) -> &[BodyLookup] {
        self.animation_pack
            .as_ref()
            .map(|pack| pack.body.as_slice())
            .unwrap_or_default()
    }

    /// Animations in index order
    pub fn animations(&self) -> &[AnimationRecord] {
        self.animation_pack
            .as_ref()
            .map(|pack| pack.animations.as_slice())
            .unwrap_or_default()
    }

    /// Get an animation by index
    pub fn animation(&self, index: usize) -> Result<&AnimationRecord> {
        self.animations()
            .get(index)
            .ok_or_else(|| NotFoundError::Animation(index).into())
    }

    /// Name of the sound bank, if it carries one
    pub fn bank_name(&self) -> Option<&str> {
        self.sound_bank.as_ref().and_then(|bank| bank.name.as_deref())
    }

    /// Sample records in table order
    pub fn samples(&self) -> &[AudioBankSample] {
        self.sound_bank
            .as_ref()
            .map(|bank| bank.samples.as_slice())
            .unwrap_or_default()
    }

    /// Get a sample record and its wave data by index
    pub fn sample(&self, index: usize) -> Result<(&AudioBankSample, &[u8])> {
        let (sample, range) = self
            .sound_bank
            .as_ref()
            .and_then(|bank| Some((bank.samples.get(index)?, bank.data.get(index)?)))
            .ok_or(NotFoundError::Sample(index))?;

        Ok((sample, &self.directory.by_name(AUDIO_WAVE_DATA)?[range.clone()]))
    }
}
