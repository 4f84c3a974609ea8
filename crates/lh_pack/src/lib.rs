//! This library handles reading from and creating the **pack** and **sound bank** files used by
//! *Black & White*.
//!
//! # Pack Format Documentation
//!
//! Mesh packs (`AllMeshes.g3d`), animation packs (`AllAnims.anm`) and sound banks (`*.sad`)
//! share one container: a magic signature followed by a flat list of named blocks. The container
//! itself knows nothing about what the blocks hold; a few well-known block names mark which
//! sub-format a file carries and the resolvers in [`resolve`] decode them.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 8 bytes: `"LiOnHeAd"`                                      |
//! | 0x0008         | Block header           | 36 bytes: see below                                        |
//! | 0x002C         | Block body             | `size` bytes                                               |
//! | ...            | ...                    | Further header and body pairs until the end of the file    |
//!
//! ### Block Header
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Name                   | 32 bytes: NUL-padded block name, unique within the file    |
//! | 0x0020         | Size                   | 4 bytes: Number of bytes in the block body                 |
//!
//! Blocks are written in byte order of their names, so writing a file that was read does not
//! always reproduce the original bytes, but reading it again yields the same blocks.
//!
//! ### Mesh Packs
//!
//! - **INFO**: a 4-byte count followed by `(id, auxiliary)` pairs of 4 bytes each. Every id names
//!   a texture block by its lowercase hexadecimal form without padding.
//! - **Texture blocks**: a 16-byte header (`size`, `id`, `type`, `ddsSize`), a 124-byte DDS header
//!   and the compressed pixels of the top level surface. Some packs leave the DDS linear size
//!   empty; it is then computed from the dimensions and the compression block size.
//! - **MESHES**: the tag `"MKJC"`, a 4-byte count, one 4-byte offset per mesh from the start of
//!   the block, then the meshes back to back. The last mesh ends at the end of the block.
//!
//! ### Animation Packs
//!
//! - **Body**: the tag `"MKJC"`, a 4-byte count and `(offset, auxiliary)` pairs. Each offset
//!   locates an 84-byte animation header within the Body block.
//! - **`Julien<N>`**: the payload of the animation at index `N`, appended to its header.
//!
//! ### Sound Banks
//!
//! - **LHAudioBankSampleTable**: a 2-byte count, 2 reserved bytes and one 640-byte record per
//!   sample.
//! - **LHAudioWaveData**: the wave data of every sample, located by each record's relative offset
//!   and size.
//! - **LHFileSegmentBankInfo**: optional, carries the name of the bank.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Checksums**: None; the DDS structure sizes are the only integrity check
//!

pub mod directory;
pub mod error;
pub mod names;
pub mod read;
pub mod resolve;
pub mod types;
pub mod write;

pub use directory::Directory;
pub use read::{PackFile, ReadOptions};
pub use write::{BuiltPack, PackBuilder};
