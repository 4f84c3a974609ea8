//! MESHES block and the mesh pack sub-format.

use indexmap::IndexMap;
use std::ops::Range;
use tracing::{debug, instrument};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::{BLOCK_TAG, INFO, MESHES},
    types::{InfoLookup, MeshTable},
};

use super::{info::resolve_info, parse_block, texture::resolve_textures, Resolve, TextureRecord};

/// Locate every mesh within the MESHES block.
///
/// Each range indexes into the block; the last mesh runs to the end of the block.
#[instrument(skip_all, err)]
pub fn resolve_meshes(directory: &Directory) -> Result<Vec<Range<usize>>> {
    let data = directory.get(MESHES).ok_or(Error::MissingMeshBlock)?;

    if data.len() < BLOCK_TAG.len() || data[..BLOCK_TAG.len()] != BLOCK_TAG {
        return Err(Error::MeshBlockHeaderMalformed);
    }

    let table: MeshTable = parse_block(MESHES, data)?;
    let table_end = BLOCK_TAG.len() + 4 + 4 * table.offsets.len();

    let mut meshes = Vec::with_capacity(table.offsets.len());
    let mut previous = table_end;
    for (index, &offset) in table.offsets.iter().enumerate() {
        let start = offset as usize;
        if start < previous || start > data.len() {
            return Err(Error::MeshOffsetsInvalid { index, offset });
        }

        let end = match table.offsets.get(index + 1) {
            Some(&next) => (next as usize).clamp(start, data.len()),
            None => data.len(),
        };
        meshes.push(start..end);
        previous = start;
    }

    debug!(meshes = meshes.len(), "resolved MESHES block");

    Ok(meshes)
}

/// Mesh pack: INFO lookup table, the textures it references and the MESHES block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshPack {
    /// INFO lookup entries in index order
    pub info: Vec<InfoLookup>,

    /// Textures keyed by id, in INFO order
    pub textures: IndexMap<u32, TextureRecord>,

    /// Byte ranges of each mesh within the MESHES block
    pub meshes: Vec<Range<usize>>,
}

impl MeshPack {
    /// Resolve the INFO table and, optionally, its textures and the meshes
    pub fn resolve_parts(directory: &Directory, textures: bool, meshes: bool) -> Result<Self> {
        let info = resolve_info(directory)?;
        let textures = if textures {
            resolve_textures(directory, &info)?
        } else {
            IndexMap::new()
        };
        let meshes = if meshes {
            resolve_meshes(directory)?
        } else {
            Vec::new()
        };

        Ok(Self {
            info,
            textures,
            meshes,
        })
    }
}

impl Resolve for MeshPack {
    const TRIGGER: &'static str = INFO;

    fn resolve(directory: &Directory) -> Result<Self> {
        Self::resolve_parts(directory, true, true)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::{
        directory::Directory,
        error::{Error, Result},
        resolve::{mesh::resolve_meshes, MeshPack, Resolve},
    };

    fn with_meshes(data: Vec<u8>) -> Result<Directory> {
        let mut directory = Directory::new();
        directory.insert("MESHES", data)?;
        Ok(directory)
    }

    #[traced_test]
    #[test]
    fn resolve_two_meshes() -> Result<()> {
        #[rustfmt::skip]
        let data = vec![
            // Tag
            0x4D, 0x4B, 0x4A, 0x43,
            // Count
            0x02, 0x00, 0x00, 0x00,
            // Offsets
            0x10, 0x00, 0x00, 0x00,
            0x13, 0x00, 0x00, 0x00,
            // Meshes
            0xAA, 0xAA, 0xAA,
            0xBB, 0xBB,
        ];
        let directory = with_meshes(data)?;

        let meshes = resolve_meshes(&directory)?;
        assert_eq!(meshes, vec![16..19, 19..21]);

        let block = directory.by_name("MESHES")?;
        assert_eq!(&block[meshes[1].clone()], &[0xBB, 0xBB]);

        Ok(())
    }

    #[test]
    fn resolve_no_meshes() -> Result<()> {
        let directory = with_meshes(vec![0x4D, 0x4B, 0x4A, 0x43, 0, 0, 0, 0])?;
        assert!(resolve_meshes(&directory)?.is_empty());

        Ok(())
    }

    #[test]
    fn missing_block() {
        assert!(matches!(
            resolve_meshes(&Directory::new()),
            Err(Error::MissingMeshBlock)
        ));
    }

    #[test]
    fn malformed_tag() -> Result<()> {
        let directory = with_meshes(vec![0x4D, 0x4B, 0x4A, 0x44, 0, 0, 0, 0])?;
        assert!(matches!(
            resolve_meshes(&directory),
            Err(Error::MeshBlockHeaderMalformed)
        ));

        let directory = with_meshes(vec![0x4D, 0x4B])?;
        assert!(matches!(
            resolve_meshes(&directory),
            Err(Error::MeshBlockHeaderMalformed)
        ));

        Ok(())
    }

    #[test]
    fn truncated_offsets() -> Result<()> {
        let directory = with_meshes(vec![0x4D, 0x4B, 0x4A, 0x43, 3, 0, 0, 0, 0x14, 0, 0, 0])?;
        assert!(matches!(
            resolve_meshes(&directory),
            Err(Error::MalformedBlock { name, .. }) if name == "MESHES"
        ));

        Ok(())
    }

    #[test]
    fn decreasing_offsets() -> Result<()> {
        #[rustfmt::skip]
        let data = vec![
            0x4D, 0x4B, 0x4A, 0x43,
            0x02, 0x00, 0x00, 0x00,
            0x12, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];
        assert!(matches!(
            resolve_meshes(&with_meshes(data)?),
            Err(Error::MeshOffsetsInvalid {
                index: 1,
                offset: 0x10
            })
        ));

        Ok(())
    }

    #[test]
    fn offset_past_block_end() -> Result<()> {
        #[rustfmt::skip]
        let data = vec![
            0x4D, 0x4B, 0x4A, 0x43,
            0x01, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
        ];
        assert!(matches!(
            resolve_meshes(&with_meshes(data)?),
            Err(Error::MeshOffsetsInvalid { index: 0, .. })
        ));

        Ok(())
    }

    #[test]
    fn offset_inside_table() -> Result<()> {
        #[rustfmt::skip]
        let data = vec![
            0x4D, 0x4B, 0x4A, 0x43,
            0x01, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
        ];
        assert!(matches!(
            resolve_meshes(&with_meshes(data)?),
            Err(Error::MeshOffsetsInvalid {
                index: 0,
                offset: 4
            })
        ));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn mesh_pack_without_textures() -> Result<()> {
        let mut directory = with_meshes(vec![0x4D, 0x4B, 0x4A, 0x43, 0, 0, 0, 0])?;
        directory.insert("INFO", vec![0, 0, 0, 0])?;

        let pack = MeshPack::resolve_if_present(&directory)?;
        assert_eq!(pack, Some(MeshPack::default()));

        assert_eq!(MeshPack::resolve_if_present(&Directory::new())?, None);

        Ok(())
    }
}
