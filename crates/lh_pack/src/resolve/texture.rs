//! Texture blocks referenced by the INFO lookup table.

use binrw::{BinRead, BinWrite};
use indexmap::IndexMap;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, instrument, warn};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::texture_block_name,
    types::{
        DdsHeader, InfoLookup, TextureHeader, DDS_HEADER_SIZE, DDS_PIXEL_FORMAT_SIZE,
        TEXTURE_HEADER_SIZE,
    },
    write::to_u32,
};

/// Magic number of a standalone DDS file
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// A texture taken from a mesh pack
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRecord {
    /// Header of the texture block
    pub header: TextureHeader,

    /// DDS header, with `pitch_or_linear_size` filled in when the block left it empty
    pub dds_header: DdsHeader,

    /// Compressed pixel data of the top level surface
    pub pixels: Vec<u8>,
}

impl TextureRecord {
    /// Create a texture, deriving the texture header sizes from the DDS data
    pub fn new(id: u32, kind: u32, dds_header: DdsHeader, pixels: Vec<u8>) -> Result<Self> {
        let size = DDS_HEADER_SIZE as usize + pixels.len();
        Ok(Self {
            header: TextureHeader {
                size: to_u32(size, "texture size")?,
                id,
                kind,
                dds_size: to_u32(DDS_MAGIC.len() + size, "DDS file size")?,
            },
            dds_header,
            pixels,
        })
    }

    /// Id of the texture
    pub fn id(&self) -> u32 {
        self.header.id
    }

    /// Four-character code of the pixel format without trailing padding
    pub fn four_cc(&self) -> String {
        String::from_utf8_lossy(&self.dds_header.format.four_cc)
            .trim_end_matches(['\0', ' '])
            .to_owned()
    }

    /// Bytes per 4x4 block of the compressed format
    pub fn block_size(&self) -> u32 {
        match self.four_cc().as_str() {
            "DXT1" | "BC1" | "BC4" => 8,
            _ => 16,
        }
    }

    /// Write the texture as a standalone DDS file
    #[instrument(skip_all, err, fields(id = self.header.id))]
    pub fn write_dds<W: Write + Seek>(&self, mut writer: W) -> Result<W> {
        writer.write_all(&DDS_MAGIC)?;
        self.dds_header.write(&mut writer)?;
        writer.write_all(&self.pixels)?;
        Ok(writer)
    }

    /// Encode the texture as the body of its block
    pub fn to_block(&self) -> Result<Vec<u8>> {
        let mut block = Cursor::new(Vec::with_capacity(
            (TEXTURE_HEADER_SIZE + DDS_HEADER_SIZE) as usize + self.pixels.len(),
        ));
        self.header.write(&mut block)?;
        self.dds_header.write(&mut block)?;
        block.write_all(&self.pixels)?;
        Ok(block.into_inner())
    }

    /// Size of the top level surface computed from the dimensions of the texture
    fn linear_size(&self) -> u64 {
        u64::from(self.dds_header.width.div_ceil(4))
            * u64::from(self.dds_header.height.div_ceil(4))
            * u64::from(self.block_size())
    }
}

/// Extract every texture named by the INFO lookup table, keyed by id in table order.
#[instrument(skip_all, err, fields(entries = entries.len()))]
pub fn resolve_textures(
    directory: &Directory,
    entries: &[InfoLookup],
) -> Result<IndexMap<u32, TextureRecord>> {
    let mut textures = IndexMap::with_capacity(entries.len());

    for entry in entries {
        let name = texture_block_name(entry.block_id);
        let data = directory
            .get(&name)
            .ok_or_else(|| Error::MissingTextureBlock(name.clone()))?;

        let mut reader = Cursor::new(data);
        let malformed = |source| Error::MalformedBlock {
            name: name.clone(),
            source,
        };
        let header = TextureHeader::read(&mut reader).map_err(malformed)?;
        let dds_header = DdsHeader::read(&mut reader).map_err(malformed)?;

        if header.id != entry.block_id {
            return Err(Error::TextureBlockIdMismatch {
                expected: entry.block_id,
                actual: header.id,
            });
        }

        if textures.contains_key(&entry.block_id) {
            return Err(Error::TextureDuplicate(name));
        }

        if dds_header.size != DDS_HEADER_SIZE || dds_header.format.size != DDS_PIXEL_FORMAT_SIZE {
            return Err(Error::TextureInvalidDDSHeaderSize {
                name,
                header: dds_header.size,
                pixel_format: dds_header.format.size,
            });
        }

        let mut texture = TextureRecord {
            header,
            dds_header,
            pixels: Vec::new(),
        };

        if texture.dds_header.pitch_or_linear_size == 0 {
            let linear_size = texture.linear_size();
            warn!(
                block = %name,
                four_cc = %texture.four_cc(),
                linear_size,
                "texture has no linear size, computing it from its dimensions"
            );
            texture.dds_header.pitch_or_linear_size =
                u32::try_from(linear_size).unwrap_or(u32::MAX);
        }

        let start = reader.position() as usize;
        let expected = texture.dds_header.pitch_or_linear_size as usize;
        let available = data.len() - start;
        if expected > available {
            return Err(Error::TextureDataTruncated {
                name,
                expected,
                available,
            });
        }
        texture.pixels = data[start..start + expected].to_vec();

        debug!(block = %name, pixels = expected, "resolved texture");
        textures.insert(entry.block_id, texture);
    }

    Ok(textures)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tracing_test::traced_test;

    use crate::{
        directory::Directory,
        error::{Error, Result},
        resolve::texture::{resolve_textures, TextureRecord},
        types::{
            DdsHeader, DdsPixelFormat, InfoLookup, TextureHeader, DDS_HEADER_SIZE,
            DDS_PIXEL_FORMAT_SIZE,
        },
    };

    fn dds_header(four_cc: &[u8; 4], width: u32, height: u32, linear_size: u32) -> DdsHeader {
        DdsHeader {
            size: DDS_HEADER_SIZE,
            flags: 0x0008_1007,
            height,
            width,
            pitch_or_linear_size: linear_size,
            format: DdsPixelFormat {
                size: DDS_PIXEL_FORMAT_SIZE,
                flags: 0x4,
                four_cc: *four_cc,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn directory_with(texture: &TextureRecord) -> Result<Directory> {
        let mut directory = Directory::new();
        directory.insert(format!("{:x}", texture.id()), texture.to_block()?)?;
        Ok(directory)
    }

    fn lookup(block_id: u32) -> Vec<InfoLookup> {
        vec![InfoLookup {
            block_id,
            auxiliary: 0,
        }]
    }

    #[traced_test]
    #[test]
    fn resolve_single_texture() -> Result<()> {
        let texture = TextureRecord::new(0x2A, 1, dds_header(b"DXT3", 4, 4, 16), vec![7; 16])?;
        let directory = directory_with(&texture)?;

        let textures = resolve_textures(&directory, &lookup(0x2A))?;
        assert_eq!(textures.len(), 1);
        assert_eq!(textures[&0x2A], texture);

        Ok(())
    }

    #[traced_test]
    #[test]
    fn zero_linear_size_uses_block_size() -> Result<()> {
        // 10x6 DXT1 covers 3x2 blocks of 8 bytes
        let mut texture = TextureRecord::new(1, 0, dds_header(b"DXT1", 10, 6, 0), vec![1; 48])?;
        texture.pixels.extend_from_slice(&[0xFF; 4]);
        let directory = directory_with(&texture)?;

        let textures = resolve_textures(&directory, &lookup(1))?;
        let resolved = &textures[&1];
        assert_eq!(resolved.dds_header.pitch_or_linear_size, 48);
        assert_eq!(resolved.pixels, vec![1; 48]);

        let texture = TextureRecord::new(1, 0, dds_header(b"DXT5", 10, 6, 0), vec![1; 96])?;
        let textures = resolve_textures(&directory_with(&texture)?, &lookup(1))?;
        assert_eq!(textures[&1].dds_header.pitch_or_linear_size, 96);

        Ok(())
    }

    #[test]
    fn block_size_by_four_cc() -> Result<()> {
        for (four_cc, expected) in [
            (b"DXT1", 8),
            (b"BC1\0", 8),
            (b"BC4 ", 8),
            (b"DXT3", 16),
            (b"DXT5", 16),
            (b"BC7\0", 16),
        ] {
            let texture = TextureRecord::new(0, 0, dds_header(four_cc, 4, 4, 0), Vec::new())?;
            assert_eq!(texture.block_size(), expected, "{}", texture.four_cc());
        }

        Ok(())
    }

    #[test]
    fn texture_header_sizes() -> Result<()> {
        let texture = TextureRecord::new(3, 2, dds_header(b"DXT1", 4, 4, 8), vec![0; 8])?;
        assert_eq!(
            texture.header,
            TextureHeader {
                size: 124 + 8,
                id: 3,
                kind: 2,
                dds_size: 4 + 124 + 8,
            }
        );

        Ok(())
    }

    #[test]
    fn missing_texture_block() {
        let result = resolve_textures(&Directory::new(), &lookup(0xAB));
        assert!(matches!(result, Err(Error::MissingTextureBlock(name)) if name == "ab"));
    }

    #[test]
    fn mismatched_id() -> Result<()> {
        let texture = TextureRecord::new(5, 0, dds_header(b"DXT1", 4, 4, 8), vec![0; 8])?;
        let mut directory = Directory::new();
        directory.insert("6", texture.to_block()?)?;

        let result = resolve_textures(&directory, &lookup(6));
        assert!(matches!(
            result,
            Err(Error::TextureBlockIdMismatch {
                expected: 6,
                actual: 5
            })
        ));

        Ok(())
    }

    #[test]
    fn duplicate_texture() -> Result<()> {
        let texture = TextureRecord::new(5, 0, dds_header(b"DXT1", 4, 4, 8), vec![0; 8])?;
        let directory = directory_with(&texture)?;

        let mut entries = lookup(5);
        entries.extend(lookup(5));

        let result = resolve_textures(&directory, &entries);
        assert!(matches!(result, Err(Error::TextureDuplicate(name)) if name == "5"));

        Ok(())
    }

    #[test]
    fn invalid_dds_sizes() -> Result<()> {
        let mut header = dds_header(b"DXT1", 4, 4, 8);
        header.size = 128;
        let directory = directory_with(&TextureRecord::new(5, 0, header, vec![0; 8])?)?;
        assert!(matches!(
            resolve_textures(&directory, &lookup(5)),
            Err(Error::TextureInvalidDDSHeaderSize { header: 128, .. })
        ));

        let mut header = dds_header(b"DXT1", 4, 4, 8);
        header.format.size = 0;
        let directory = directory_with(&TextureRecord::new(5, 0, header, vec![0; 8])?)?;
        assert!(matches!(
            resolve_textures(&directory, &lookup(5)),
            Err(Error::TextureInvalidDDSHeaderSize {
                pixel_format: 0,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn truncated_pixels() -> Result<()> {
        let texture = TextureRecord::new(5, 0, dds_header(b"DXT1", 8, 8, 32), vec![0; 20])?;
        let directory = directory_with(&texture)?;

        assert!(matches!(
            resolve_textures(&directory, &lookup(5)),
            Err(Error::TextureDataTruncated {
                expected: 32,
                available: 20,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn write_standalone_dds() -> Result<()> {
        let texture = TextureRecord::new(5, 0, dds_header(b"DXT1", 4, 4, 8), vec![0xAA; 8])?;

        let dds = texture.write_dds(Cursor::new(Vec::new()))?.into_inner();
        assert_eq!(dds.len(), 4 + 124 + 8);
        assert_eq!(&dds[..4], b"DDS ");
        assert_eq!(&dds[4..8], &124u32.to_le_bytes());
        assert_eq!(&dds[128..], &[0xAA; 8]);

        Ok(())
    }
}
