//! The flat block directory shared by packs and sound banks.
//!

use binrw::{BinRead, BinWrite};
use std::{
    collections::BTreeMap,
    io::{self, Read, Seek, SeekFrom, Write},
};
use tracing::{debug, instrument, trace};

use crate::{
    error::{Error, NotFoundError, Result},
    names::MAGIC,
    types::{BlockHeader, BLOCK_HEADER_SIZE},
};

/// The named blocks of a pack.
///
/// Blocks are kept in byte order of their names, which is also the order they are written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    blocks: BTreeMap<String, Vec<u8>>,
}

impl Directory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every block of a pack.
    ///
    /// ```no_run
    /// use std::fs::File;
    ///
    /// fn list_blocks(path: &str) -> lh_pack::error::Result<()> {
    ///     let directory = lh_pack::Directory::read(File::open(path)?)?;
    ///
    ///     for (name, data) in directory.iter() {
    ///         println!("{}: {} bytes", name, data.len());
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(reader), err)]
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let total = reader.seek(SeekFrom::End(0))?;
        reader.rewind()?;

        if total < (MAGIC.len() + BLOCK_HEADER_SIZE) as u64 {
            return Err(Error::FileTooSmall);
        }

        let mut magic = [0u8; MAGIC.len()];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::UnrecognizedHeader);
        }

        let mut blocks = BTreeMap::new();
        let mut position = MAGIC.len() as u64;
        while total - position >= BLOCK_HEADER_SIZE as u64 {
            let header = BlockHeader::read(&mut reader)?;
            position += BLOCK_HEADER_SIZE as u64;

            let name = header.name();
            if blocks.contains_key(&name) {
                return Err(Error::DuplicateBlockName(name));
            }

            if u64::from(header.size) > total - position {
                return Err(Error::FileNotEvenlySplit);
            }

            let mut data = vec![0u8; header.size as usize];
            reader.read_exact(&mut data)?;
            position += u64::from(header.size);

            trace!(block = %name, size = header.size, "read block");
            blocks.insert(name, data);
        }

        if position != total {
            return Err(Error::FileNotEvenlySplit);
        }

        debug!(blocks = blocks.len(), "read pack directory");

        Ok(Self { blocks })
    }

    /// Write the magic signature followed by every block in name order.
    #[instrument(skip_all, err, fields(blocks = self.blocks.len()))]
    pub fn write<W: Write + Seek>(&self, mut writer: W) -> Result<W> {
        writer.write_all(&MAGIC)?;

        for (name, data) in &self.blocks {
            let size = u32::try_from(data.len()).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("block {name} is too large"))
            })?;
            BlockHeader::new(name, size)?.write(&mut writer)?;
            writer.write_all(data)?;
        }

        writer.flush()?;

        Ok(writer)
    }

    /// Add a block, failing if one with the same name already exists
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let name = name.into();
        if self.blocks.contains_key(&name) {
            return Err(Error::DuplicateBlockName(name));
        }
        BlockHeader::new(&name, 0)?;

        self.blocks.insert(name, data);
        Ok(())
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the directory holds no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether a block with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Contents of a block, if present
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.blocks.get(name).map(Vec::as_slice)
    }

    /// Contents of a block
    pub fn by_name(&self, name: &str) -> Result<&[u8]> {
        self.get(name)
            .ok_or_else(|| Error::NotFound(NotFoundError::Block(name.to_owned())))
    }

    /// Returns an iterator over all block names in write order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Returns an iterator over all blocks in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.blocks
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }
}
