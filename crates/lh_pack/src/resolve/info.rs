//! INFO block lookup table.

use tracing::{debug, instrument};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::INFO,
    types::{InfoLookup, InfoTable},
};

use super::parse_block;

/// Read the texture lookup table from the INFO block.
///
/// Entry order is preserved as it defines the texture index.
#[instrument(skip_all, err)]
pub fn resolve_info(directory: &Directory) -> Result<Vec<InfoLookup>> {
    let data = directory.get(INFO).ok_or(Error::MissingInfoBlock)?;
    let table: InfoTable = parse_block(INFO, data)?;

    debug!(entries = table.entries.len(), "resolved INFO block");

    Ok(table.entries)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{
        directory::Directory,
        error::{Error, Result},
        resolve::info::resolve_info,
        types::InfoLookup,
    };

    #[test]
    fn resolve_entries_in_order() -> Result<()> {
        let mut directory = Directory::new();
        #[rustfmt::skip]
        let info = vec![
            0x02, 0x00, 0x00, 0x00,
            0x0A, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
        ];
        directory.insert("INFO", info)?;

        assert_eq!(
            resolve_info(&directory)?,
            vec![
                InfoLookup { block_id: 0xA, auxiliary: 1 },
                InfoLookup { block_id: 0x3, auxiliary: 2 },
            ]
        );

        Ok(())
    }

    #[test]
    fn missing_block() {
        assert!(matches!(
            resolve_info(&Directory::new()),
            Err(Error::MissingInfoBlock)
        ));
    }

    #[test]
    fn truncated_table() -> Result<()> {
        let mut directory = Directory::new();
        directory.insert("INFO", vec![0x02, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00])?;

        assert!(matches!(
            resolve_info(&directory),
            Err(Error::MalformedBlock { name, .. }) if name == "INFO"
        ));

        Ok(())
    }
}
