//! Body lookup table and the animation pack sub-format.

use tracing::{debug, instrument};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::{animation_block_name, BLOCK_TAG, BODY},
    types::{BodyLookup, BodyTable, ANIMATION_HEADER_SIZE},
};

use super::{parse_block, Resolve};

/// An animation assembled from its Body header and its payload block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationRecord {
    /// Fixed-size header taken from the Body block
    pub header: [u8; ANIMATION_HEADER_SIZE],

    /// Contents of the `Julien<i>` block
    pub payload: Vec<u8>,
}

impl AnimationRecord {
    /// Header followed by payload, the layout of a standalone animation file
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut merged = Vec::with_capacity(self.merged_len());
        merged.extend_from_slice(&self.header);
        merged.extend_from_slice(&self.payload);
        merged
    }

    /// Length of the merged animation
    pub fn merged_len(&self) -> usize {
        ANIMATION_HEADER_SIZE + self.payload.len()
    }
}

/// Read the animation lookup table from the Body block.
///
/// A Body block with no contents holds no animations.
#[instrument(skip_all, err)]
pub fn resolve_body(directory: &Directory) -> Result<Vec<BodyLookup>> {
    let data = directory.get(BODY).ok_or(Error::MissingBodyBlock)?;
    if data.is_empty() {
        debug!("Body block is empty");
        return Ok(Vec::new());
    }

    if data.len() < BLOCK_TAG.len() || data[..BLOCK_TAG.len()] != BLOCK_TAG {
        return Err(Error::UnrecognizedBlockHeader);
    }

    let table: BodyTable = parse_block(BODY, data)?;

    debug!(entries = table.entries.len(), "resolved Body block");

    Ok(table.entries)
}

/// Merge the Body header of every lookup entry with its payload block
#[instrument(skip_all, err, fields(entries = entries.len()))]
pub fn resolve_animations(
    directory: &Directory,
    entries: &[BodyLookup],
) -> Result<Vec<AnimationRecord>> {
    let body = directory.get(BODY).ok_or(Error::MissingBodyBlock)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = animation_block_name(index);
            let payload = directory
                .get(&name)
                .ok_or_else(|| Error::MissingAnimationBlock(name.clone()))?;

            let start = entry.offset as usize;
            let header = start
                .checked_add(ANIMATION_HEADER_SIZE)
                .and_then(|end| body.get(start..end))
                .and_then(|header| <[u8; ANIMATION_HEADER_SIZE]>::try_from(header).ok())
                .ok_or(Error::AnimationHeaderOutOfBounds {
                    index,
                    offset: entry.offset,
                })?;

            debug!(block = %name, payload = payload.len(), "resolved animation");

            Ok(AnimationRecord {
                header,
                payload: payload.to_vec(),
            })
        })
        .collect()
}

/// Animation pack: Body lookup table and the animations it describes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationPack {
    /// Body lookup entries in index order
    pub body: Vec<BodyLookup>,

    /// Animations in index order
    pub animations: Vec<AnimationRecord>,
}

impl Resolve for AnimationPack {
    const TRIGGER: &'static str = BODY;

    fn resolve(directory: &Directory) -> Result<Self> {
        let body = resolve_body(directory)?;
        let animations = resolve_animations(directory, &body)?;

        Ok(Self { body, animations })
    }
}
