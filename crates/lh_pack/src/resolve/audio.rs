//! Sample table and wave data of a sound bank.

use binrw::BinRead;
use std::{io::Cursor, ops::Range};
use tracing::{debug, instrument, trace, warn};

use crate::{
    directory::Directory,
    error::{Error, Result},
    names::{AUDIO_BANK_SAMPLE_TABLE, AUDIO_WAVE_DATA, FILE_SEGMENT_BANK_INFO},
    types::{
        AudioBankSample, AudioBankSampleTableHeader, FileSegmentBankInfo, AUDIO_SAMPLE_SIZE,
        AUDIO_SAMPLE_TABLE_HEADER_SIZE,
    },
};

use super::{parse_block, Resolve};

/// Read every sample record from the LHAudioBankSampleTable block.
///
/// The block must hold exactly as many records as its header announces.
#[instrument(skip_all, err)]
pub fn resolve_audio_bank(directory: &Directory) -> Result<Vec<AudioBankSample>> {
    let data = directory
        .get(AUDIO_BANK_SAMPLE_TABLE)
        .ok_or(Error::MissingAudioBankSampleTableBlock)?;
    if data.len() < AUDIO_SAMPLE_TABLE_HEADER_SIZE {
        return Err(Error::FileTooSmall);
    }

    let mut reader = Cursor::new(data);
    let header = AudioBankSampleTableHeader::read(&mut reader)?;
    if header.count == 0 {
        return Err(Error::NoEntries);
    }

    let count = usize::from(header.count);
    if data.len() != AUDIO_SAMPLE_TABLE_HEADER_SIZE + count * AUDIO_SAMPLE_SIZE {
        return Err(Error::FileTooSmall);
    }

    let samples = (0..count)
        .map(|_| AudioBankSample::read(&mut reader))
        .collect::<binrw::BinResult<Vec<_>>>()
        .map_err(|source| Error::MalformedBlock {
            name: AUDIO_BANK_SAMPLE_TABLE.to_owned(),
            source,
        })?;

    debug!(samples = samples.len(), "resolved LHAudioBankSampleTable block");

    Ok(samples)
}

/// Locate the wave data of every sample within the LHAudioWaveData block
#[instrument(skip_all, err, fields(samples = samples.len()))]
pub fn resolve_audio_wave(
    directory: &Directory,
    samples: &[AudioBankSample],
) -> Result<Vec<Range<usize>>> {
    let data = directory
        .get(AUDIO_WAVE_DATA)
        .ok_or(Error::MissingAudioWaveDataBlock)?;
    let length = data.len() as u64;

    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let start = u64::from(sample.relative_offset);
            let end = start + u64::from(sample.size);
            if start > length || end > length {
                return Err(Error::FileTooSmall);
            }

            if sample.size == 0 {
                warn!(index, name = %sample.name(), "sample has no wave data");
            }
            trace!(index, start, end, "resolved sample");

            Ok(start as usize..end as usize)
        })
        .collect()
}

/// Name of the bank from the optional LHFileSegmentBankInfo block
#[instrument(skip_all, err)]
pub fn resolve_bank_name(directory: &Directory) -> Result<Option<String>> {
    directory
        .get(FILE_SEGMENT_BANK_INFO)
        .map(|data| parse_block::<FileSegmentBankInfo>(FILE_SEGMENT_BANK_INFO, data))
        .transpose()
        .map(|info| info.map(|info| info.name()))
}

/// Sound bank: sample records and where their wave data lives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundBank {
    /// Name of the bank, if the bank carries one
    pub name: Option<String>,

    /// Sample records in table order
    pub samples: Vec<AudioBankSample>,

    /// Byte range of each sample within the LHAudioWaveData block
    pub data: Vec<Range<usize>>,
}

impl Resolve for SoundBank {
    const TRIGGER: &'static str = AUDIO_BANK_SAMPLE_TABLE;

    fn resolve(directory: &Directory) -> Result<Self> {
        let name = resolve_bank_name(directory)?;
        let samples = resolve_audio_bank(directory)?;
        let data = resolve_audio_wave(directory, &samples)?;

        Ok(Self {
            name,
            samples,
            data,
        })
    }
}
