use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::{info, warn};

use super::open_sound_bank;
use crate::commands::create_output;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input sound bank
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let bank = open_sound_bank(&self.file)?;

        for index in 0..bank.samples().len() {
            let (sample, data) = bank.sample(index)?;

            let mut name = sample.file_name();
            if name.is_empty() {
                warn!(index, "sample has no name");
                name = format!("sample_{index}.wav");
            }

            let p = self.directory.join(format!("{index:04}_{name}"));
            info!("writing {}", p.display());

            create_output(&p, self.overwrite)?
                .write_all(data)
                .into_diagnostic()
                .context(format!("writing {}", p.display()))?;
        }

        Ok(())
    }
}
