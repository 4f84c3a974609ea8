use clap::Args;
use lh_pack::PackBuilder;
use miette::miette;
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;
use walkdir::WalkDir;

use crate::commands::create_output;

#[derive(Args)]
pub struct MergeArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target pack file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl MergeArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let files = WalkDir::new(&self.directory)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let mut pack = PackBuilder::new();
        for file in files {
            let name = file
                .file_name()
                .to_str()
                .ok_or(miette!(
                    "unable to convert {} to a string",
                    file.path().display()
                ))?
                .to_owned();
            info!("merging {}", name);

            let data = std::fs::read(file.path())
                .into_diagnostic()
                .context(format!("reading {}", file.path().display()))?;

            pack.create_raw_block(name, data)
                .context(format!("adding block for {}", file.path().display()))?;
        }

        pack.finish()
            .write(create_output(&self.file, self.overwrite)?)
            .context("finalizing pack file")?;

        Ok(())
    }
}
