use clap::Args;
use itertools::Itertools;
use miette::{IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::{create_output, open_pack};

const PREVIEW_LEN: usize = 64;

#[derive(Args)]
pub struct BlockArgs {
    /// An input pack file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Name of the block
    #[arg(short, long)]
    name: String,

    /// Write the block contents to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl BlockArgs {
    pub fn handle(&self) -> Result<()> {
        let pack = open_pack(&self.file)?;
        let data = pack.block(&self.name)?;

        println!("name: {}", self.name);
        println!("size: {}", data.len());
        for line in &data.iter().take(PREVIEW_LEN).chunks(16) {
            println!("{}", line.map(|b| format!("{b:02x}")).join(" "));
        }

        if let Some(output) = &self.output {
            info!("writing {}", output.display());
            create_output(output, self.overwrite)?
                .write_all(data)
                .into_diagnostic()?;
        }

        Ok(())
    }
}
