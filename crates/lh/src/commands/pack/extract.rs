use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::{create_output, open_pack};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input pack file
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
        let pack = open_pack(&self.file)?;

        for (index, mesh) in pack.meshes().enumerate() {
            let p = self.directory.join(format!("mesh_{index}.l3d"));
            info!("writing {}", p.display());

            create_output(&p, self.overwrite)?
                .write_all(mesh)
                .into_diagnostic()
                .context(format!("writing {}", p.display()))?;
        }

        for (id, texture) in pack.textures() {
            let p = self.directory.join(format!("{id:x}.dds"));
            info!("writing {}", p.display());

            texture
                .write_dds(create_output(&p, self.overwrite)?)
                .context(format!("writing {}", p.display()))?;
        }

        for (index, animation) in pack.animations().iter().enumerate() {
            let p = self.directory.join(format!("anim_{index}.anm"));
            info!("writing {}", p.display());

            create_output(&p, self.overwrite)?
                .write_all(&animation.to_bytes())
                .into_diagnostic()
                .context(format!("writing {}", p.display()))?;
        }

        Ok(())
    }
}
