use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::Path};

pub mod pack;
pub mod sad;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle mesh and animation packs
    Pack {
        #[command(subcommand)]
        command: pack::PackCommands,
    },
    /// Handle sound banks
    Sad {
        #[command(subcommand)]
        command: sad::SadCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Commands::Pack { command } => command.handle(),
            Commands::Sad { command } => command.handle(),
        }
    }
}

/// Open a pack with every resolver enabled
pub fn open_pack(path: &Path) -> Result<lh_pack::PackFile> {
    let file = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    lh_pack::PackFile::open(file, Default::default())
        .context(format!("reading {}", path.display()))
}

/// Create an output file, refusing to replace an existing one unless asked to
pub fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .context(format!("creating {}", parent.display()))?;
    }

    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}
