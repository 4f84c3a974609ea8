pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum SadCommands {
    /// List the samples of a sound bank
    List(list::ListArgs),
    /// Extract the wave data of every sample into a directory
    Extract(extract::ExtractArgs),
}

impl SadCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            SadCommands::List(list) => list.handle(),
            SadCommands::Extract(extract) => extract.handle(),
        }
    }
}

/// Open a sound bank, failing if the file carries no sample table
fn open_sound_bank(path: &std::path::Path) -> miette::Result<lh_pack::PackFile> {
    let pack = crate::commands::open_pack(path)?;
    if !pack.is_sound_bank() {
        return Err(miette::miette!(
            "{} has no LHAudioBankSampleTable block",
            path.display()
        ));
    }
    Ok(pack)
}
