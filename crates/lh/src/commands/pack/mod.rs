pub mod block;
pub mod body;
pub mod diff;
pub mod extract;
pub mod info;
pub mod list;
pub mod merge;

#[derive(clap::Subcommand)]
pub enum PackCommands {
    /// List the blocks of a pack
    List(list::ListArgs),
    /// Print the texture lookup table of a mesh pack
    Info(info::InfoArgs),
    /// Print the animation lookup table of an animation pack
    Body(body::BodyArgs),
    /// Show a single block, optionally writing it to a file
    Block(block::BlockArgs),
    /// Extract the meshes, textures and animations of a pack into a directory
    Extract(extract::ExtractArgs),
    /// Merge a directory into a pack of raw blocks
    Merge(merge::MergeArgs),
    /// Compare two packs
    Diff(diff::DiffArgs),
}

impl PackCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PackCommands::List(list) => list.handle(),
            PackCommands::Info(info) => info.handle(),
            PackCommands::Body(body) => body.handle(),
            PackCommands::Block(block) => block.handle(),
            PackCommands::Extract(extract) => extract.handle(),
            PackCommands::Merge(merge) => merge.handle(),
            PackCommands::Diff(diff) => diff.handle(),
        }
    }
}
