use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::commands::open_pack;

#[derive(Args)]
pub struct BodyArgs {
    /// An input animation pack
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl BodyArgs {
    pub fn handle(&self) -> Result<()> {
        let pack = open_pack(&self.file)?;
        if !pack.is_animation_pack() {
            return Err(miette!("{} has no Body block", self.file.display()));
        }

        println!("{:>5} {:>10} {:>10} {:>10}", "index", "offset", "auxiliary", "size");
        for (index, (entry, animation)) in pack
            .body_lookup()
            .iter()
            .zip(pack.animations())
            .enumerate()
        {
            println!(
                "{:>5} {:>#10x} {:>10} {:>10}",
                index,
                entry.offset,
                entry.auxiliary,
                animation.merged_len(),
            );
        }

        Ok(())
    }
}
