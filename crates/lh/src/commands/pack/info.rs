use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::commands::open_pack;

#[derive(Args)]
pub struct InfoArgs {
    /// An input mesh pack
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let pack = open_pack(&self.file)?;
        if !pack.is_mesh_pack() {
            return Err(miette!("{} has no INFO block", self.file.display()));
        }

        println!("{:>5} {:>10} {:>10} {:>6} {:>9}", "index", "id", "auxiliary", "format", "size");
        for (index, entry) in pack.info_lookup().iter().enumerate() {
            let texture = pack.texture(entry.block_id)?;
            println!(
                "{:>5} {:>#10x} {:>10} {:>6} {:>4}x{:<4}",
                index,
                entry.block_id,
                entry.auxiliary,
                texture.four_cc(),
                texture.dds_header.width,
                texture.dds_header.height,
            );
        }

        Ok(())
    }
}
