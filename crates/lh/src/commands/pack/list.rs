use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::commands::open_pack;

#[derive(Args)]
pub struct ListArgs {
    /// An input pack file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let pack = open_pack(&self.file)?;

        println!("file: {}", self.file.display().bold());
        println!("blocks: {}", pack.directory().len());
        if pack.is_mesh_pack() {
            println!("textures: {}", pack.texture_count());
            println!("meshes: {}", pack.mesh_count());
        }
        if pack.is_animation_pack() {
            println!("animations: {}", pack.animations().len());
        }
        if pack.is_sound_bank() {
            println!("samples: {}", pack.samples().len());
        }

        println!();
        println!("{:<32} {:>10}", "name".underline(), "size".underline());
        for (name, data) in pack.directory().iter() {
            println!("{:<32} {:>10}", name, data.len());
        }

        Ok(())
    }
}
