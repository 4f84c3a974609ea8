use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::open_sound_bank;

#[derive(Args)]
pub struct ListArgs {
    /// An input sound bank
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let bank = open_sound_bank(&self.file)?;

        println!("file: {}", self.file.display().bold());
        if let Some(name) = bank.bank_name() {
            println!("bank: {}", name);
        }
        println!("samples: {}", bank.samples().len());
        println!();

        for (index, sample) in bank.samples().iter().enumerate() {
            let loop_type = match sample.loop_type() {
                Ok(loop_type) => format!("{loop_type:?}"),
                Err(raw) => format!("unknown ({raw})"),
            };
            println!(
                "{:>4} {:<40} id {:>5} {:>8} bytes {:>6} Hz loop {}",
                index,
                sample.file_name(),
                sample.id,
                sample.size,
                sample.sample_rate,
                loop_type,
            );

            let description = sample.description();
            if !description.is_empty() {
                println!("     {}", description.dimmed());
            }
        }

        Ok(())
    }
}
