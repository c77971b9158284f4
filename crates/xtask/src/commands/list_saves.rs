//! List save slots in the save directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use zone_runtime::{FileSaveRepository, SaveRepository};

use crate::dirs;

/// List save slots
#[derive(Parser)]
pub struct ListSaves {
    /// Custom save directory (defaults to $SAVE_DATA_DIR or platform location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl ListSaves {
    pub fn execute(self) -> Result<()> {
        let dir = self.dir.unwrap_or_else(dirs::save_dir);
        if !dir.exists() {
            println!(
                "{}",
                style(format!("No save directory at {}", dir.display())).dim()
            );
            return Ok(());
        }

        let repo = FileSaveRepository::new(&dir)?;
        let slots = repo.list_slots().context("Failed to list save slots")?;
        println!("{} {}", style("Saves:").bold().cyan(), dir.display());
        for slot in slots {
            match repo.load(&slot) {
                Ok(Some(save)) => println!(
                    "  {:<20} {} slots, {} zone deltas",
                    slot,
                    save.world_slots.len(),
                    save.zone_deltas.len()
                ),
                Ok(None) => {}
                Err(err) => println!("  {:<20} {}", slot, style(err).red()),
            }
        }
        Ok(())
    }
}
