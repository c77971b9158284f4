//! Cross-reference validation of content data.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils::{content_factory, load_bundle};

/// Cross-check content definitions, spawn tables and layouts
#[derive(Parser)]
pub struct ValidateContent {
    /// Content data directory (defaults to $ZONE_DATA_DIR or bundled data)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ValidateContent {
    pub fn execute(self) -> Result<()> {
        let factory = content_factory(self.data_dir);
        let bundle = load_bundle(&factory)?;
        let report = bundle.validate();

        println!(
            "{} {}",
            style("Data:").bold().cyan(),
            factory.data_dir().display()
        );
        println!(
            "  {} definitions, {} spawn tables, {} loot tables, {} zone definitions",
            bundle.definitions.len(),
            bundle.spawn_tables.iter().count(),
            bundle.loot_tables.len(),
            bundle.zones.len()
        );

        if report.is_ok() {
            println!("{}", style("✓ No issues found").green().bold());
            return Ok(());
        }
        for issue in &report.issues {
            println!("{} {}", style("✗").red().bold(), issue);
        }
        anyhow::bail!("{} content issue(s) found", report.len())
    }
}
