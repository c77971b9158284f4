//! Generate a zone and report its content.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use zone_core::{ContentKind, PopulationSummary, Zone, materialize_zone};

use crate::utils::{SlotArgs, content_factory, load_bundle};

/// Generate a zone and report the placed content
#[derive(Parser)]
pub struct Populate {
    #[command(flatten)]
    slot: SlotArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Table, counts and instance list
    Summary,
    /// Full zone content as JSON
    Json,
}

impl Populate {
    pub fn execute(self) -> Result<()> {
        let factory = content_factory(self.slot.data_dir.clone());
        let bundle = load_bundle(&factory)?;
        let ctx = bundle.generation_context()?;
        let slot = self.slot.world_slot(&factory);

        let (zone, summary) = materialize_zone(&ctx, &slot, bundle.zones.resolve(&slot))
            .with_context(|| format!("Failed to generate zone '{}'", slot.zone_id))?;

        match self.format {
            OutputFormat::Summary => print_summary(&zone, summary.as_ref()),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&zone.content)?);
            }
        }
        Ok(())
    }
}

fn print_summary(zone: &Zone, summary: Option<&PopulationSummary>) {
    println!("{}", style(format!("=== {} ===", zone.id)).bold().green());

    let Some(summary) = summary else {
        println!("{}", style("No spawn table resolved; zone is empty").yellow());
        return;
    };
    println!(
        "{} {} ({})",
        style("Table:").bold().cyan(),
        summary.table_id,
        summary.source
    );
    println!();

    for kind in ContentKind::in_order() {
        println!(
            "{} {}",
            style(format!("{kind}:")).bold().yellow(),
            summary.placed(kind)
        );
        for instance in zone.content.of(kind) {
            println!("  {:<40} {}", instance.id, instance.position());
        }
    }
    println!();
    println!("{} {}", style("Total:").bold().cyan(), summary.total());
}
