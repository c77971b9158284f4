//! Print a zone's generated terrain.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use zone_core::materialize_zone;

use crate::utils::{SlotArgs, content_factory, load_bundle};

/// Print the generated terrain of a zone
#[derive(Parser)]
pub struct Layout {
    #[command(flatten)]
    slot: SlotArgs,
}

impl Layout {
    pub fn execute(self) -> Result<()> {
        let factory = content_factory(self.slot.data_dir.clone());
        let bundle = load_bundle(&factory)?;
        let ctx = bundle.generation_context()?;
        let slot = self.slot.world_slot(&factory);

        let definition = bundle.zones.resolve(&slot);
        let (zone, _) = materialize_zone(&ctx, &slot, definition)
            .with_context(|| format!("Failed to generate zone '{}'", slot.zone_id))?;

        println!(
            "{} {} ({}x{})",
            style("Zone:").bold().cyan(),
            zone.id,
            zone.width,
            zone.height
        );
        println!(
            "{} {}",
            style("Definition:").bold().cyan(),
            definition.map_or("default terrain", |def| def.id.as_str())
        );
        match zone.entry_spawn {
            Some(entry) => println!("{} {}", style("Entry:").bold().cyan(), entry),
            None => println!("{} {}", style("Entry:").bold().cyan(), style("none").dim()),
        }
        println!(
            "{} {}",
            style("Walkable:").bold().cyan(),
            zone.walkable_count()
        );
        println!();
        for row in zone.render_layout() {
            println!("{row}");
        }
        Ok(())
    }
}
