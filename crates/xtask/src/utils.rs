//! Utility functions for xtask commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use zone_content::{ContentBundle, ContentFactory};
use zone_core::WorldSlot;

/// Initialize stderr logging.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks warn, debug or trace.
pub fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Content factory for `--data-dir`, else `$ZONE_DATA_DIR`, else bundled data.
pub fn content_factory(data_dir: Option<PathBuf>) -> ContentFactory {
    match data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::from_env(),
    }
}

pub fn load_bundle(factory: &ContentFactory) -> Result<ContentBundle> {
    factory.load_all().with_context(|| {
        format!(
            "Failed to load content from {}",
            factory.data_dir().display()
        )
    })
}

/// World slot selection shared by the generation commands.
#[derive(clap::Args, Debug)]
pub struct SlotArgs {
    /// Zone id (e.g. tutorial_zone, tutorial_zone_north)
    #[arg(short, long, value_name = "ZONE")]
    pub zone: String,

    /// World seed
    #[arg(short, long, value_name = "SEED", default_value = "1234")]
    pub seed: String,

    /// Template id; overrides the world map entry
    #[arg(long)]
    pub template: Option<String>,

    /// Biome; with --era and --difficulty overrides the world map entry
    #[arg(long)]
    pub biome: Option<String>,

    #[arg(long)]
    pub era: Option<String>,

    #[arg(long)]
    pub difficulty: Option<i32>,

    /// Content data directory (defaults to $ZONE_DATA_DIR or bundled data)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl SlotArgs {
    /// Builds the world slot: flags first, then the world map, then a bare
    /// slot with only zone id and seed.
    pub fn world_slot(&self, factory: &ContentFactory) -> WorldSlot {
        let overridden = self.template.is_some()
            || self.biome.is_some()
            || self.era.is_some()
            || self.difficulty.is_some();
        if !overridden
            && let Ok(world) = factory.load_world(&self.seed)
            && let Some(slot) = world.get(&self.zone)
        {
            return slot.clone();
        }

        let mut slot = WorldSlot::new(self.zone.as_str(), self.seed.as_str());
        slot.template_id = self.template.clone();
        slot.biome = self.biome.clone();
        slot.era = self.era.clone();
        slot.difficulty_rating = self.difficulty;
        slot
    }
}
