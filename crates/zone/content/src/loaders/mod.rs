//! Content loaders for reading zone data from files.
//!
//! Each loader reads one file and returns the zone-core type it describes.
//! [`ContentFactory`] knows the directory layout and loads them together.

pub mod config;
pub mod definitions;
pub mod factory;
pub mod loot_tables;
pub mod spawn_tables;
pub mod world;
pub mod zones;

pub use config::ConfigLoader;
pub use definitions::DefinitionsLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use loot_tables::LootTableLoader;
pub use spawn_tables::SpawnTableLoader;
pub use world::{SlotTemplate, WorldSlotLoader};
pub use zones::ZoneDefinitionLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
