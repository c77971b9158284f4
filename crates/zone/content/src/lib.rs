//! Data-driven zone content and loaders.
//!
//! This crate houses the bundled content data and loaders for RON/TOML files:
//! - Content definitions per kind (RON)
//! - Spawn tables by template and by biome/era/difficulty (RON)
//! - Loot tables (RON)
//! - Zone definitions: static layouts and generator recipes (RON)
//! - The starting world map (RON)
//! - Generation configuration (TOML)
//!
//! Content is read-only input to generation and never appears in save data.
//! [`validate_content`] cross-checks the pieces so data drift is caught by
//! tooling rather than discovered as silently empty zones.

pub mod validation;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use validation::{ContentIssue, ValidationReport, validate_content};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, DefinitionsLoader, LoadResult, LootTableLoader,
    SlotTemplate, SpawnTableLoader, WorldSlotLoader, ZoneDefinitionLoader,
};
