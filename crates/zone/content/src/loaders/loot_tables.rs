//! Loot table loader.

use std::path::Path;

use zone_core::LootTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for loot tables from RON files.
pub struct LootTableLoader;

impl LootTableLoader {
    /// Load a map of loot table id to table.
    pub fn load(path: &Path) -> LoadResult<LootTables> {
        let content = read_file(path)?;
        let tables: LootTables = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot tables RON: {}", e))?;
        Ok(tables)
    }
}
