//! Spawn table loader.

use std::path::Path;

use zone_core::SpawnTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for spawn tables from RON files.
pub struct SpawnTableLoader;

impl SpawnTableLoader {
    /// Load template and context spawn tables.
    ///
    /// Entry-set contents are not checked here; see
    /// [`validate_content`](crate::validate_content).
    pub fn load(path: &Path) -> LoadResult<SpawnTables> {
        let content = read_file(path)?;
        let tables: SpawnTables = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn tables RON: {}", e))?;
        Ok(tables)
    }
}
