//! Zone definition loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zone_core::{ZoneDefinition, ZoneDefinitionRegistry};

use crate::loaders::{LoadResult, read_file};

/// Zone catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCatalog {
    pub zones: Vec<ZoneDefinition>,
}

/// Loader for zone definitions (static layouts and generator recipes).
pub struct ZoneDefinitionLoader;

impl ZoneDefinitionLoader {
    /// Load the zone catalog, keyed by definition id.
    ///
    /// Duplicate ids are an error since lookup is by id.
    pub fn load(path: &Path) -> LoadResult<ZoneDefinitionRegistry> {
        let content = read_file(path)?;
        let catalog: ZoneCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone catalog RON: {}", e))?;

        let mut registry = ZoneDefinitionRegistry::new();
        for definition in catalog.zones {
            let id = definition.id.clone();
            if registry.insert(definition).is_some() {
                anyhow::bail!("Duplicate zone definition '{}'", id);
            }
        }
        Ok(registry)
    }
}
