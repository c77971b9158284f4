//! Content definition loader.

use std::path::Path;

use zone_core::DefinitionRegistry;

use crate::loaders::{LoadResult, read_file};

/// Loader for content definitions from RON files.
///
/// The file is a struct with one map per kind:
/// `(resourceNodes: {..}, entities: {..}, pois: {..}, locations: {..})`.
pub struct DefinitionsLoader;

impl DefinitionsLoader {
    pub fn load(path: &Path) -> LoadResult<DefinitionRegistry> {
        let content = read_file(path)?;
        let registry: DefinitionRegistry = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse definitions RON: {}", e))?;

        Ok(registry)
    }
}
