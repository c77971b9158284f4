//! Generation configuration loader.

use std::path::Path;

use zone_core::GenerationConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for generation configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GenerationConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GenerationConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GenerationConfig> {
        let config: GenerationConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_instance_count == 0 {
            anyhow::bail!("max_instance_count must be positive");
        }
        Ok(config)
    }
}
