//! Content factory for building generation inputs from data files.

use std::path::{Path, PathBuf};

use zone_core::{
    DefinitionRegistry, GenerationConfig, GenerationContext, LootTables, OracleError,
    PcgRngFactory, SpawnTables, WorldSlotTable, ZoneDefinitionRegistry,
};

use crate::loaders::{
    ConfigLoader, DefinitionsLoader, LoadResult, LootTableLoader, SpawnTableLoader,
    WorldSlotLoader, ZoneDefinitionLoader,
};
use crate::validation::{ValidationReport, validate_content};

/// Content factory that loads all zone content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── definitions.ron
/// ├── spawn_tables.ron
/// ├── loot_tables.ron
/// ├── zones.ron
/// └── world.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Environment variable overriding the data directory.
    pub const DATA_DIR_ENV: &'static str = "ZONE_DATA_DIR";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// `$ZONE_DATA_DIR` when set, otherwise the bundled data.
    pub fn from_env() -> Self {
        match std::env::var_os(Self::DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::bundled(),
        }
    }

    /// Load generation configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GenerationConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load content definitions from `definitions.ron`.
    pub fn load_definitions(&self) -> LoadResult<DefinitionRegistry> {
        DefinitionsLoader::load(&self.data_dir.join("definitions.ron"))
    }

    /// Load spawn tables from `spawn_tables.ron`.
    pub fn load_spawn_tables(&self) -> LoadResult<SpawnTables> {
        SpawnTableLoader::load(&self.data_dir.join("spawn_tables.ron"))
    }

    /// Load loot tables from `loot_tables.ron`.
    pub fn load_loot_tables(&self) -> LoadResult<LootTables> {
        LootTableLoader::load(&self.data_dir.join("loot_tables.ron"))
    }

    /// Load zone definitions from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<ZoneDefinitionRegistry> {
        ZoneDefinitionLoader::load(&self.data_dir.join("zones.ron"))
    }

    /// Load the starting world map from `world.ron`, seeded with `world_seed`.
    pub fn load_world(&self, world_seed: &str) -> LoadResult<WorldSlotTable> {
        WorldSlotLoader::load(&self.data_dir.join("world.ron"), world_seed)
    }

    /// Load everything generation needs.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            definitions: self.load_definitions()?,
            spawn_tables: self.load_spawn_tables()?,
            loot_tables: self.load_loot_tables()?,
            zones: self.load_zones()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// All read-only generation inputs, loaded together.
#[derive(Clone, Debug, Default)]
pub struct ContentBundle {
    pub config: GenerationConfig,
    pub definitions: DefinitionRegistry,
    pub spawn_tables: SpawnTables,
    pub loot_tables: LootTables,
    pub zones: ZoneDefinitionRegistry,
}

impl ContentBundle {
    /// Builds a generation context backed by the PCG stream.
    pub fn generation_context(&self) -> Result<GenerationContext, OracleError> {
        GenerationContext::builder()
            .definitions(self.definitions.clone())
            .spawn_tables(self.spawn_tables.clone())
            .rng_factory(PcgRngFactory)
            .config(self.config.clone())
            .build()
    }

    pub fn validate(&self) -> ValidationReport {
        validate_content(
            &self.definitions,
            &self.spawn_tables,
            &self.loot_tables,
            &self.zones,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert!(ContentFactory::bundled().data_dir().ends_with("data"));
    }
}
