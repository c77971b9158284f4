//! Collaborators injected into generation.
//!
//! Definitions, spawn tables and the RNG factory are read-only inputs. The
//! [`GenerationContext`] bundles them so generation code never reaches for
//! ambient globals, and so a missing collaborator is caught once, when the
//! context is built, instead of at every call site.
mod definitions;
mod error;
mod rng;
mod spawn;

use std::sync::Arc;

pub use definitions::{
    ContentDefinition, DefinitionRegistry, DefinitionsOracle, LootEntry, LootTable, LootTables,
};
pub use error::OracleError;
pub use rng::{PcgRngFactory, PcgStream, RngFactory, RngStream, sub_seed};
pub use spawn::{
    DifficultyBucket, EntrySet, PlacementConstraints, ResolvedTable, SpawnTable,
    SpawnTableResolver, SpawnTables, TableSource, WallBounds, WeightedEntry,
};

use crate::config::GenerationConfig;

/// Everything zone generation reads, bundled for injection.
#[derive(Clone)]
pub struct GenerationContext {
    definitions: Arc<dyn DefinitionsOracle>,
    spawn_tables: Arc<SpawnTables>,
    rng: Arc<dyn RngFactory>,
    config: GenerationConfig,
}

impl GenerationContext {
    pub fn builder() -> GenerationContextBuilder {
        GenerationContextBuilder::default()
    }

    pub fn definitions(&self) -> &dyn DefinitionsOracle {
        self.definitions.as_ref()
    }

    pub fn spawn_tables(&self) -> &SpawnTables {
        &self.spawn_tables
    }

    pub fn resolver(&self) -> SpawnTableResolver<'_> {
        SpawnTableResolver::new(&self.spawn_tables)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds a seeded stream from the injected factory.
    pub fn make_rng(&self, seed: &str) -> Box<dyn RngStream> {
        self.rng.make_rng(seed)
    }
}

impl std::fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("spawn_tables", &self.spawn_tables)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`GenerationContext`].
///
/// The config defaults to [`GenerationConfig::default`]; every other
/// collaborator is required.
#[derive(Default)]
pub struct GenerationContextBuilder {
    definitions: Option<Arc<dyn DefinitionsOracle>>,
    spawn_tables: Option<Arc<SpawnTables>>,
    rng: Option<Arc<dyn RngFactory>>,
    config: Option<GenerationConfig>,
}

impl GenerationContextBuilder {
    pub fn definitions(mut self, definitions: impl DefinitionsOracle + 'static) -> Self {
        self.definitions = Some(Arc::new(definitions));
        self
    }

    /// Shares an already wrapped definitions oracle.
    pub fn shared_definitions(mut self, definitions: Arc<dyn DefinitionsOracle>) -> Self {
        self.definitions = Some(definitions);
        self
    }

    pub fn spawn_tables(mut self, spawn_tables: SpawnTables) -> Self {
        self.spawn_tables = Some(Arc::new(spawn_tables));
        self
    }

    pub fn rng_factory(mut self, rng: impl RngFactory + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// # Errors
    ///
    /// Returns the [`OracleError`] naming the first missing collaborator.
    pub fn build(self) -> Result<GenerationContext, OracleError> {
        Ok(GenerationContext {
            definitions: self
                .definitions
                .ok_or(OracleError::DefinitionsNotAvailable)?,
            spawn_tables: self
                .spawn_tables
                .ok_or(OracleError::SpawnTablesNotAvailable)?,
            rng: self.rng.ok_or(OracleError::RngNotAvailable)?,
            config: self.config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorSeverity};

    #[test]
    fn missing_rng_is_a_construction_error() {
        let err = GenerationContext::builder()
            .definitions(DefinitionRegistry::new())
            .spawn_tables(SpawnTables::new())
            .build()
            .unwrap_err();
        assert_eq!(err, OracleError::RngNotAvailable);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "ORACLE_RNG_NOT_AVAILABLE");
    }

    #[test]
    fn missing_definitions_reported_first() {
        let err = GenerationContext::builder().build().unwrap_err();
        assert_eq!(err, OracleError::DefinitionsNotAvailable);
    }

    #[test]
    fn complete_context_builds_with_default_config() {
        let ctx = GenerationContext::builder()
            .definitions(DefinitionRegistry::new())
            .spawn_tables(SpawnTables::new())
            .rng_factory(PcgRngFactory)
            .build()
            .unwrap();
        assert_eq!(ctx.config(), &GenerationConfig::default());
        let mut a = ctx.make_rng("seed");
        let mut b = PcgStream::from_seed("seed");
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
