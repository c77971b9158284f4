//! Deterministic zone generation and delta reconciliation.
//!
//! `zone-core` turns a world slot (seed + template/biome/era/difficulty) into
//! a playable zone: terrain from a cellular automaton, content placed from
//! declarative spawn tables, and player progress overlaid from a compact
//! per-zone delta. Every step is a pure function of its inputs, so a zone can
//! be discarded and regenerated at any time without losing observed state.
//!
//! Collaborators (definitions, spawn tables, RNG) are injected through
//! [`env::GenerationContext`]; nothing is looked up through globals.
pub mod config;
pub mod env;
pub mod error;
pub mod generation;
pub mod state;

pub use config::GenerationConfig;
pub use env::{
    ContentDefinition, DefinitionRegistry, DefinitionsOracle, DifficultyBucket, EntrySet,
    GenerationContext, GenerationContextBuilder, LootEntry, LootTable, LootTables, OracleError,
    PcgRngFactory, PcgStream, PlacementConstraints, ResolvedTable, RngFactory, RngStream,
    SpawnTable, SpawnTableResolver, SpawnTables, TableSource, WallBounds, WeightedEntry, sub_seed,
};
pub use error::{CoreError, ErrorSeverity};
pub use generation::{
    CellularAutomataConfig, ContentPopulator, LayoutError, LayoutSpec, PlacementEngine,
    PopulationSummary, Weighted, ZoneDefinition, ZoneDefinitionRegistry,
    generate_cellular_automata, generate_layout_from_definition, materialize_zone, pick_weighted,
    shuffle,
};
pub use state::{
    ContentInstance, ContentKind, ExplorationStats, FogState, Interaction, NormalizationReport,
    Position, Tile, TileContent, TileKind, WorldSlot, WorldSlotTable, Zone, ZoneContent, ZoneDelta,
    ZoneDeltaStore, apply_zone_deltas,
};

#[cfg(feature = "serde")]
pub use state::{DeltaError, migrate_zone_delta, normalize_all_zone_deltas};
