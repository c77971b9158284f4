//! Zone state: the transient [`Zone`] projection and the durable records
//! (world slots and zone deltas) it is rebuilt from.
//!
//! Only [`WorldSlotTable`] and [`ZoneDeltaStore`] are ever persisted. A zone is
//! a cache; losing it costs a regeneration, never player progress.
pub mod common;
pub mod delta;
pub mod slot;
pub mod zone;

pub use common::Position;
pub use delta::{Interaction, NormalizationReport, ZoneDelta, ZoneDeltaStore, apply_zone_deltas};
#[cfg(feature = "serde")]
pub use delta::{DeltaError, migrate_zone_delta, normalize_all_zone_deltas};
pub use slot::{FogState, WorldSlot, WorldSlotTable};
pub use zone::{
    ContentInstance, ContentKind, ExplorationStats, Tile, TileContent, TileKind, Zone,
    ZoneContent,
};
