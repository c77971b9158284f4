use crate::generation::CellularAutomataConfig;

/// Tunable parameters for zone generation.
///
/// Seed labels are part of the determinism contract: changing one re-rolls
/// every zone generated with it, so bump the label (e.g. `content_v2`)
/// instead of editing tables in place when a breaking change is intended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    /// Suffix of the zone-level content seed (`worldSeed::zoneId::<label>`).
    pub content_seed_label: String,
    /// Suffix of the zone-level terrain seed (`worldSeed::zoneId::<label>`).
    pub terrain_seed_label: String,
    /// Upper clamp for any configured instance count.
    pub max_instance_count: u32,
    /// Walkable tile baseline used when an entry set scales by zone size
    /// but does not name its own `base_tiles`.
    pub default_base_tiles: u32,
    /// Terrain used when a world slot has no zone definition.
    pub default_terrain: CellularAutomataConfig,
}

impl GenerationConfig {
    pub const DEFAULT_CONTENT_SEED_LABEL: &'static str = "content_v1";
    pub const DEFAULT_TERRAIN_SEED_LABEL: &'static str = "terrain_v1";
    pub const DEFAULT_MAX_INSTANCE_COUNT: u32 = 9999;
    pub const DEFAULT_BASE_TILES: u32 = 100;

    pub fn new() -> Self {
        Self {
            content_seed_label: Self::DEFAULT_CONTENT_SEED_LABEL.to_string(),
            terrain_seed_label: Self::DEFAULT_TERRAIN_SEED_LABEL.to_string(),
            max_instance_count: Self::DEFAULT_MAX_INSTANCE_COUNT,
            default_base_tiles: Self::DEFAULT_BASE_TILES,
            default_terrain: CellularAutomataConfig::default(),
        }
    }

    /// Zone-level content seed: `worldSeed::zoneId::content_v1`.
    pub fn content_seed(&self, world_seed: &str, zone_id: &str) -> String {
        format!("{world_seed}::{zone_id}::{}", self.content_seed_label)
    }

    /// Zone-level terrain seed: `worldSeed::zoneId::terrain_v1`.
    pub fn terrain_seed(&self, world_seed: &str, zone_id: &str) -> String {
        format!("{world_seed}::{zone_id}::{}", self.terrain_seed_label)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}
