//! Starting world map loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zone_core::{FogState, WorldSlot, WorldSlotTable};

use crate::loaders::{LoadResult, read_file};

/// A world slot without its seed. The seed belongs to the save, not the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTemplate {
    pub zone_id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub biome: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub difficulty_rating: Option<i32>,
    #[serde(default)]
    pub fog: FogState,
}

impl SlotTemplate {
    pub fn instantiate(&self, world_seed: &str) -> WorldSlot {
        let mut slot = WorldSlot::new(self.zone_id.as_str(), world_seed);
        slot.template_id = self.template_id.clone();
        slot.biome = self.biome.clone();
        slot.era = self.era.clone();
        slot.difficulty_rating = self.difficulty_rating;
        slot.fog = self.fog;
        slot
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldCatalog {
    slots: Vec<SlotTemplate>,
}

/// Loader for the starting world map.
pub struct WorldSlotLoader;

impl WorldSlotLoader {
    pub fn load_templates(path: &Path) -> LoadResult<Vec<SlotTemplate>> {
        let content = read_file(path)?;
        let catalog: WorldCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        Ok(catalog.slots)
    }

    /// Load the world map and stamp every slot with `world_seed`.
    pub fn load(path: &Path, world_seed: &str) -> LoadResult<WorldSlotTable> {
        let mut table = WorldSlotTable::new();
        for template in Self::load_templates(path)? {
            if table.insert(template.instantiate(world_seed)).is_some() {
                anyhow::bail!("Duplicate world slot '{}'", template.zone_id);
            }
        }
        Ok(table)
    }
}
