//! Persisted save root.
//!
//! Only world slots and zone deltas are saved. Zones, spawn tables and
//! definitions are derived or static and are rebuilt on demand.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use zone_core::{NormalizationReport, WorldSlotTable, ZoneDeltaStore};

use crate::repository::RepositoryError;

/// Access to the mutable persisted state a session works against.
pub trait PersistedState {
    fn world_slots(&self) -> &WorldSlotTable;

    fn world_slots_mut(&mut self) -> &mut WorldSlotTable;

    fn zone_deltas(&self) -> &ZoneDeltaStore;

    fn zone_deltas_mut(&mut self) -> &mut ZoneDeltaStore;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub world_slots: WorldSlotTable,
    #[serde(default)]
    pub zone_deltas: ZoneDeltaStore,
}

impl SaveData {
    pub const CURRENT_VERSION: u32 = 1;

    const ZONE_DELTAS_KEY: &'static str = "zoneDeltas";

    pub fn new(world_slots: WorldSlotTable) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            world_slots,
            zone_deltas: ZoneDeltaStore::new(),
        }
    }

    /// Decodes a save, repairing its zone deltas before typed decoding.
    ///
    /// A missing or `null` `zoneDeltas` decodes as an empty store.
    pub fn from_json(json: &str) -> Result<(Self, NormalizationReport), RepositoryError> {
        let mut root: Value = serde_json::from_str(json)?;
        let Some(object) = root.as_object_mut() else {
            return Err(RepositoryError::NotAnObject);
        };
        let deltas = object.remove(Self::ZONE_DELTAS_KEY).unwrap_or(Value::Null);
        let (zone_deltas, report) = ZoneDeltaStore::from_json_value(deltas)?;

        let mut save: SaveData = serde_json::from_value(root)?;
        save.zone_deltas = zone_deltas;
        if save.version < Self::CURRENT_VERSION {
            save.version = Self::CURRENT_VERSION;
        }
        if !report.is_clean() {
            warn!(
                records = report.records,
                repaired = ?report.repaired,
                "normalized zone deltas on load"
            );
        }
        Ok((save, report))
    }

    pub fn to_json(&self) -> Result<String, RepositoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self::new(WorldSlotTable::new())
    }
}

impl PersistedState for SaveData {
    fn world_slots(&self) -> &WorldSlotTable {
        &self.world_slots
    }

    fn world_slots_mut(&mut self) -> &mut WorldSlotTable {
        &mut self.world_slots
    }

    fn zone_deltas(&self) -> &ZoneDeltaStore {
        &self.zone_deltas
    }

    fn zone_deltas_mut(&mut self) -> &mut ZoneDeltaStore {
        &mut self.zone_deltas
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zone_core::{WorldSlot, ZoneDelta};

    use super::*;

    #[test]
    fn missing_deltas_decode_as_empty_store() {
        let json = json!({
            "version": 1,
            "worldSlots": {
                "tutorial_zone": { "zoneId": "tutorial_zone", "seed": "1234" }
            }
        })
        .to_string();

        let (save, report) = SaveData::from_json(&json).unwrap();
        assert!(report.is_clean());
        assert!(save.zone_deltas.is_empty());
        assert!(save.world_slots.contains("tutorial_zone"));
    }

    #[test]
    fn legacy_deltas_are_migrated_on_load() {
        let json = json!({
            "zoneDeltas": {
                "tutorial_zone": {
                    "version": 1,
                    "harvested": { "resourceNodes_oak_tree_3_4": true, "bogus": "yes" }
                }
            }
        })
        .to_string();

        let (mut save, report) = SaveData::from_json(&json).unwrap();
        assert_eq!(report.repaired, vec!["tutorial_zone".to_string()]);
        assert_eq!(save.version, SaveData::CURRENT_VERSION);
        let delta = save.zone_deltas.get_zone_delta("tutorial_zone");
        assert_eq!(delta.version, ZoneDelta::CURRENT_VERSION);
        assert_eq!(delta.harvested.len(), 1);
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(
            SaveData::from_json("[1, 2, 3]"),
            Err(RepositoryError::NotAnObject)
        ));
    }

    #[test]
    fn encoded_save_uses_camel_case_keys() {
        let mut slots = WorldSlotTable::new();
        slots.insert(WorldSlot::new("tutorial_zone", "1234"));
        let mut save = SaveData::new(slots);
        save.zone_deltas.mark_harvested("tutorial_zone", "resourceNodes_oak_tree_3_4");

        let value: Value = serde_json::from_str(&save.to_json().unwrap()).unwrap();
        assert!(value.get("worldSlots").is_some());
        assert!(value["zoneDeltas"]["tutorial_zone"]["discoveredLocations"].is_object());

        let (decoded, report) = SaveData::from_json(&save.to_json().unwrap()).unwrap();
        assert!(report.is_clean());
        assert_eq!(decoded, save);
    }
}
