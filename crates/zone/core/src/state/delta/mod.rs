//! Per-zone records of player progress.
//!
//! A [`ZoneDelta`] stores only what the player changed (instance flags and
//! explored tiles), keyed by instance id and `"x,y"`. It is the sole durable
//! record of progress in a zone; the zone itself is regenerated and the delta
//! overlaid with [`apply_zone_deltas`].
//!
//! # Schema history
//!
//! | version | adds |
//! |---------|------|
//! | 1 | `harvested`, `defeated`, `opened`, `discoveredLocations` |
//! | 2 | `inspected` |
//! | 3 | `exploredTiles` |
//!
//! Older records are forward-migrated by [`migrate_zone_delta`].
#[cfg(feature = "serde")]
mod normalize;
mod reconcile;

use std::collections::BTreeMap;

use crate::state::{ContentKind, Position, Zone};

#[cfg(feature = "serde")]
pub use normalize::{DeltaError, migrate_zone_delta, normalize_all_zone_deltas};
pub use reconcile::apply_zone_deltas;

/// Player interactions recorded in a zone delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    Harvested,
    Defeated,
    Opened,
    Inspected,
    Discovered,
}

impl Interaction {
    pub const ALL: [Interaction; 5] = [
        Self::Harvested,
        Self::Defeated,
        Self::Opened,
        Self::Inspected,
        Self::Discovered,
    ];

    /// Flag written into `ContentInstance::state`.
    pub const fn state_key(self) -> &'static str {
        match self {
            Self::Harvested => "harvested",
            Self::Defeated => "defeated",
            Self::Opened => "opened",
            Self::Inspected => "inspected",
            Self::Discovered => "discovered",
        }
    }

    /// Content kinds whose instances carry this flag.
    pub const fn kinds(self) -> &'static [ContentKind] {
        match self {
            Self::Harvested => &[ContentKind::ResourceNodes],
            Self::Defeated => &[ContentKind::Entities],
            Self::Opened => &[ContentKind::Pois],
            Self::Inspected => &[
                ContentKind::ResourceNodes,
                ContentKind::Entities,
                ContentKind::Pois,
                ContentKind::Locations,
            ],
            Self::Discovered => &[ContentKind::Locations],
        }
    }

    pub fn applies_to(self, kind: ContentKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Instance and tile state changes for one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneDelta {
    pub version: u32,
    pub harvested: BTreeMap<String, bool>,
    pub defeated: BTreeMap<String, bool>,
    pub opened: BTreeMap<String, bool>,
    pub inspected: BTreeMap<String, bool>,
    pub discovered_locations: BTreeMap<String, bool>,
    pub explored_tiles: BTreeMap<String, bool>,
}

impl ZoneDelta {
    pub const CURRENT_VERSION: u32 = 3;

    /// Persisted map keys, in schema order.
    pub const MAP_KEYS: [&'static str; 6] = [
        "harvested",
        "defeated",
        "opened",
        "inspected",
        "discoveredLocations",
        "exploredTiles",
    ];

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            harvested: BTreeMap::new(),
            defeated: BTreeMap::new(),
            opened: BTreeMap::new(),
            inspected: BTreeMap::new(),
            discovered_locations: BTreeMap::new(),
            explored_tiles: BTreeMap::new(),
        }
    }

    pub fn map(&self, interaction: Interaction) -> &BTreeMap<String, bool> {
        match interaction {
            Interaction::Harvested => &self.harvested,
            Interaction::Defeated => &self.defeated,
            Interaction::Opened => &self.opened,
            Interaction::Inspected => &self.inspected,
            Interaction::Discovered => &self.discovered_locations,
        }
    }

    fn map_mut(&mut self, interaction: Interaction) -> &mut BTreeMap<String, bool> {
        match interaction {
            Interaction::Harvested => &mut self.harvested,
            Interaction::Defeated => &mut self.defeated,
            Interaction::Opened => &mut self.opened,
            Interaction::Inspected => &mut self.inspected,
            Interaction::Discovered => &mut self.discovered_locations,
        }
    }

    /// Sets `instance_id` to `true`. Returns false if it already was.
    pub fn mark(&mut self, interaction: Interaction, instance_id: &str) -> bool {
        let map = self.map_mut(interaction);
        if map.get(instance_id) == Some(&true) {
            return false;
        }
        map.insert(instance_id.to_string(), true);
        true
    }

    pub fn is_marked(&self, interaction: Interaction, instance_id: &str) -> bool {
        self.map(interaction).get(instance_id) == Some(&true)
    }

    /// Sets `exploredTiles["x,y"]`. Returns false if it already was.
    pub fn mark_tile(&mut self, position: Position) -> bool {
        let key = position.tile_key();
        if self.explored_tiles.get(&key) == Some(&true) {
            return false;
        }
        self.explored_tiles.insert(key, true);
        true
    }

    pub fn is_tile_explored(&self, position: Position) -> bool {
        self.explored_tiles.get(&position.tile_key()) == Some(&true)
    }

    pub fn is_empty(&self) -> bool {
        Interaction::ALL
            .iter()
            .all(|interaction| self.map(*interaction).is_empty())
            && self.explored_tiles.is_empty()
    }
}

impl Default for ZoneDelta {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a normalization pass over persisted delta records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Number of records inspected.
    pub records: usize,
    /// Zone ids whose record had to be repaired or migrated.
    pub repaired: Vec<String>,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.repaired.is_empty()
    }
}

/// Zone deltas indexed by zone id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoneDeltaStore {
    deltas: BTreeMap<String, ZoneDelta>,
}

impl ZoneDeltaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delta for `zone_id`, creating an empty one on first access.
    pub fn get_zone_delta(&mut self, zone_id: &str) -> &mut ZoneDelta {
        self.deltas.entry(zone_id.to_string()).or_default()
    }

    /// Read-only lookup that never creates a record.
    pub fn peek(&self, zone_id: &str) -> Option<&ZoneDelta> {
        self.deltas.get(zone_id)
    }

    pub fn mark(&mut self, zone_id: &str, interaction: Interaction, instance_id: &str) -> bool {
        self.get_zone_delta(zone_id).mark(interaction, instance_id)
    }

    pub fn mark_harvested(&mut self, zone_id: &str, instance_id: &str) -> bool {
        self.mark(zone_id, Interaction::Harvested, instance_id)
    }

    pub fn mark_defeated(&mut self, zone_id: &str, instance_id: &str) -> bool {
        self.mark(zone_id, Interaction::Defeated, instance_id)
    }

    pub fn mark_opened(&mut self, zone_id: &str, instance_id: &str) -> bool {
        self.mark(zone_id, Interaction::Opened, instance_id)
    }

    pub fn mark_inspected(&mut self, zone_id: &str, instance_id: &str) -> bool {
        self.mark(zone_id, Interaction::Inspected, instance_id)
    }

    pub fn mark_location_discovered(&mut self, zone_id: &str, instance_id: &str) -> bool {
        self.mark(zone_id, Interaction::Discovered, instance_id)
    }

    pub fn mark_tile_explored(&mut self, zone_id: &str, x: i32, y: i32) -> bool {
        self.get_zone_delta(zone_id).mark_tile(Position::new(x, y))
    }

    /// Overlays the zone's delta onto a freshly generated zone, creating the
    /// delta record if the zone has never been visited.
    pub fn apply_to(&mut self, zone: &mut Zone) {
        let delta = self.get_zone_delta(&zone.id);
        apply_zone_deltas(zone, delta);
    }

    /// Brings typed records up to the current schema version. Typed records
    /// always carry every map, so only the version can be stale.
    pub fn normalize_versions(&mut self) -> NormalizationReport {
        let mut report = NormalizationReport {
            records: self.deltas.len(),
            repaired: Vec::new(),
        };
        for (zone_id, delta) in &mut self.deltas {
            if delta.version < ZoneDelta::CURRENT_VERSION {
                delta.version = ZoneDelta::CURRENT_VERSION;
                report.repaired.push(zone_id.clone());
            }
        }
        report
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.deltas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

#[cfg(feature = "serde")]
impl ZoneDeltaStore {
    /// Decodes a persisted store, repairing legacy or damaged records first.
    ///
    /// `null` decodes as an empty store. Any other non-object root is an
    /// error because there is nothing to salvage.
    pub fn from_json_value(
        mut value: serde_json::Value,
    ) -> Result<(Self, NormalizationReport), DeltaError> {
        if value.is_null() {
            return Ok((Self::new(), NormalizationReport::default()));
        }
        let Some(records) = value.as_object_mut() else {
            return Err(DeltaError::StoreNotAnObject);
        };
        let report = normalize_all_zone_deltas(records);
        let store = serde_json::from_value(value)?;
        Ok((store, report))
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, DeltaError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_zone_delta_creates_current_schema() {
        let mut store = ZoneDeltaStore::new();
        let delta = store.get_zone_delta("forest_1");
        assert_eq!(delta.version, ZoneDelta::CURRENT_VERSION);
        assert!(delta.is_empty());
        assert_eq!(store.len(), 1);
        assert!(store.peek("other").is_none());
    }

    #[test]
    fn marks_are_idempotent() {
        let mut store = ZoneDeltaStore::new();
        assert!(store.mark_harvested("z", "resourceNodes_oak_tree_3_4"));
        assert!(!store.mark_harvested("z", "resourceNodes_oak_tree_3_4"));
        assert!(store.mark_defeated("z", "entities_wolf_1_1"));
        assert!(store.mark_opened("z", "pois_stash_small_2_2"));
        assert!(store.mark_inspected("z", "pois_stash_small_2_2"));
        assert!(store.mark_location_discovered("z", "locations_cave_entrance_5_5"));
        assert!(store.mark_tile_explored("z", 2, 5));
        assert!(!store.mark_tile_explored("z", 2, 5));

        let delta = store.peek("z").unwrap();
        assert_eq!(delta.harvested.len(), 1);
        assert!(delta.is_marked(Interaction::Opened, "pois_stash_small_2_2"));
        assert!(delta.is_marked(Interaction::Inspected, "pois_stash_small_2_2"));
        assert!(delta.is_tile_explored(Position::new(2, 5)));
        assert_eq!(delta.explored_tiles.get("2,5"), Some(&true));
    }

    #[test]
    fn a_false_entry_can_be_promoted() {
        let mut delta = ZoneDelta::new();
        delta.harvested.insert("a".into(), false);
        assert!(!delta.is_marked(Interaction::Harvested, "a"));
        assert!(delta.mark(Interaction::Harvested, "a"));
        assert!(delta.is_marked(Interaction::Harvested, "a"));
    }

    #[test]
    fn interactions_target_their_kinds() {
        assert!(Interaction::Harvested.applies_to(ContentKind::ResourceNodes));
        assert!(!Interaction::Harvested.applies_to(ContentKind::Entities));
        assert!(Interaction::Discovered.applies_to(ContentKind::Locations));
        assert!(
            ContentKind::in_order().all(|kind| Interaction::Inspected.applies_to(kind))
        );
    }

    #[test]
    fn typed_version_normalization() {
        let mut store = ZoneDeltaStore::new();
        store.get_zone_delta("old").version = 1;
        store.get_zone_delta("new");

        let report = store.normalize_versions();
        assert_eq!(report.records, 2);
        assert_eq!(report.repaired, vec!["old".to_string()]);
        assert!(store.normalize_versions().is_clean());
    }
}
