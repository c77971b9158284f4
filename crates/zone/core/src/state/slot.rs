use std::collections::BTreeMap;

/// World-map fog state of a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FogState {
    /// The player has no idea what is there.
    #[default]
    Unknown,
    /// The player knows a zone exists there.
    Discovered,
    /// The player has been inside the zone at least once.
    Visited,
}

/// Describes what kind of zone exists at a world-map coordinate.
///
/// Immutable once discovered, except for `zone_generated` and `fog`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorldSlot {
    pub zone_id: String,
    pub seed: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub template_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub biome: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub era: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty_rating: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone_generated: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fog: FogState,
}

impl WorldSlot {
    pub fn new(zone_id: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            seed: seed.into(),
            template_id: None,
            biome: None,
            era: None,
            difficulty_rating: None,
            zone_generated: false,
            fog: FogState::Discovered,
        }
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_context(
        mut self,
        biome: impl Into<String>,
        era: impl Into<String>,
        difficulty_rating: i32,
    ) -> Self {
        self.biome = Some(biome.into());
        self.era = Some(era.into());
        self.difficulty_rating = Some(difficulty_rating);
        self
    }
}

/// World slots indexed by zone id.
///
/// Together with the zone delta store this is the durable half of the
/// model; zones themselves are rebuilt from these two on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldSlotTable {
    slots: BTreeMap<String, WorldSlot>,
}

impl WorldSlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a slot under its zone id, returning any slot it replaced.
    pub fn insert(&mut self, slot: WorldSlot) -> Option<WorldSlot> {
        self.slots.insert(slot.zone_id.clone(), slot)
    }

    pub fn get(&self, zone_id: &str) -> Option<&WorldSlot> {
        self.slots.get(zone_id)
    }

    pub fn contains(&self, zone_id: &str) -> bool {
        self.slots.contains_key(zone_id)
    }

    /// Flags the slot's zone as materialized. Returns false for unknown ids.
    pub fn mark_generated(&mut self, zone_id: &str) -> bool {
        match self.slots.get_mut(zone_id) {
            Some(slot) => {
                slot.zone_generated = true;
                true
            }
            None => false,
        }
    }

    /// Marks the slot visited. Returns false for unknown ids.
    pub fn mark_visited(&mut self, zone_id: &str) -> bool {
        match self.slots.get_mut(zone_id) {
            Some(slot) => {
                slot.fog = FogState::Visited;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldSlot> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_indexed_by_zone_id() {
        let mut table = WorldSlotTable::new();
        table.insert(WorldSlot::new("tutorial_zone", "1234").with_template("tutorial_zone"));
        table.insert(
            WorldSlot::new("tutorial_zone_north", "1234").with_context(
                "temperate_forest",
                "primitive",
                2,
            ),
        );

        assert_eq!(table.len(), 2);
        let slot = table.get("tutorial_zone_north").unwrap();
        assert_eq!(slot.biome.as_deref(), Some("temperate_forest"));
        assert!(!slot.zone_generated);
    }

    #[test]
    fn generated_and_visited_flags() {
        let mut table = WorldSlotTable::new();
        table.insert(WorldSlot::new("z", "s"));
        assert!(table.mark_generated("z"));
        assert!(table.mark_visited("z"));
        assert!(!table.mark_generated("missing"));

        let slot = table.get("z").unwrap();
        assert!(slot.zone_generated);
        assert_eq!(slot.fog, FogState::Visited);
    }
}
