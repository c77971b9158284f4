//! Declarative spawn tables and their resolution for a zone.
//!
//! Tables are pure data and are never mutated at runtime. Resolution order,
//! first match wins:
//!
//! 1. `by_template[slot.template_id]`
//! 2. `by_template[zone_id]` (handcrafted exceptions)
//! 3. `by_context[biome][era][bucket]`, falling back to `[biome][era]["any"]`
use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::state::{ContentKind, WorldSlot};

/// One weighted definition choice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeightedEntry {
    pub def_id: String,
    #[cfg_attr(feature = "serde", serde(alias = "w", default = "WeightedEntry::default_weight"))]
    pub weight: f64,
}

impl WeightedEntry {
    pub fn new(def_id: impl Into<String>, weight: f64) -> Self {
        Self {
            def_id: def_id.into(),
            weight,
        }
    }

    #[cfg(feature = "serde")]
    fn default_weight() -> f64 {
        1.0
    }
}

/// Inclusive bounds on the number of orthogonally adjacent walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct WallBounds {
    pub min_adj_walls: Option<u32>,
    pub max_adj_walls: Option<u32>,
}

impl WallBounds {
    pub const fn new(min_adj_walls: Option<u32>, max_adj_walls: Option<u32>) -> Self {
        Self {
            min_adj_walls,
            max_adj_walls,
        }
    }
}

/// Geometric filters applied to placement candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PlacementConstraints {
    /// Minimum Manhattan distance from the zone entry. Ignored when the zone
    /// has no entry.
    pub min_dist_from_entry: Option<u32>,
    /// Adjacent-wall window; unset bounds default to `1..=4`.
    pub prefer_near_walls: Option<WallBounds>,
    /// Maximum adjacent walls; an unset bound defaults to 0. `min_adj_walls`
    /// is ignored here.
    pub prefer_open: Option<WallBounds>,
}

impl PlacementConstraints {
    pub fn is_unconstrained(&self) -> bool {
        self.min_dist_from_entry.unwrap_or(0) == 0
            && self.prefer_near_walls.is_none()
            && self.prefer_open.is_none()
    }
}

/// How many of one content kind to place, and what.
///
/// `count_range` wins over `count` when both are present.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EntrySet {
    pub count: Option<u32>,
    pub count_range: Option<(u32, u32)>,
    pub scale_by_zone_size: bool,
    /// Walkable-tile baseline the configured counts were tuned for.
    pub base_tiles: Option<u32>,
    pub min_count: Option<u32>,
    pub max_count: Option<u32>,
    pub constraints: PlacementConstraints,
    pub entries: Vec<WeightedEntry>,
}

impl EntrySet {
    pub fn with_count(count: u32, entries: Vec<WeightedEntry>) -> Self {
        Self {
            count: Some(count),
            entries,
            ..Self::default()
        }
    }

    pub fn with_range(min: u32, max: u32, entries: Vec<WeightedEntry>) -> Self {
        Self {
            count_range: Some((min, max)),
            entries,
            ..Self::default()
        }
    }

    pub fn scaled(mut self, base_tiles: u32, min_count: u32, max_count: u32) -> Self {
        self.scale_by_zone_size = true;
        self.base_tiles = Some(base_tiles);
        self.min_count = Some(min_count);
        self.max_count = Some(max_count);
        self
    }

    pub fn constrained(mut self, constraints: PlacementConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn def_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.def_id.as_str())
    }
}

/// Entry sets for each content kind. Absent kinds place nothing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SpawnTable {
    pub resource_nodes: Option<EntrySet>,
    pub entities: Option<EntrySet>,
    pub pois: Option<EntrySet>,
    pub locations: Option<EntrySet>,
}

impl SpawnTable {
    pub fn entry_set(&self, kind: ContentKind) -> Option<&EntrySet> {
        match kind {
            ContentKind::ResourceNodes => self.resource_nodes.as_ref(),
            ContentKind::Entities => self.entities.as_ref(),
            ContentKind::Pois => self.pois.as_ref(),
            ContentKind::Locations => self.locations.as_ref(),
        }
    }

    pub fn with(mut self, kind: ContentKind, set: EntrySet) -> Self {
        let slot = match kind {
            ContentKind::ResourceNodes => &mut self.resource_nodes,
            ContentKind::Entities => &mut self.entities,
            ContentKind::Pois => &mut self.pois,
            ContentKind::Locations => &mut self.locations,
        };
        *slot = Some(set);
        self
    }
}

/// Coarse difficulty classification used for context lookup.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum DifficultyBucket {
    Easy,
    Medium,
    Hard,
}

impl DifficultyBucket {
    /// Key of the catch-all bucket consulted when the specific one is absent.
    pub const ANY: &'static str = "any";

    /// `<= 0` has no bucket; 1-3 easy; 4-6 medium; 7+ hard.
    pub const fn from_rating(rating: i32) -> Option<Self> {
        match rating {
            i32::MIN..=0 => None,
            1..=3 => Some(Self::Easy),
            4..=6 => Some(Self::Medium),
            _ => Some(Self::Hard),
        }
    }
}

type EraTables = BTreeMap<String, BTreeMap<String, SpawnTable>>;

/// All spawn tables known to the game.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SpawnTables {
    pub by_template: BTreeMap<String, SpawnTable>,
    /// `biome -> era -> bucket key -> table`.
    pub by_context: BTreeMap<String, EraTables>,
}

impl SpawnTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_template(&mut self, id: impl Into<String>, table: SpawnTable) {
        self.by_template.insert(id.into(), table);
    }

    pub fn insert_context(
        &mut self,
        biome: impl Into<String>,
        era: impl Into<String>,
        bucket_key: impl Into<String>,
        table: SpawnTable,
    ) {
        self.by_context
            .entry(biome.into())
            .or_default()
            .entry(era.into())
            .or_default()
            .insert(bucket_key.into(), table);
    }

    pub fn template(&self, id: &str) -> Option<&SpawnTable> {
        self.by_template.get(id)
    }

    pub fn context(&self, biome: &str, era: &str, bucket_key: &str) -> Option<&SpawnTable> {
        self.by_context.get(biome)?.get(era)?.get(bucket_key)
    }

    /// Every table with a human-readable id, for validation passes.
    pub fn iter(&self) -> impl Iterator<Item = (String, &SpawnTable)> {
        let templates = self
            .by_template
            .iter()
            .map(|(id, table)| (format!("template:{id}"), table));
        let contexts = self.by_context.iter().flat_map(|(biome, eras)| {
            eras.iter().flat_map(move |(era, buckets)| {
                buckets
                    .iter()
                    .map(move |(key, table)| (format!("context:{biome}/{era}/{key}"), table))
            })
        });
        templates.chain(contexts)
    }
}

/// Which lookup produced a [`ResolvedTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TableSource {
    Template,
    ZoneId,
    Context,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTable<'a> {
    pub table: &'a SpawnTable,
    /// Template id, zone id, or `biome/era/bucket`.
    pub table_id: String,
    pub source: TableSource,
}

/// Picks the spawn table for a zone.
#[derive(Clone, Copy, Debug)]
pub struct SpawnTableResolver<'a> {
    tables: &'a SpawnTables,
}

impl<'a> SpawnTableResolver<'a> {
    pub fn new(tables: &'a SpawnTables) -> Self {
        Self { tables }
    }

    /// Returns `None` when nothing matches; callers treat that as an empty
    /// zone, not an error.
    pub fn resolve(&self, zone_id: &str, slot: &WorldSlot) -> Option<ResolvedTable<'a>> {
        if let Some(template_id) = slot.template_id.as_deref()
            && let Some(table) = self.tables.template(template_id)
        {
            return Some(ResolvedTable {
                table,
                table_id: template_id.to_string(),
                source: TableSource::Template,
            });
        }

        if let Some(table) = self.tables.template(zone_id) {
            return Some(ResolvedTable {
                table,
                table_id: zone_id.to_string(),
                source: TableSource::ZoneId,
            });
        }

        let biome = slot.biome.as_deref()?;
        let era = slot.era.as_deref()?;
        let bucket = DifficultyBucket::from_rating(slot.difficulty_rating?)?;
        let (table, key) = match self.tables.context(biome, era, bucket.as_ref()) {
            Some(table) => (table, bucket.as_ref()),
            None => (
                self.tables.context(biome, era, DifficultyBucket::ANY)?,
                DifficultyBucket::ANY,
            ),
        };
        Some(ResolvedTable {
            table,
            table_id: format!("{biome}/{era}/{key}"),
            source: TableSource::Context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(def_id: &str) -> SpawnTable {
        SpawnTable::default().with(
            ContentKind::Entities,
            EntrySet::with_count(1, vec![WeightedEntry::new(def_id, 1.0)]),
        )
    }

    fn tables() -> SpawnTables {
        let mut tables = SpawnTables::new();
        tables.insert_template("tutorial_zone", table("template"));
        tables.insert_template("forest_special", table("by_zone"));
        tables.insert_context("temperate_forest", "primitive", "easy", table("easy"));
        tables.insert_context("temperate_forest", "primitive", "any", table("any"));
        tables
    }

    fn entity_def(resolved: &ResolvedTable<'_>) -> String {
        resolved
            .table
            .entry_set(ContentKind::Entities)
            .unwrap()
            .entries[0]
            .def_id
            .clone()
    }

    #[test]
    fn difficulty_buckets() {
        assert_eq!(DifficultyBucket::from_rating(-3), None);
        assert_eq!(DifficultyBucket::from_rating(0), None);
        assert_eq!(DifficultyBucket::from_rating(1), Some(DifficultyBucket::Easy));
        assert_eq!(DifficultyBucket::from_rating(3), Some(DifficultyBucket::Easy));
        assert_eq!(DifficultyBucket::from_rating(4), Some(DifficultyBucket::Medium));
        assert_eq!(DifficultyBucket::from_rating(6), Some(DifficultyBucket::Medium));
        assert_eq!(DifficultyBucket::from_rating(7), Some(DifficultyBucket::Hard));
        assert_eq!(DifficultyBucket::Medium.as_ref(), "medium");
    }

    #[test]
    fn template_beats_context() {
        let tables = tables();
        let resolver = SpawnTableResolver::new(&tables);
        let slot = WorldSlot::new("tutorial_zone", "1")
            .with_template("tutorial_zone")
            .with_context("temperate_forest", "primitive", 2);

        let resolved = resolver.resolve("tutorial_zone", &slot).unwrap();
        assert_eq!(resolved.source, TableSource::Template);
        assert_eq!(entity_def(&resolved), "template");
    }

    #[test]
    fn zone_id_is_second_choice() {
        let tables = tables();
        let resolver = SpawnTableResolver::new(&tables);
        let slot = WorldSlot::new("forest_special", "1")
            .with_template("missing_template")
            .with_context("temperate_forest", "primitive", 2);

        let resolved = resolver.resolve("forest_special", &slot).unwrap();
        assert_eq!(resolved.source, TableSource::ZoneId);
        assert_eq!(entity_def(&resolved), "by_zone");
    }

    #[test]
    fn context_falls_back_to_any_bucket() {
        let tables = tables();
        let resolver = SpawnTableResolver::new(&tables);

        let easy = WorldSlot::new("z", "1").with_context("temperate_forest", "primitive", 2);
        let resolved = resolver.resolve("z", &easy).unwrap();
        assert_eq!(resolved.table_id, "temperate_forest/primitive/easy");
        assert_eq!(entity_def(&resolved), "easy");

        let hard = WorldSlot::new("z", "1").with_context("temperate_forest", "primitive", 9);
        let resolved = resolver.resolve("z", &hard).unwrap();
        assert_eq!(resolved.table_id, "temperate_forest/primitive/any");
        assert_eq!(entity_def(&resolved), "any");
    }

    #[test]
    fn unresolvable_slots_yield_none() {
        let tables = tables();
        let resolver = SpawnTableResolver::new(&tables);

        let unrated = WorldSlot::new("z", "1").with_context("temperate_forest", "primitive", 0);
        assert!(resolver.resolve("z", &unrated).is_none());

        let unknown_biome = WorldSlot::new("z", "1").with_context("desert", "primitive", 2);
        assert!(resolver.resolve("z", &unknown_biome).is_none());

        assert!(resolver.resolve("z", &WorldSlot::new("z", "1")).is_none());
    }
}
