use std::collections::BTreeMap;

use crate::state::ContentKind;

/// Oracle providing content definitions by kind and definition id.
///
/// Placement only needs `state_defaults`; the other fields are carried for
/// collaborators (tooltips, loot rolls) that read the same registry.
pub trait DefinitionsOracle: Send + Sync {
    fn definition(&self, kind: ContentKind, def_id: &str) -> Option<&ContentDefinition>;

    fn contains(&self, kind: ContentKind, def_id: &str) -> bool {
        self.definition(kind, def_id).is_some()
    }
}

/// Static data for one definable thing (an oak tree, a wolf, a stash).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ContentDefinition {
    pub name: Option<String>,
    /// Initial interaction flags copied onto every placed instance.
    pub state_defaults: BTreeMap<String, bool>,
    pub loot_table_id: Option<String>,
}

impl ContentDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_state_default(mut self, key: impl Into<String>, value: bool) -> Self {
        self.state_defaults.insert(key.into(), value);
        self
    }

    pub fn with_loot_table(mut self, loot_table_id: impl Into<String>) -> Self {
        self.loot_table_id = Some(loot_table_id.into());
        self
    }
}

/// In-memory definitions, one map per content kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DefinitionRegistry {
    pub resource_nodes: BTreeMap<String, ContentDefinition>,
    pub entities: BTreeMap<String, ContentDefinition>,
    pub pois: BTreeMap<String, ContentDefinition>,
    pub locations: BTreeMap<String, ContentDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(&self, kind: ContentKind) -> &BTreeMap<String, ContentDefinition> {
        match kind {
            ContentKind::ResourceNodes => &self.resource_nodes,
            ContentKind::Entities => &self.entities,
            ContentKind::Pois => &self.pois,
            ContentKind::Locations => &self.locations,
        }
    }

    fn of_mut(&mut self, kind: ContentKind) -> &mut BTreeMap<String, ContentDefinition> {
        match kind {
            ContentKind::ResourceNodes => &mut self.resource_nodes,
            ContentKind::Entities => &mut self.entities,
            ContentKind::Pois => &mut self.pois,
            ContentKind::Locations => &mut self.locations,
        }
    }

    pub fn insert(
        &mut self,
        kind: ContentKind,
        def_id: impl Into<String>,
        definition: ContentDefinition,
    ) -> Option<ContentDefinition> {
        self.of_mut(kind).insert(def_id.into(), definition)
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        kind: ContentKind,
        def_id: impl Into<String>,
        definition: ContentDefinition,
    ) -> Self {
        self.insert(kind, def_id, definition);
        self
    }

    pub fn len(&self) -> usize {
        ContentKind::in_order().map(|kind| self.of(kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every `(kind, def_id, definition)` triple, in population order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentKind, &str, &ContentDefinition)> {
        ContentKind::in_order().flat_map(move |kind| {
            self.of(kind)
                .iter()
                .map(move |(id, def)| (kind, id.as_str(), def))
        })
    }
}

impl DefinitionsOracle for DefinitionRegistry {
    fn definition(&self, kind: ContentKind, def_id: &str) -> Option<&ContentDefinition> {
        self.of(kind).get(def_id)
    }
}

/// One weighted loot row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: String,
    #[cfg_attr(feature = "serde", serde(alias = "w"))]
    pub weight: f64,
    /// Inclusive quantity range.
    pub qty: (u32, u32),
}

/// Loot table data. Rolling happens outside zone generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub rolls: u32,
    pub entries: Vec<LootEntry>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LootTables {
    tables: BTreeMap<String, LootTable>,
}

impl LootTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, table: LootTable) -> Option<LootTable> {
        self.tables.insert(id.into(), table)
    }

    pub fn get(&self, id: &str) -> Option<&LootTable> {
        self.tables.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tables.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
