//! Cross-reference validation of loaded content.
//!
//! Generation tolerates drift (an unknown definition id is skipped, a missing
//! table yields an empty zone). This pass reports the same problems up front.

use zone_core::{
    ContentKind, DefinitionRegistry, DefinitionsOracle, LayoutError, LayoutSpec, LootTables,
    SpawnTables, Zone, ZoneDefinition, ZoneDefinitionRegistry,
};

/// One problem found in the content set.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentIssue {
    #[error("{table}: {kind} entry '{def_id}' has no definition")]
    UnknownDefinition {
        table: String,
        kind: ContentKind,
        def_id: String,
    },

    #[error("{table}: {kind} entry '{def_id}' has non-positive weight {weight}")]
    NonPositiveWeight {
        table: String,
        kind: ContentKind,
        def_id: String,
        weight: f64,
    },

    #[error("{table}: {kind} may place instances but lists no entries")]
    NoEntries { table: String, kind: ContentKind },

    #[error("{table}: {kind} countRange ({min}, {max}) is inverted; {min} is used")]
    InvertedCountRange {
        table: String,
        kind: ContentKind,
        min: u32,
        max: u32,
    },

    #[error("loot table '{loot_table_id}' has no rolls or no entries")]
    EmptyLootTable { loot_table_id: String },

    #[error("{kind} definition '{def_id}' references unknown loot table '{loot_table_id}'")]
    UnknownLootTable {
        kind: ContentKind,
        def_id: String,
        loot_table_id: String,
    },

    #[error("zone definition '{zone_id}': {source}")]
    InvalidLayout {
        zone_id: String,
        source: LayoutError,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ContentIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks every spawn entry, loot table and zone layout.
pub fn validate_content(
    definitions: &DefinitionRegistry,
    spawn_tables: &SpawnTables,
    loot_tables: &LootTables,
    zones: &ZoneDefinitionRegistry,
) -> ValidationReport {
    let mut issues = Vec::new();

    for (table_id, table) in spawn_tables.iter() {
        for kind in ContentKind::in_order() {
            let Some(set) = table.entry_set(kind) else {
                continue;
            };
            if let Some((min, max)) = set.count_range
                && min > max
            {
                issues.push(ContentIssue::InvertedCountRange {
                    table: table_id.clone(),
                    kind,
                    min,
                    max,
                });
            }
            let may_place = set.count_range.is_some_and(|(min, max)| min.max(max) > 0)
                || set.count.is_some_and(|count| count > 0)
                || set.min_count.is_some_and(|min| min > 0);
            if may_place && set.entries.is_empty() {
                issues.push(ContentIssue::NoEntries {
                    table: table_id.clone(),
                    kind,
                });
            }
            for entry in &set.entries {
                if !definitions.contains(kind, &entry.def_id) {
                    issues.push(ContentIssue::UnknownDefinition {
                        table: table_id.clone(),
                        kind,
                        def_id: entry.def_id.clone(),
                    });
                }
                if !(entry.weight.is_finite() && entry.weight > 0.0) {
                    issues.push(ContentIssue::NonPositiveWeight {
                        table: table_id.clone(),
                        kind,
                        def_id: entry.def_id.clone(),
                        weight: entry.weight,
                    });
                }
            }
        }
    }

    for (kind, def_id, definition) in definitions.iter() {
        if let Some(loot_table_id) = &definition.loot_table_id
            && !loot_tables.contains(loot_table_id)
        {
            issues.push(ContentIssue::UnknownLootTable {
                kind,
                def_id: def_id.to_string(),
                loot_table_id: loot_table_id.clone(),
            });
        }
    }

    for loot_table_id in loot_tables.ids() {
        if let Some(table) = loot_tables.get(loot_table_id)
            && (table.rolls == 0 || table.entries.is_empty())
        {
            issues.push(ContentIssue::EmptyLootTable {
                loot_table_id: loot_table_id.to_string(),
            });
        }
    }

    for zone in zones.iter() {
        if let Err(source) = check_layout(zone) {
            issues.push(ContentIssue::InvalidLayout {
                zone_id: zone.id.clone(),
                source,
            });
        }
    }

    ValidationReport { issues }
}

fn check_layout(definition: &ZoneDefinition) -> Result<(), LayoutError> {
    match &definition.layout {
        LayoutSpec::Static { rows } => {
            Zone::from_layout(definition.id.as_str(), rows, definition.entry).map(|_| ())
        }
        LayoutSpec::Generated { generator, config } => {
            if generator != ZoneDefinition::CELLULAR_AUTOMATA {
                return Err(LayoutError::UnsupportedGenerator {
                    zone_id: definition.id.clone(),
                    generator: generator.clone(),
                });
            }
            if config.width == 0 || config.height == 0 {
                return Err(LayoutError::InvalidDimensions {
                    width: config.width,
                    height: config.height,
                });
            }
            Ok(())
        }
    }
}
