use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::env::{GenerationContext, TableSource, sub_seed};
use crate::generation::PlacementEngine;
use crate::state::{ContentKind, WorldSlot, Zone};

/// What one population pass placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationSummary {
    pub table_id: String,
    pub source: TableSource,
    pub resource_nodes: usize,
    pub entities: usize,
    pub pois: usize,
    pub locations: usize,
}

impl PopulationSummary {
    pub fn placed(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::ResourceNodes => self.resource_nodes,
            ContentKind::Entities => self.entities,
            ContentKind::Pois => self.pois,
            ContentKind::Locations => self.locations,
        }
    }

    pub fn total(&self) -> usize {
        ContentKind::in_order().map(|kind| self.placed(kind)).sum()
    }
}

/// Fills a freshly built zone with content from its spawn table.
pub struct ContentPopulator<'a> {
    ctx: &'a GenerationContext,
}

impl<'a> ContentPopulator<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self { ctx }
    }

    /// Populates `zone` once.
    ///
    /// Returns `None` without touching the zone when it already holds content
    /// or when no spawn table resolves for it. Each kind draws from its own
    /// stream (`worldSeed::zoneId::content_v1::<label>`), kinds run in the
    /// fixed [`ContentKind::in_order`] sequence, and the entry tile is never
    /// used.
    pub fn populate(&self, zone: &mut Zone, slot: &WorldSlot) -> Option<PopulationSummary> {
        if !zone.content.is_empty() {
            trace!(zone_id = %zone.id, "zone already populated");
            return None;
        }

        let Some(resolved) = self.ctx.resolver().resolve(&zone.id, slot) else {
            debug!(zone_id = %zone.id, "no spawn table resolved; zone left empty");
            return None;
        };

        let config = self.ctx.config();
        let zone_seed = config.content_seed(&slot.seed, &zone.id);
        let engine = PlacementEngine::new(self.ctx.definitions(), config);

        let mut used = BTreeSet::new();
        if let Some(entry) = zone.entry_spawn {
            used.insert(entry);
        }

        let mut summary = PopulationSummary {
            table_id: resolved.table_id.clone(),
            source: resolved.source,
            resource_nodes: 0,
            entities: 0,
            pois: 0,
            locations: 0,
        };
        for kind in ContentKind::in_order() {
            let Some(set) = resolved.table.entry_set(kind) else {
                continue;
            };
            let mut rng = self.ctx.make_rng(&sub_seed(&zone_seed, kind.seed_label()));
            let placed = engine.place_kind(zone, kind, set, rng.as_mut(), &mut used);
            match kind {
                ContentKind::ResourceNodes => summary.resource_nodes = placed,
                ContentKind::Entities => summary.entities = placed,
                ContentKind::Pois => summary.pois = placed,
                ContentKind::Locations => summary.locations = placed,
            }
        }

        debug!(
            zone_id = %zone.id,
            source = %summary.source,
            table_id = %summary.table_id,
            resource_nodes = summary.resource_nodes,
            entities = summary.entities,
            pois = summary.pois,
            locations = summary.locations,
            "populated zone content"
        );
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        ContentDefinition, DefinitionRegistry, EntrySet, PcgRngFactory, SpawnTable, SpawnTables,
        WeightedEntry,
    };
    use crate::state::Position;

    fn context() -> GenerationContext {
        let definitions = DefinitionRegistry::new()
            .with(ContentKind::ResourceNodes, "oak_tree", ContentDefinition::named("Oak"))
            .with(ContentKind::Entities, "rabbit", ContentDefinition::named("Rabbit"));
        let mut tables = SpawnTables::new();
        tables.insert_template(
            "meadow",
            SpawnTable::default()
                .with(
                    ContentKind::ResourceNodes,
                    EntrySet::with_count(5, vec![WeightedEntry::new("oak_tree", 1.0)]),
                )
                .with(
                    ContentKind::Entities,
                    EntrySet::with_count(3, vec![WeightedEntry::new("rabbit", 1.0)]),
                ),
        );
        GenerationContext::builder()
            .definitions(definitions)
            .spawn_tables(tables)
            .rng_factory(PcgRngFactory)
            .build()
            .unwrap()
    }

    fn meadow() -> Zone {
        Zone::from_layout("meadow", &["#####", "#...#", "#...#", "#...#", "#####"], None).unwrap()
    }

    #[test]
    fn fills_kinds_and_reserves_entry() {
        let ctx = context();
        let mut zone = meadow();
        let summary = ContentPopulator::new(&ctx)
            .populate(&mut zone, &WorldSlot::new("meadow", "42"))
            .unwrap();

        assert_eq!(summary.source, TableSource::ZoneId);
        assert_eq!(summary.resource_nodes, 5);
        assert_eq!(summary.entities, 3);
        assert_eq!(summary.total(), 8);
        assert_eq!(zone.entry_spawn, Some(Position::new(2, 2)));
        assert!(zone.content.iter().all(|inst| inst.position() != Position::new(2, 2)));
    }

    #[test]
    fn second_call_is_a_no_op() {
        let ctx = context();
        let mut zone = meadow();
        let slot = WorldSlot::new("meadow", "42");
        let populator = ContentPopulator::new(&ctx);
        assert!(populator.populate(&mut zone, &slot).is_some());
        let first = zone.content.clone();
        assert!(populator.populate(&mut zone, &slot).is_none());
        assert_eq!(zone.content, first);
    }

    #[test]
    fn unresolved_table_leaves_zone_empty() {
        let ctx = context();
        let mut zone = Zone::from_layout("elsewhere", &["..."], None).unwrap();
        assert!(ContentPopulator::new(&ctx)
            .populate(&mut zone, &WorldSlot::new("elsewhere", "42"))
            .is_none());
        assert!(zone.content.is_empty());
    }
}
