//! Turns one content kind's entry set into positioned instances.
use std::collections::BTreeSet;

use tracing::trace;

use crate::config::GenerationConfig;
use crate::env::{DefinitionsOracle, EntrySet, PlacementConstraints, RngStream};
use crate::generation::{pick_weighted, shuffle};
use crate::state::{ContentInstance, ContentKind, Position, Zone};

/// Places instances of one kind at a time.
///
/// The `used` set passed to [`PlacementEngine::place_kind`] is shared by all
/// kinds in one population pass, so no two instances ever share a tile.
#[derive(Clone, Copy)]
pub struct PlacementEngine<'a> {
    definitions: &'a dyn DefinitionsOracle,
    config: &'a GenerationConfig,
}

impl<'a> PlacementEngine<'a> {
    /// Adjacent-wall window for `prefer_near_walls` when a bound is unset.
    pub const NEAR_WALLS_DEFAULT: (u32, u32) = (1, 4);
    /// Adjacent-wall ceiling for `prefer_open` when unset.
    pub const OPEN_DEFAULT_MAX: u32 = 0;

    pub fn new(definitions: &'a dyn DefinitionsOracle, config: &'a GenerationConfig) -> Self {
        Self {
            definitions,
            config,
        }
    }

    /// Target instance count for an entry set.
    ///
    /// A range draws once from `rng` unless it is degenerate. Scaling
    /// multiplies the configured value(s) by `walkable / base_tiles`
    /// (rounded) and clamps to `[min_count, max_count]` before drawing.
    pub fn resolve_count(&self, set: &EntrySet, walkable: usize, rng: &mut dyn RngStream) -> u32 {
        let ceiling = self.config.max_instance_count;
        let (mut min, mut max) = match (set.count_range, set.count) {
            (Some((min, max)), _) => (min.min(ceiling), max.min(ceiling)),
            (None, Some(count)) => {
                let count = count.min(ceiling);
                (count, count)
            }
            (None, None) => return 0,
        };

        if set.scale_by_zone_size {
            let base = set.base_tiles.unwrap_or(self.config.default_base_tiles);
            let factor = if base == 0 {
                1.0
            } else {
                walkable as f64 / f64::from(base)
            };
            let lo = set.min_count.unwrap_or(0);
            let hi = set.max_count.unwrap_or(ceiling).min(ceiling);
            let scale = |value: u32| {
                let scaled = (f64::from(value) * factor).round() as u32;
                scaled.max(lo).min(hi)
            };
            min = scale(min);
            max = scale(max);
        }

        if max <= min {
            return min;
        }
        rng.next_int(i64::from(min), i64::from(max)) as u32
    }

    /// Walkable, unused tiles that satisfy the constraints, in row-major order.
    pub fn candidates(
        &self,
        zone: &Zone,
        constraints: &PlacementConstraints,
        used: &BTreeSet<Position>,
    ) -> Vec<Position> {
        let min_dist = constraints.min_dist_from_entry.unwrap_or(0);
        zone.walkable_positions()
            .into_iter()
            .filter(|pos| !used.contains(pos))
            .filter(|pos| match zone.entry_spawn {
                Some(entry) if min_dist > 0 => pos.manhattan(entry) >= min_dist,
                _ => true,
            })
            .filter(|pos| {
                let Some(bounds) = constraints.prefer_near_walls else {
                    return true;
                };
                let walls = zone.count_adjacent_walls(*pos);
                let (default_min, default_max) = Self::NEAR_WALLS_DEFAULT;
                walls >= bounds.min_adj_walls.unwrap_or(default_min)
                    && walls <= bounds.max_adj_walls.unwrap_or(default_max)
            })
            .filter(|pos| {
                let Some(bounds) = constraints.prefer_open else {
                    return true;
                };
                zone.count_adjacent_walls(*pos) <= bounds.max_adj_walls.unwrap_or(Self::OPEN_DEFAULT_MAX)
            })
            .collect()
    }

    /// Places up to the resolved count of `kind` into `zone`. Returns the
    /// number placed; running out of candidates is not an error.
    pub fn place_kind(
        &self,
        zone: &mut Zone,
        kind: ContentKind,
        set: &EntrySet,
        rng: &mut dyn RngStream,
        used: &mut BTreeSet<Position>,
    ) -> usize {
        let target = self.resolve_count(set, zone.walkable_count(), rng) as usize;
        if target == 0 || set.entries.is_empty() {
            return 0;
        }

        let mut candidates = self.candidates(zone, &set.constraints, used);
        shuffle(rng, &mut candidates);

        let mut placed = 0;
        for pos in candidates {
            if placed >= target {
                break;
            }
            if used.contains(&pos) {
                continue;
            }
            let Some(entry) = pick_weighted(rng, &set.entries) else {
                break;
            };
            let Some(definition) = self.definitions.definition(kind, &entry.def_id) else {
                trace!(
                    zone_id = %zone.id,
                    kind = %kind,
                    def_id = %entry.def_id,
                    "skipping placement of unknown definition"
                );
                continue;
            };

            let instance =
                ContentInstance::new(kind, entry.def_id.as_str(), pos, definition.state_defaults.clone());
            if let Some(tile) = zone.tile_mut(pos) {
                tile.content.set(kind, instance.id.as_str());
            }
            zone.content.of_mut(kind).push(instance);
            used.insert(pos);
            placed += 1;
        }
        placed
    }
}
