//! Deterministic zone generation.
//!
//! Terrain comes from a zone definition (static rows or a generator) or,
//! failing that, the configured default cellular automaton. Content is then
//! placed from the resolved spawn table. Terrain and content draw from
//! separate seed families so they never perturb each other.
mod layout;
mod placement;
mod populate;
mod sampler;
mod terrain;

pub use layout::{
    LayoutError, LayoutSpec, ZoneDefinition, ZoneDefinitionRegistry,
    generate_layout_from_definition,
};
pub use placement::PlacementEngine;
pub use populate::{ContentPopulator, PopulationSummary};
pub use sampler::{Weighted, pick_weighted, shuffle};
pub use terrain::{CellularAutomataConfig, generate_cellular_automata};

use crate::env::GenerationContext;
use crate::state::{WorldSlot, Zone};

/// Builds a fresh zone for a world slot: terrain, then content.
///
/// The terrain stream is seeded with `worldSeed::zoneId::terrain_v1`. Deltas
/// are not applied here; the returned zone is exactly what the seed produces.
///
/// # Errors
///
/// Layout problems in the definition (unsupported generator, malformed rows).
pub fn materialize_zone(
    ctx: &GenerationContext,
    slot: &WorldSlot,
    definition: Option<&ZoneDefinition>,
) -> Result<(Zone, Option<PopulationSummary>), LayoutError> {
    let terrain_seed = ctx.config().terrain_seed(&slot.seed, &slot.zone_id);
    let mut rng = ctx.make_rng(&terrain_seed);
    let mut zone = match definition {
        Some(definition) => definition.build_zone(&slot.zone_id, rng.as_mut())?,
        None => {
            let rows = generate_cellular_automata(&ctx.config().default_terrain, rng.as_mut())?;
            Zone::from_layout(slot.zone_id.as_str(), &rows, None)?
        }
    };
    let summary = ContentPopulator::new(ctx).populate(&mut zone, slot);
    Ok((zone, summary))
}
