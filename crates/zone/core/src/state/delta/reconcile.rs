use tracing::trace;

use super::{Interaction, ZoneDelta};
use crate::state::{Position, Zone};

/// Overlays a delta onto a freshly generated zone.
///
/// Only `true` entries are applied, and only onto instances of the kinds the
/// interaction targets. Explored-tile keys that do not parse or fall outside
/// the grid are ignored. Applying the same delta twice leaves the zone as it
/// was after the first application.
pub fn apply_zone_deltas(zone: &mut Zone, delta: &ZoneDelta) {
    let mut flags = 0usize;
    for interaction in Interaction::ALL {
        let marked = delta.map(interaction);
        if marked.is_empty() {
            continue;
        }
        for kind in interaction.kinds() {
            for instance in zone.content.of_mut(*kind) {
                if marked.get(&instance.id) == Some(&true) {
                    instance
                        .state
                        .insert(interaction.state_key().to_string(), true);
                    flags += 1;
                }
            }
        }
    }

    let mut explored = 0usize;
    for (key, value) in &delta.explored_tiles {
        if !*value {
            continue;
        }
        let Some(tile) = Position::parse_tile_key(key).and_then(|pos| zone.tile_mut(pos)) else {
            continue;
        };
        tile.explored = true;
        explored += 1;
    }

    trace!(zone_id = %zone.id, flags, explored, "applied zone delta");
}
