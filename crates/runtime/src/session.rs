//! Zone lifecycle: enter, interact, leave.
//!
//! Exactly one zone is active at a time. It is rebuilt from scratch on every
//! entry and never saved; every interaction goes to the zone's delta first
//! and is then re-applied, so the active zone always equals
//! "fresh generation + delta".
use tracing::{debug, info};
use zone_content::ContentBundle;
use zone_core::{
    ExplorationStats, GenerationContext, Interaction, PopulationSummary, Position, Zone,
    ZoneDefinitionRegistry, apply_zone_deltas, materialize_zone,
};

use crate::error::{Result, RuntimeError};
use crate::save::{PersistedState, SaveData};

/// Whether an interaction changed the delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    Applied,
    /// The flag was already set; nothing changed.
    Unchanged,
}

impl InteractionOutcome {
    fn from_marked(newly_marked: bool) -> Self {
        if newly_marked {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

pub struct ZoneSession<S: PersistedState = SaveData> {
    ctx: GenerationContext,
    zones: ZoneDefinitionRegistry,
    state: S,
    active: Option<Zone>,
    summary: Option<PopulationSummary>,
}

impl<S: PersistedState> ZoneSession<S> {
    pub fn new(ctx: GenerationContext, zones: ZoneDefinitionRegistry, state: S) -> Self {
        Self {
            ctx,
            zones,
            state,
            active: None,
            summary: None,
        }
    }

    /// Session over loaded content, backed by the PCG stream.
    pub fn from_bundle(bundle: &ContentBundle, state: S) -> Result<Self> {
        let ctx = bundle.generation_context()?;
        Ok(Self::new(ctx, bundle.zones.clone(), state))
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Ends the session, returning the persisted state to save.
    pub fn into_state(self) -> S {
        self.state
    }

    pub fn active_zone(&self) -> Option<&Zone> {
        self.active.as_ref()
    }

    /// Population summary of the active zone, if a table resolved for it.
    pub fn population_summary(&self) -> Option<&PopulationSummary> {
        self.summary.as_ref()
    }

    /// Generates the zone for `zone_id`, overlays its delta and makes it the
    /// active zone. Any previously active zone is discarded.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::UnknownZone`] when no world slot exists for the id, or
    /// a layout error from the zone's definition.
    pub fn enter_zone(&mut self, zone_id: &str) -> Result<&Zone> {
        let slot = self
            .state
            .world_slots()
            .get(zone_id)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownZone(zone_id.to_string()))?;

        self.active = None;
        let definition = self.zones.resolve(&slot);
        let (mut zone, summary) = materialize_zone(&self.ctx, &slot, definition)?;
        self.state.zone_deltas_mut().apply_to(&mut zone);

        let slots = self.state.world_slots_mut();
        slots.mark_generated(zone_id);
        slots.mark_visited(zone_id);

        info!(
            zone_id,
            width = zone.width,
            height = zone.height,
            instances = zone.content.len(),
            "entered zone"
        );
        self.summary = summary;
        Ok(self.active.insert(zone))
    }

    /// Discards the active zone. Its delta stays in the persisted state.
    pub fn leave_zone(&mut self) -> Option<Zone> {
        self.summary = None;
        let zone = self.active.take();
        if let Some(zone) = &zone {
            debug!(zone_id = %zone.id, "left zone");
        }
        zone
    }

    pub fn harvest(&mut self, instance_id: &str) -> Result<InteractionOutcome> {
        self.interact(Interaction::Harvested, instance_id)
    }

    pub fn defeat(&mut self, instance_id: &str) -> Result<InteractionOutcome> {
        self.interact(Interaction::Defeated, instance_id)
    }

    pub fn open(&mut self, instance_id: &str) -> Result<InteractionOutcome> {
        self.interact(Interaction::Opened, instance_id)
    }

    /// Inspection applies to instances of any kind.
    pub fn inspect(&mut self, instance_id: &str) -> Result<InteractionOutcome> {
        self.interact(Interaction::Inspected, instance_id)
    }

    pub fn discover_location(&mut self, instance_id: &str) -> Result<InteractionOutcome> {
        self.interact(Interaction::Discovered, instance_id)
    }

    /// Marks a walkable tile of the active zone explored.
    pub fn explore_tile(&mut self, x: i32, y: i32) -> Result<InteractionOutcome> {
        let zone = self.active.as_mut().ok_or(RuntimeError::NoActiveZone)?;
        let position = Position::new(x, y);
        if !zone.is_walkable(position) {
            return Err(RuntimeError::TileNotExplorable {
                zone_id: zone.id.clone(),
                x,
                y,
            });
        }

        let delta = self.state.zone_deltas_mut().get_zone_delta(&zone.id);
        let newly_marked = delta.mark_tile(position);
        apply_zone_deltas(zone, delta);
        Ok(InteractionOutcome::from_marked(newly_marked))
    }

    pub fn exploration_stats(&self) -> Result<ExplorationStats> {
        self.active
            .as_ref()
            .map(Zone::exploration_stats)
            .ok_or(RuntimeError::NoActiveZone)
    }

    fn interact(
        &mut self,
        interaction: Interaction,
        instance_id: &str,
    ) -> Result<InteractionOutcome> {
        let zone = self.active.as_mut().ok_or(RuntimeError::NoActiveZone)?;
        let targetable = interaction
            .kinds()
            .iter()
            .any(|&kind| zone.content.find(kind, instance_id).is_some());
        if !targetable {
            return Err(RuntimeError::UnknownInstance {
                zone_id: zone.id.clone(),
                instance_id: instance_id.to_string(),
                interaction,
            });
        }

        let delta = self.state.zone_deltas_mut().get_zone_delta(&zone.id);
        let newly_marked = delta.mark(interaction, instance_id);
        apply_zone_deltas(zone, delta);
        debug!(
            zone_id = %zone.id,
            instance_id,
            interaction = interaction.state_key(),
            newly_marked,
            "interaction recorded"
        );
        Ok(InteractionOutcome::from_marked(newly_marked))
    }
}
