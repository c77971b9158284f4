use std::collections::BTreeMap;

use tracing::error;

use crate::env::RngStream;
use crate::error::{CoreError, ErrorSeverity};
use crate::generation::{CellularAutomataConfig, generate_cellular_automata};
use crate::state::{Position, WorldSlot, Zone};

/// Errors raised while turning a zone definition into tiles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("zone '{zone_id}' has an empty layout")]
    EmptyLayout { zone_id: String },

    #[error("zone '{zone_id}' row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        zone_id: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("zone '{zone_id}' has unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph {
        zone_id: String,
        glyph: char,
        x: usize,
        y: usize,
    },

    #[error("zone definition '{zone_id}' uses unsupported generator '{generator}'")]
    UnsupportedGenerator { zone_id: String, generator: String },

    #[error("invalid generated layout dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl CoreError for LayoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use LayoutError::*;
        match self {
            EmptyLayout { .. } => "LAYOUT_EMPTY",
            RaggedRow { .. } => "LAYOUT_RAGGED_ROW",
            UnknownGlyph { .. } => "LAYOUT_UNKNOWN_GLYPH",
            UnsupportedGenerator { .. } => "LAYOUT_UNSUPPORTED_GENERATOR",
            InvalidDimensions { .. } => "LAYOUT_INVALID_DIMENSIONS",
        }
    }
}

/// Where a zone's tiles come from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutSpec {
    /// Hand-authored rows of `#`, `.` and `L`.
    Static { rows: Vec<String> },
    /// Procedural terrain from a named generator.
    Generated {
        generator: String,
        #[cfg_attr(feature = "serde", serde(default))]
        config: CellularAutomataConfig,
    },
}

/// Terrain recipe for a zone template or a specific zone id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDefinition {
    pub id: String,
    pub layout: LayoutSpec,
    /// Preferred entry tile; ignored unless walkable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry: Option<Position>,
}

impl ZoneDefinition {
    pub const CELLULAR_AUTOMATA: &'static str = "cellular_automata";

    pub fn static_layout<S: Into<String>>(
        id: impl Into<String>,
        rows: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: id.into(),
            layout: LayoutSpec::Static {
                rows: rows.into_iter().map(Into::into).collect(),
            },
            entry: None,
        }
    }

    pub fn cellular_automata(id: impl Into<String>, config: CellularAutomataConfig) -> Self {
        Self {
            id: id.into(),
            layout: LayoutSpec::Generated {
                generator: Self::CELLULAR_AUTOMATA.to_string(),
                config,
            },
            entry: None,
        }
    }

    pub fn with_entry(mut self, entry: Position) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Builds layout rows, then the zone itself, under `zone_id`.
    pub fn build_zone(&self, zone_id: &str, rng: &mut dyn RngStream) -> Result<Zone, LayoutError> {
        let rows = generate_layout_from_definition(self, rng)?;
        Zone::from_layout(zone_id, &rows, self.entry)
    }
}

/// Produces layout rows for a definition. Static layouts ignore `rng`.
///
/// # Errors
///
/// An unrecognized generator name is an authoring bug: it is logged and
/// returned as [`LayoutError::UnsupportedGenerator`].
pub fn generate_layout_from_definition(
    definition: &ZoneDefinition,
    rng: &mut dyn RngStream,
) -> Result<Vec<String>, LayoutError> {
    match &definition.layout {
        LayoutSpec::Static { rows } => Ok(rows.clone()),
        LayoutSpec::Generated { generator, config }
            if generator == ZoneDefinition::CELLULAR_AUTOMATA =>
        {
            generate_cellular_automata(config, rng)
        }
        LayoutSpec::Generated { generator, .. } => {
            error!(
                zone_id = %definition.id,
                generator = %generator,
                "unsupported zone generator"
            );
            Err(LayoutError::UnsupportedGenerator {
                zone_id: definition.id.clone(),
                generator: generator.clone(),
            })
        }
    }
}

/// Zone definitions keyed by template id or zone id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoneDefinitionRegistry {
    definitions: BTreeMap<String, ZoneDefinition>,
}

impl ZoneDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: ZoneDefinition) -> Option<ZoneDefinition> {
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn get(&self, id: &str) -> Option<&ZoneDefinition> {
        self.definitions.get(id)
    }

    /// Template id first, then the zone id. `None` means default terrain.
    pub fn resolve(&self, slot: &WorldSlot) -> Option<&ZoneDefinition> {
        slot.template_id
            .as_deref()
            .and_then(|template_id| self.get(template_id))
            .or_else(|| self.get(&slot.zone_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
