//! Transient zone projection: terrain tiles plus placed content.
//!
//! A [`Zone`] is never persisted. It is rebuilt from its world slot and
//! definition on every entry, then the zone's delta is overlaid on top.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::generation::LayoutError;
use crate::state::Position;

/// Terrain class of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileKind {
    Walkable,
    Wall,
    Locked,
}

impl TileKind {
    pub const WALKABLE_GLYPH: char = '.';
    pub const WALL_GLYPH: char = '#';
    pub const LOCKED_GLYPH: char = 'L';

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            Self::WALKABLE_GLYPH => Some(Self::Walkable),
            Self::WALL_GLYPH => Some(Self::Wall),
            Self::LOCKED_GLYPH => Some(Self::Locked),
            _ => None,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Walkable => Self::WALKABLE_GLYPH,
            Self::Wall => Self::WALL_GLYPH,
            Self::Locked => Self::LOCKED_GLYPH,
        }
    }

    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Walkable)
    }
}

/// The four kinds of placeable content, in population order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ContentKind {
    ResourceNodes,
    Entities,
    Pois,
    Locations,
}

impl ContentKind {
    /// Population order. Earlier kinds can crowd out later ones, so this
    /// order is part of the determinism contract.
    pub fn in_order() -> impl Iterator<Item = ContentKind> {
        Self::iter()
    }

    /// Key used in instance ids and definition registries (`resourceNodes`).
    pub fn key(self) -> &'static str {
        match self {
            Self::ResourceNodes => "resourceNodes",
            Self::Entities => "entities",
            Self::Pois => "pois",
            Self::Locations => "locations",
        }
    }

    /// Label appended to the zone seed for this kind's RNG stream.
    pub const fn seed_label(self) -> &'static str {
        match self {
            Self::ResourceNodes => "resources",
            Self::Entities => "entities",
            Self::Pois => "pois",
            Self::Locations => "locations",
        }
    }
}

/// Per-tile pointers to the content instance occupying it, one slot per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TileContent {
    pub resource_node_id: Option<String>,
    pub entity_id: Option<String>,
    pub poi_id: Option<String>,
    pub location_id: Option<String>,
}

impl TileContent {
    pub fn slot(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::ResourceNodes => self.resource_node_id.as_deref(),
            ContentKind::Entities => self.entity_id.as_deref(),
            ContentKind::Pois => self.poi_id.as_deref(),
            ContentKind::Locations => self.location_id.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ContentKind, instance_id: impl Into<String>) {
        let slot = match kind {
            ContentKind::ResourceNodes => &mut self.resource_node_id,
            ContentKind::Entities => &mut self.entity_id,
            ContentKind::Pois => &mut self.poi_id,
            ContentKind::Locations => &mut self.location_id,
        };
        *slot = Some(instance_id.into());
    }

    pub fn is_empty(&self) -> bool {
        ContentKind::in_order().all(|kind| self.slot(kind).is_none())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    /// The only terrain-level flag restored from the zone delta.
    pub explored: bool,
    pub content: TileContent,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            explored: false,
            content: TileContent::default(),
        }
    }
}

/// One concrete placed object.
///
/// The id is `kind_defId_x_y`, so the same seed reproduces the same identity
/// at the same position; deltas keyed by id reattach after regeneration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentInstance {
    pub id: String,
    pub def_id: String,
    pub kind: ContentKind,
    pub x: i32,
    pub y: i32,
    /// Interaction flags (`harvested`, `defeated`, ...). Seeded from the
    /// definition's defaults, then overlaid by the delta reconciler.
    pub state: BTreeMap<String, bool>,
}

impl ContentInstance {
    pub fn make_id(kind: ContentKind, def_id: &str, position: Position) -> String {
        format!("{}_{}_{}_{}", kind.key(), def_id, position.x, position.y)
    }

    pub fn new(
        kind: ContentKind,
        def_id: impl Into<String>,
        position: Position,
        state: BTreeMap<String, bool>,
    ) -> Self {
        let def_id = def_id.into();
        Self {
            id: Self::make_id(kind, &def_id, position),
            def_id,
            kind,
            x: position.x,
            y: position.y,
            state,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Reads an interaction flag; absent flags are `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.state.get(key).copied().unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneContent {
    pub resource_nodes: Vec<ContentInstance>,
    pub entities: Vec<ContentInstance>,
    pub pois: Vec<ContentInstance>,
    pub locations: Vec<ContentInstance>,
}

impl ZoneContent {
    pub fn of(&self, kind: ContentKind) -> &[ContentInstance] {
        match kind {
            ContentKind::ResourceNodes => &self.resource_nodes,
            ContentKind::Entities => &self.entities,
            ContentKind::Pois => &self.pois,
            ContentKind::Locations => &self.locations,
        }
    }

    pub fn of_mut(&mut self, kind: ContentKind) -> &mut Vec<ContentInstance> {
        match kind {
            ContentKind::ResourceNodes => &mut self.resource_nodes,
            ContentKind::Entities => &mut self.entities,
            ContentKind::Pois => &mut self.pois,
            ContentKind::Locations => &mut self.locations,
        }
    }

    pub fn is_empty(&self) -> bool {
        ContentKind::in_order().all(|kind| self.of(kind).is_empty())
    }

    pub fn len(&self) -> usize {
        ContentKind::in_order().map(|kind| self.of(kind).len()).sum()
    }

    /// Iterates every instance of every kind, in population order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentInstance> {
        ContentKind::in_order().flat_map(move |kind| self.of(kind).iter())
    }

    pub fn find(&self, kind: ContentKind, instance_id: &str) -> Option<&ContentInstance> {
        self.of(kind).iter().find(|inst| inst.id == instance_id)
    }
}

/// Exploration progress over walkable tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExplorationStats {
    pub explored_tiles: u32,
    pub total_explorable_tiles: u32,
    /// Floored percentage; 100 when there is nothing to explore.
    pub percent_explored: u32,
    pub is_complete: bool,
}

/// One generated, playable area.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Zone {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Row-major: `tiles[y][x]`.
    pub tiles: Vec<Vec<Tile>>,
    pub entry_spawn: Option<Position>,
    pub content: ZoneContent,
}

impl Zone {
    /// Builds a zone from layout rows (`#` wall, `.` walkable, `L` locked).
    ///
    /// `entry` is honoured when it names a walkable tile; otherwise the entry
    /// is the walkable tile nearest the grid centre (Manhattan distance,
    /// row-major tie break).
    pub fn from_layout<S: AsRef<str>>(
        id: impl Into<String>,
        rows: &[S],
        entry: Option<Position>,
    ) -> Result<Self, LayoutError> {
        let id = id.into();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(LayoutError::EmptyLayout { zone_id: id });
        }

        let mut tiles = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(LayoutError::RaggedRow {
                    zone_id: id,
                    row: y,
                    expected: width,
                    found: len,
                });
            }
            let parsed = row
                .chars()
                .enumerate()
                .map(|(x, glyph)| {
                    TileKind::from_glyph(glyph)
                        .map(Tile::new)
                        .ok_or_else(|| LayoutError::UnknownGlyph {
                            zone_id: id.clone(),
                            glyph,
                            x,
                            y,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(parsed);
        }

        let mut zone = Self {
            id,
            width: width as u32,
            height: rows.len() as u32,
            tiles,
            entry_spawn: None,
            content: ZoneContent::default(),
        };
        zone.entry_spawn = entry
            .filter(|pos| zone.is_walkable(*pos))
            .or_else(|| zone.nearest_walkable_to_center());
        Ok(zone)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if !self.contains(position) {
            return None;
        }
        self.tiles
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if !self.contains(position) {
            return None;
        }
        self.tiles
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.kind.is_walkable())
    }

    /// Out-of-grid positions are not walls here; only real wall tiles count.
    pub fn is_wall(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.kind == TileKind::Wall)
    }

    /// All walkable positions in row-major scan order.
    pub fn walkable_positions(&self) -> Vec<Position> {
        let mut out = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if tile.kind.is_walkable() {
                    out.push(Position::new(x as i32, y as i32));
                }
            }
        }
        out
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| tile.kind.is_walkable())
            .count()
    }

    /// Number of orthogonally adjacent wall tiles (0..=4).
    pub fn count_adjacent_walls(&self, position: Position) -> u32 {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter(|(dx, dy)| self.is_wall(Position::new(position.x + dx, position.y + dy)))
            .count() as u32
    }

    fn nearest_walkable_to_center(&self) -> Option<Position> {
        let center = Position::new(self.width as i32 / 2, self.height as i32 / 2);
        // min_by_key keeps the first minimum, which gives the row-major tie break.
        self.walkable_positions()
            .into_iter()
            .min_by_key(|pos| pos.manhattan(center))
    }

    /// Layout rows using the tile glyphs.
    pub fn render_layout(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.kind.glyph()).collect())
            .collect()
    }

    pub fn exploration_stats(&self) -> ExplorationStats {
        let (explored, total) = self
            .tiles
            .iter()
            .flatten()
            .filter(|tile| tile.kind.is_walkable())
            .fold((0u32, 0u32), |(explored, total), tile| {
                (explored + u32::from(tile.explored), total + 1)
            });
        let percent_explored = if total == 0 {
            100
        } else {
            ((u64::from(explored) * 100) / u64::from(total)) as u32
        };
        ExplorationStats {
            explored_tiles: explored,
            total_explorable_tiles: total,
            percent_explored,
            is_complete: explored >= total,
        }
    }
}
