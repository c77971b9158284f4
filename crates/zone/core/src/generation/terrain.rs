//! Cellular-automaton terrain.
//!
//! 1. Seed a `width x height` grid. Border cells are walls when
//!    `border_is_wall`; every other cell is a wall with probability
//!    `fill_chance`, drawn in row-major order.
//! 2. Smooth `smooth_iterations` times. Each non-forced cell counts walls
//!    among its eight neighbours (outside the grid counts as wall) and
//!    becomes a wall above 4, walkable below 4, and keeps its value at 4.
//!
//! No connectivity pass is made. Disconnected pockets are a property of the
//! output, not a defect.
use crate::env::RngStream;
use crate::generation::LayoutError;
use crate::state::TileKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CellularAutomataConfig {
    pub width: u32,
    pub height: u32,
    pub fill_chance: f64,
    pub smooth_iterations: u32,
    pub border_is_wall: bool,
}

impl CellularAutomataConfig {
    pub const DEFAULT_WIDTH: u32 = 20;
    pub const DEFAULT_HEIGHT: u32 = 20;
    pub const DEFAULT_FILL_CHANCE: f64 = 0.45;
    pub const DEFAULT_SMOOTH_ITERATIONS: u32 = 4;

    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for CellularAutomataConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            fill_chance: Self::DEFAULT_FILL_CHANCE,
            smooth_iterations: Self::DEFAULT_SMOOTH_ITERATIONS,
            border_is_wall: true,
        }
    }
}

/// Wall grid, `cells[y][x] == true` for walls.
struct WallGrid {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
    border_is_wall: bool,
}

impl WallGrid {
    fn is_forced(&self, x: usize, y: usize) -> bool {
        self.border_is_wall
            && (x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height)
    }

    fn wall_neighbours(&self, x: usize, y: usize) -> u32 {
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                let outside =
                    nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64;
                if outside || self.cells[ny as usize][nx as usize] {
                    count += 1;
                }
            }
        }
        count
    }

    fn smooth(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        if self.is_forced(x, y) {
                            return true;
                        }
                        match self.wall_neighbours(x, y) {
                            walls if walls > 4 => true,
                            walls if walls < 4 => false,
                            _ => self.cells[y][x],
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn into_rows(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|wall| {
                        if wall {
                            TileKind::WALL_GLYPH
                        } else {
                            TileKind::WALKABLE_GLYPH
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Generates layout rows of `#` and `.`.
///
/// # Errors
///
/// [`LayoutError::InvalidDimensions`] when either side is zero.
pub fn generate_cellular_automata(
    config: &CellularAutomataConfig,
    rng: &mut dyn RngStream,
) -> Result<Vec<String>, LayoutError> {
    if config.width == 0 || config.height == 0 {
        return Err(LayoutError::InvalidDimensions {
            width: config.width,
            height: config.height,
        });
    }

    let mut grid = WallGrid {
        width: config.width as usize,
        height: config.height as usize,
        cells: Vec::with_capacity(config.height as usize),
        border_is_wall: config.border_is_wall,
    };
    for y in 0..grid.height {
        let row = (0..grid.width)
            .map(|x| grid.is_forced(x, y) || rng.next_float() < config.fill_chance)
            .collect();
        grid.cells.push(row);
    }

    for _ in 0..config.smooth_iterations {
        grid.cells = grid.smooth();
    }

    Ok(grid.into_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgStream;

    fn generate(seed: &str, config: &CellularAutomataConfig) -> Vec<String> {
        generate_cellular_automata(config, &mut PcgStream::from_seed(seed)).unwrap()
    }

    #[test]
    fn same_seed_same_grid() {
        let config = CellularAutomataConfig::sized(32, 24);
        assert_eq!(generate("cave", &config), generate("cave", &config));
        assert_ne!(generate("cave", &config), generate("other", &config));
    }

    #[test]
    fn dimensions_and_border() {
        let config = CellularAutomataConfig::sized(12, 7);
        let rows = generate("border", &config);
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.len() == 12));
        assert!(rows[0].chars().all(|c| c == '#'));
        assert!(rows[6].chars().all(|c| c == '#'));
        assert!(rows.iter().all(|row| row.starts_with('#') && row.ends_with('#')));
    }

    #[test]
    fn zero_fill_without_smoothing_is_open_inside() {
        let config = CellularAutomataConfig {
            fill_chance: 0.0,
            smooth_iterations: 0,
            ..CellularAutomataConfig::sized(5, 4)
        };
        assert_eq!(generate("open", &config), vec!["#####", "#...#", "#...#", "#####"]);
    }

    #[test]
    fn full_fill_stays_solid() {
        let config = CellularAutomataConfig {
            fill_chance: 1.0,
            border_is_wall: false,
            ..CellularAutomataConfig::sized(6, 6)
        };
        assert!(generate("solid", &config).iter().all(|row| row == "######"));
    }

    #[test]
    fn border_cells_consume_no_draws() {
        // A 2x2 bordered grid is all border; the stream must be untouched.
        let config = CellularAutomataConfig::sized(2, 2);
        let mut rng = PcgStream::from_seed("untouched");
        let before = rng.clone();
        generate_cellular_automata(&config, &mut rng).unwrap();
        assert_eq!(rng, before);
    }

    fn grid(rows: &[&str], border_is_wall: bool) -> WallGrid {
        WallGrid {
            width: rows[0].len(),
            height: rows.len(),
            cells: rows
                .iter()
                .map(|row| row.chars().map(|c| c == '#').collect())
                .collect(),
            border_is_wall,
        }
    }

    #[test]
    fn smoothing_thresholds() {
        // Centre cell of a 3x3 grid; the border is not forced.
        let cases = [
            // 5 walls around an open cell: becomes a wall.
            (["###", "#.#", "..."], 5, false, true),
            // 3 walls around a wall: opens up.
            (["###", ".#.", "..."], 3, true, false),
            // Exactly 4 walls keeps the current value either way.
            (["###", "#..", "..."], 4, false, false),
            (["###", "##.", "..."], 4, true, true),
        ];
        for (rows, walls, before, after) in cases {
            let grid = grid(&rows, false);
            assert_eq!(grid.wall_neighbours(1, 1), walls, "{rows:?}");
            assert_eq!(grid.cells[1][1], before, "{rows:?}");
            assert_eq!(grid.smooth()[1][1], after, "{rows:?}");
        }
    }

    #[test]
    fn off_grid_neighbours_count_as_walls() {
        // Corner (0, 0) sees 5 off-grid walls and 3 open cells.
        let grid = grid(&["...", "...", "..."], false);
        assert_eq!(grid.wall_neighbours(0, 0), 5);
        assert_eq!(grid.wall_neighbours(1, 0), 3);
        assert_eq!(grid.wall_neighbours(1, 1), 0);

        let smoothed = grid.smooth();
        assert!(smoothed[0][0], "corner closes");
        assert!(!smoothed[0][1], "edge stays open");
        assert!(!smoothed[1][1], "centre stays open");
    }

    #[test]
    fn forced_border_ignores_neighbours() {
        let grid = grid(&["...", "...", "..."], true);
        let smoothed = grid.smooth();
        assert_eq!(smoothed[0], vec![true, true, true]);
        assert_eq!(smoothed[1], vec![true, false, true]);
    }

    #[test]
    fn rejects_empty_dimensions() {
        let config = CellularAutomataConfig::sized(0, 10);
        assert!(matches!(
            generate_cellular_automata(&config, &mut PcgStream::from_seed("x")),
            Err(LayoutError::InvalidDimensions { width: 0, height: 10 })
        ));
    }
}
