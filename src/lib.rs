#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use session::*;
pub use topology::*;
pub use types::*;

mod error;
mod generator;
mod session;
mod topology;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub path_len: CellCount,
    pub topology: Topology,
}

impl GameConfig {
    pub const fn new_unchecked(
        width: Coord,
        height: Coord,
        path_len: CellCount,
        topology: Topology,
    ) -> Self {
        Self {
            width,
            height,
            path_len,
            topology,
        }
    }

    /// Clamps the dimensions to at least 1x1 and the path length to
    /// `1..=width * height`.
    pub fn new(width: Coord, height: Coord, path_len: CellCount, topology: Topology) -> Self {
        let width = width.clamp(1, Coord::MAX);
        let height = height.clamp(1, Coord::MAX);
        let path_len = path_len.clamp(1, mult(width, height));
        Self::new_unchecked(width, height, path_len, topology)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(10, 10, 10, Topology::default())
    }
}

/// Addressable board the game is played on. Every slot stores its own
/// coordinates, so presentation layers can map over the grid directly.
/// Rebuilt wholesale whenever the dimensions change, never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds a `width` x `height` grid, refusing zero dimensions.
    /// [`GameConfig::new`] clamps upstream, so configs built through it
    /// never trip that.
    pub fn build(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimension);
        }

        let cells = Array2::from_shape_fn((usize::from(height), usize::from(width)), |(r, c)| {
            Cell::new(r as Coord, c as Coord)
        });
        Ok(Self { cells })
    }

    pub fn width(&self) -> Coord {
        self.cells.dim().1.try_into().unwrap()
    }

    pub fn height(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height() && cell.col < self.width()
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<Cell> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, row: Coord, col: Coord) -> Option<Cell> {
        self.cells.get(Cell::new(row, col).to_nd_index()).copied()
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

/// The secret sequence the player has to reproduce: a self-avoiding walk
/// whose consecutive cells are adjacent under the session topology.
/// Generated once per game start and immutable afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Validates `cells` as a self-avoiding walk on a `width` x `height`
    /// grid under `topology`. Out-of-bounds cells are rejected as
    /// [`GameError::InvalidCoords`], revisits and non-adjacent consecutive
    /// pairs as [`GameError::InvalidPath`].
    pub fn from_cells(
        width: Coord,
        height: Coord,
        topology: Topology,
        cells: Vec<Cell>,
    ) -> Result<Self> {
        let mut seen: HashSet<Cell> = HashSet::with_capacity(cells.len());
        for (i, &cell) in cells.iter().enumerate() {
            if cell.row >= height || cell.col >= width {
                return Err(GameError::InvalidCoords);
            }
            if !seen.insert(cell) {
                return Err(GameError::InvalidPath);
            }
            if i > 0 && !topology.are_adjacent(cells[i - 1], cell) {
                return Err(GameError::InvalidPath);
            }
        }
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

/// Outcome of submitting one guessed cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// Correct cell, path not complete yet.
    Progress,
    /// Correct final cell, the session is now won.
    Won,
    /// Wrong cell, the session is now lost.
    Miss,
}

impl GuessOutcome {
    /// Whether this outcome moved the session into a terminal state.
    pub const fn ends_game(self) -> bool {
        match self {
            Self::Progress => false,
            Self::Won => true,
            Self::Miss => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn build_populates_every_cell_with_its_own_coordinates() {
        let grid = Grid::build(4, 3).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.total_cells(), 12);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(grid.cell_at(row, col), Some(Cell::new(row, col)));
            }
        }

        let unique: HashSet<Cell> = grid.iter().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn grid_iterates_row_major() {
        let grid = Grid::build(3, 2).unwrap();
        let cells: Vec<Cell> = grid.iter().collect();

        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[2], Cell::new(0, 2));
        assert_eq!(cells[3], Cell::new(1, 0));
    }

    #[test]
    fn zero_dimensions_are_refused() {
        assert_eq!(Grid::build(0, 5), Err(GameError::InvalidDimension));
        assert_eq!(Grid::build(5, 0), Err(GameError::InvalidDimension));
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        let grid = Grid::build(3, 3).unwrap();

        assert!(grid.contains(Cell::new(2, 2)));
        assert!(!grid.contains(Cell::new(3, 0)));
        assert_eq!(
            grid.validate_cell(Cell::new(0, 3)),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(grid.cell_at(9, 9), None);
    }

    #[test]
    fn config_clamps_degenerate_values() {
        let config = GameConfig::new(0, 0, 0, Topology::Orthogonal);

        assert_eq!(config.width, 1);
        assert_eq!(config.height, 1);
        assert_eq!(config.path_len, 1);
    }

    #[test]
    fn config_caps_path_length_at_the_cell_count() {
        let config = GameConfig::new(3, 3, 200, Topology::Orthogonal);

        assert_eq!(config.path_len, 9);
        assert_eq!(config.total_cells(), 9);
    }

    #[test]
    fn config_defaults_match_the_classic_setup() {
        let config = GameConfig::default();

        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
        assert_eq!(config.path_len, 10);
        assert_eq!(config.topology, Topology::Orthogonal);
    }

    #[test]
    fn unchecked_config_keeps_raw_values() {
        let config = GameConfig::new_unchecked(0, 2, 99, Topology::HexOffset);

        assert_eq!(config.width, 0);
        assert_eq!(config.path_len, 99);
    }

    #[test]
    fn path_from_cells_accepts_a_valid_walk() {
        let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)].to_vec();
        let path = Path::from_cells(3, 3, Topology::Orthogonal, cells).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.get(1), Some(Cell::new(0, 1)));
    }

    #[test]
    fn path_from_cells_rejects_out_of_bounds() {
        let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)].to_vec();

        assert_eq!(
            Path::from_cells(2, 2, Topology::Orthogonal, cells),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn path_from_cells_rejects_revisits() {
        let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 0)].to_vec();

        assert_eq!(
            Path::from_cells(3, 3, Topology::Orthogonal, cells),
            Err(GameError::InvalidPath)
        );
    }

    #[test]
    fn path_from_cells_rejects_non_adjacent_steps() {
        let diagonal = [Cell::new(0, 1), Cell::new(1, 0)].to_vec();

        // A parity diagonal is a legal hex move but not an orthogonal one.
        assert_eq!(
            Path::from_cells(3, 3, Topology::Orthogonal, diagonal.clone()),
            Err(GameError::InvalidPath)
        );
        assert!(Path::from_cells(3, 3, Topology::HexOffset, diagonal).is_ok());
    }
}
