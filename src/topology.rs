use serde::{Deserialize, Serialize};

use crate::{Cell, Coord};

/// Row/column displacement applied to a cell.
type Offset = (i8, i8);

const ORTHOGONAL: [Offset; 4] = [
    (-1, 0), // up
    (1, 0),  // down
    (0, -1), // left
    (0, 1),  // right
];

// Offset-hex rows interleave like brickwork: even rows reach their diagonal
// pair through the column to the left, odd rows through the column to the
// right.
const HEX_EVEN: [Offset; 6] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1), // upper-left
    (1, -1),  // lower-left
];

const HEX_ODD: [Offset; 6] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1), // upper-right
    (1, 1),  // lower-right
];

/// Adjacency rule deciding which cells count as neighbors of a given cell.
/// Fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Topology {
    /// 4-neighbor adjacency: up, down, left, right.
    Orthogonal,
    /// 6-neighbor brick/hex adjacency: the orthogonal moves plus two
    /// diagonals selected by row parity.
    HexOffset,
}

impl Topology {
    /// Upper bound on how many neighbors any cell can have.
    pub const MAX_NEIGHBORS: usize = 6;

    fn offsets(self, row: Coord) -> &'static [Offset] {
        match self {
            Self::Orthogonal => &ORTHOGONAL,
            Self::HexOffset => {
                if row % 2 == 0 {
                    &HEX_EVEN
                } else {
                    &HEX_ODD
                }
            }
        }
    }

    /// Iterates the in-bounds neighbors of `cell` on a `width` x `height`
    /// grid.
    pub fn neighbors(self, cell: Cell, width: Coord, height: Coord) -> NeighborIter {
        NeighborIter {
            offsets: self.offsets(cell.row),
            center: cell,
            width,
            height,
            index: 0,
        }
    }

    /// Whether `b` is reachable from `a` in a single move. Independent of
    /// any grid bounds.
    pub fn are_adjacent(self, a: Cell, b: Cell) -> bool {
        self.offsets(a.row).iter().any(|&(dr, dc)| {
            a.row.checked_add_signed(dr) == Some(b.row)
                && a.col.checked_add_signed(dc) == Some(b.col)
        })
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::Orthogonal
    }
}

/// Applies `delta` to `cell`, returning a value only when it remains in
/// bounds.
fn apply_delta(cell: Cell, (dr, dc): Offset, width: Coord, height: Coord) -> Option<Cell> {
    let row = cell.row.checked_add_signed(dr)?;
    if row >= height {
        return None;
    }

    let col = cell.col.checked_add_signed(dc)?;
    if col >= width {
        return None;
    }

    Some(Cell::new(row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    offsets: &'static [Offset],
    center: Cell,
    width: Coord,
    height: Coord,
    index: u8,
}

impl Iterator for NeighborIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= self.offsets.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                self.offsets[self.index as usize],
                self.width,
                self.height,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn neighbors_of(topology: Topology, cell: Cell) -> Vec<Cell> {
        topology.neighbors(cell, 5, 5).collect()
    }

    #[test]
    fn orthogonal_interior_cell_has_four_neighbors() {
        let n = neighbors_of(Topology::Orthogonal, Cell::new(2, 2));

        assert_eq!(n.len(), 4);
        assert!(n.contains(&Cell::new(1, 2)));
        assert!(n.contains(&Cell::new(3, 2)));
        assert!(n.contains(&Cell::new(2, 1)));
        assert!(n.contains(&Cell::new(2, 3)));
    }

    #[test]
    fn orthogonal_corner_is_bounds_filtered() {
        let n = neighbors_of(Topology::Orthogonal, Cell::new(0, 0));

        assert_eq!(n.len(), 2);
        assert!(n.contains(&Cell::new(1, 0)));
        assert!(n.contains(&Cell::new(0, 1)));
    }

    #[test]
    fn hex_even_row_reaches_left_diagonals() {
        let n = neighbors_of(Topology::HexOffset, Cell::new(2, 2));

        assert_eq!(n.len(), 6);
        assert!(n.contains(&Cell::new(1, 1)));
        assert!(n.contains(&Cell::new(3, 1)));
        assert!(!n.contains(&Cell::new(1, 3)));
        assert!(!n.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn hex_odd_row_reaches_right_diagonals() {
        let n = neighbors_of(Topology::HexOffset, Cell::new(3, 2));

        assert_eq!(n.len(), 6);
        assert!(n.contains(&Cell::new(2, 3)));
        assert!(n.contains(&Cell::new(4, 3)));
        assert!(!n.contains(&Cell::new(2, 1)));
        assert!(!n.contains(&Cell::new(4, 1)));
    }

    #[test]
    fn hex_origin_keeps_only_in_bounds_moves() {
        // (0, 0) sits on an even row, both diagonals point off the grid.
        let n = neighbors_of(Topology::HexOffset, Cell::new(0, 0));

        assert_eq!(n.len(), 2);
        assert!(n.contains(&Cell::new(1, 0)));
        assert!(n.contains(&Cell::new(0, 1)));
    }

    #[test]
    fn adjacency_is_symmetric_on_both_topologies() {
        for topology in [Topology::Orthogonal, Topology::HexOffset] {
            for row in 0..4 {
                for col in 0..4 {
                    let cell = Cell::new(row, col);
                    for neighbor in topology.neighbors(cell, 4, 4) {
                        assert!(topology.are_adjacent(cell, neighbor));
                        assert!(topology.are_adjacent(neighbor, cell));
                        let back: Vec<Cell> = topology.neighbors(neighbor, 4, 4).collect();
                        assert!(back.contains(&cell));
                    }
                }
            }
        }
    }

    #[test]
    fn a_cell_is_not_adjacent_to_itself_or_distant_cells() {
        for topology in [Topology::Orthogonal, Topology::HexOffset] {
            assert!(!topology.are_adjacent(Cell::new(1, 1), Cell::new(1, 1)));
            assert!(!topology.are_adjacent(Cell::new(0, 0), Cell::new(2, 2)));
        }
    }

    #[test]
    fn orthogonal_never_yields_diagonals() {
        assert!(!Topology::Orthogonal.are_adjacent(Cell::new(2, 2), Cell::new(1, 1)));
        assert!(!Topology::Orthogonal.are_adjacent(Cell::new(3, 2), Cell::new(2, 3)));
    }
}
