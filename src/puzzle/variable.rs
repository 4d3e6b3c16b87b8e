#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Slot identity for the crossword CSP.
//!
//! A [`Variable`] names one fillable run of cells in the grid: its starting
//! coordinates, its fixed length, and whether it runs across or down. Identity
//! is value-based, so two variables describing the same run compare equal, and
//! the derived `Ord` gives the deterministic tie-break order used by the
//! search heuristics.

use smallvec::SmallVec;
use std::fmt;

/// Orientation of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Cell coordinates of a slot, in word order.
pub type Cells = SmallVec<[(usize, usize); 16]>;

/// One slot of the puzzle: start cell, fixed length, direction.
///
/// Immutable once created by the puzzle model. The field order matters for
/// the derived `Ord`: ties in the search heuristics fall back to comparing
/// `(row, col, length, direction)`, which is stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Number of cells the slot spans.
    pub length: usize,
    /// Orientation of the slot.
    pub direction: Direction,
}

impl Variable {
    #[must_use]
    pub const fn new(row: usize, col: usize, length: usize, direction: Direction) -> Self {
        Self {
            row,
            col,
            length,
            direction,
        }
    }

    /// The grid cells covered by this slot, first letter first.
    #[must_use]
    pub fn cells(&self) -> Cells {
        (0..self.length)
            .map(|k| match self.direction {
                Direction::Across => (self.row, self.col + k),
                Direction::Down => (self.row + k, self.col),
            })
            .collect()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} [{}]",
            self.row, self.col, self.direction, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_across() {
        let var = Variable::new(2, 1, 3, Direction::Across);
        let cells: Vec<_> = var.cells().into_iter().collect();
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_cells_down() {
        let var = Variable::new(0, 4, 2, Direction::Down);
        let cells: Vec<_> = var.cells().into_iter().collect();
        assert_eq!(cells, vec![(0, 4), (1, 4)]);
    }

    #[test]
    fn test_value_identity() {
        let a = Variable::new(1, 1, 4, Direction::Down);
        let b = Variable::new(1, 1, 4, Direction::Down);
        assert_eq!(a, b);
        assert_ne!(a, Variable::new(1, 1, 4, Direction::Across));
    }

    #[test]
    fn test_ordering_is_positional() {
        let mut vars = vec![
            Variable::new(1, 0, 3, Direction::Across),
            Variable::new(0, 2, 3, Direction::Down),
            Variable::new(0, 0, 3, Direction::Across),
        ];
        vars.sort_unstable();
        assert_eq!(vars[0], Variable::new(0, 0, 3, Direction::Across));
        assert_eq!(vars[1], Variable::new(0, 2, 3, Direction::Down));
        assert_eq!(vars[2], Variable::new(1, 0, 3, Direction::Across));
    }
}
