//! Grid coordinates.
//!
//! A `Cell` is a plain `(row, col)` value. It carries no identity and no
//! knowledge of the board it lives on; bounds are always supplied by the
//! caller (usually from a `BoardConfig`).
//!
//! ## Usage
//!
//! ```
//! use rust_minesweeper::core::Cell;
//!
//! let corner = Cell::new(0, 0);
//! let neighbors = corner.neighbors(8, 8);
//!
//! assert_eq!(neighbors.len(), 3);
//! assert!(neighbors.contains(&Cell::new(1, 1)));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Up to eight in-bounds neighbors, stored inline.
pub type Neighbors = SmallVec<[Cell; 8]>;

/// A `(row, col)` coordinate on the grid.
///
/// Ordered row-major, so sorted collections of cells read top-to-bottom,
/// left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether this cell lies on a `height` x `width` grid.
    #[must_use]
    pub const fn in_bounds(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// The 8-connected neighborhood of this cell, clipped to the grid.
    ///
    /// The cell itself is never included. Neighbors come back in row-major
    /// order.
    #[must_use]
    pub fn neighbors(self, height: usize, width: usize) -> Neighbors {
        let mut out = Neighbors::new();
        let row_lo = self.row.saturating_sub(1);
        let col_lo = self.col.saturating_sub(1);
        let row_hi = (self.row + 1).min(height.saturating_sub(1));
        let col_hi = (self.col + 1).min(width.saturating_sub(1));

        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let neighbor = Cell::new(row, col);
                if neighbor != self && neighbor.in_bounds(height, width) {
                    out.push(neighbor);
                }
            }
        }
        out
    }

    /// Iterate over every cell of a `height` x `width` grid in row-major order.
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
