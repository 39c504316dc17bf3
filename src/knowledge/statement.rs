//! Statements: "exactly `count` of these cells are mines".
//!
//! A statement only ever shrinks. The engine purges cells from it as they
//! become known, and retires it once its cell set is empty.
//!
//! ```
//! use rust_minesweeper::core::Cell;
//! use rust_minesweeper::knowledge::Statement;
//!
//! let mut s = Statement::new([Cell::new(0, 0), Cell::new(0, 1)], 1);
//! assert!(s.known_mines().is_empty());
//!
//! s.mark_cell_as_safe(Cell::new(0, 0));
//! assert_eq!(s.known_mines().len(), 1);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// A constraint over a set of cells.
///
/// Equality and hashing cover both the cell set and the count. Cells are kept
/// sorted so equal statements hash equally regardless of insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    cells: BTreeSet<Cell>,
    count: i32,
}

impl Statement {
    /// Create a statement. Duplicate cells collapse.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: i32) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    /// Cells still undetermined by this statement.
    #[must_use]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Number of mines among `cells`.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// `0 <= count <= |cells|`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count >= 0 && self.count as usize <= self.cells.len()
    }

    /// Every cell, if the count says they must all be mines.
    #[must_use]
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.count != 0 && self.count as usize == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell, if the count is zero.
    #[must_use]
    pub fn known_safe(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Remove `cell` as a mine. Returns whether the statement changed.
    pub fn mark_cell_as_mine(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            self.count -= 1;
            true
        } else {
            false
        }
    }

    /// Remove `cell` as safe. Returns whether the statement changed.
    pub fn mark_cell_as_safe(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    #[must_use]
    pub fn is_subset(&self, other: &Statement) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Subset rule: if `self` is contained in `superset`, the cells only in
    /// `superset` hold exactly `superset.count - self.count` mines.
    ///
    /// Returns `None` when `self` is not a subset of `superset`.
    #[must_use]
    pub fn subtract_from(&self, superset: &Statement) -> Option<Statement> {
        if !self.is_subset(superset) {
            return None;
        }
        Some(Statement {
            cells: superset.cells.difference(&self.cells).copied().collect(),
            count: superset.count - self.count,
        })
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_known_mines_requires_full_count() {
        let all = Statement::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(all.known_mines().len(), 2);

        let partial = Statement::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(partial.known_mines().is_empty());
    }

    #[test]
    fn test_known_mines_empty_statement() {
        // count == |cells| == 0 says nothing about mines
        let empty = Statement::new(Vec::new(), 0);
        assert!(empty.known_mines().is_empty());
        assert!(empty.known_safe().is_empty());
    }

    #[test]
    fn test_known_safe_requires_zero() {
        let zero = Statement::new(cells(&[(1, 1), (1, 2), (2, 2)]), 0);
        assert_eq!(zero.known_safe().len(), 3);
        assert!(zero.known_mines().is_empty());

        let one = Statement::new(cells(&[(1, 1), (1, 2)]), 1);
        assert!(one.known_safe().is_empty());
    }

    #[test]
    fn test_mark_cell_as_mine() {
        let mut s = Statement::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);

        assert!(s.mark_cell_as_mine(Cell::new(0, 1)));
        assert_eq!(s.count(), 1);
        assert_eq!(s.len(), 2);

        // Non-member is a no-op
        assert!(!s.mark_cell_as_mine(Cell::new(5, 5)));
        assert_eq!(s.count(), 1);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_mark_cell_as_safe() {
        let mut s = Statement::new(cells(&[(0, 0), (0, 1)]), 1);

        assert!(s.mark_cell_as_safe(Cell::new(0, 0)));
        assert_eq!(s.count(), 1);
        assert_eq!(s.len(), 1);
        assert_eq!(s.known_mines(), [Cell::new(0, 1)].into_iter().collect());

        assert!(!s.mark_cell_as_safe(Cell::new(0, 0)));
    }

    #[test]
    fn test_consistency() {
        assert!(Statement::new(cells(&[(0, 0)]), 0).is_consistent());
        assert!(Statement::new(cells(&[(0, 0)]), 1).is_consistent());
        assert!(!Statement::new(cells(&[(0, 0)]), 2).is_consistent());
        assert!(!Statement::new(cells(&[(0, 0)]), -1).is_consistent());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Statement::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Statement::new(cells(&[(0, 1), (0, 0)]), 1);
        let c = Statement::new(cells(&[(0, 1), (0, 0)]), 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_subtract_from() {
        let a = Statement::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Statement::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1);

        let derived = a.subtract_from(&b).unwrap();
        assert_eq!(derived, Statement::new(cells(&[(0, 2)]), 0));
        assert_eq!(derived.known_safe().len(), 1);

        assert!(b.subtract_from(&a).is_none());
    }

    #[test]
    fn test_display() {
        let s = Statement::new(cells(&[(1, 0), (0, 2)]), 1);
        assert_eq!(s.to_string(), "{(0, 2), (1, 0)} = 1");
    }
}
