//! The statement collection.
//!
//! `KnowledgeBase` keeps statements in insertion order alongside a hash index
//! so membership checks are O(1) and duplicates never accumulate. Purging a
//! cell can make two statements equal; the purged copy is dropped when that
//! happens.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::core::{Cell, KnowledgeError};

use super::statement::Statement;

/// Ordered, duplicate-free collection of statements.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    statements: Vec<Statement>,
    index: FxHashSet<Statement>,
}

impl KnowledgeBase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.index.contains(statement)
    }

    /// Statements in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Append a statement unless an equal one is already present.
    ///
    /// Returns whether it was added.
    pub fn insert(&mut self, statement: Statement) -> bool {
        if self.index.contains(&statement) {
            return false;
        }
        self.index.insert(statement.clone());
        self.statements.push(statement);
        true
    }

    /// Remove `cell` from every statement as a mine.
    ///
    /// Returns the number of statements that changed.
    pub fn purge_mine(&mut self, cell: Cell) -> usize {
        self.purge(cell, Statement::mark_cell_as_mine)
    }

    /// Remove `cell` from every statement as safe.
    ///
    /// Returns the number of statements that changed.
    pub fn purge_safe(&mut self, cell: Cell) -> usize {
        self.purge(cell, Statement::mark_cell_as_safe)
    }

    /// Union of `known_safe()` over all statements.
    #[must_use]
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        self.statements.iter().flat_map(|s| s.known_safe()).collect()
    }

    /// Union of `known_mines()` over all statements.
    #[must_use]
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        self.statements.iter().flat_map(|s| s.known_mines()).collect()
    }

    /// Drop statements whose cells are exhausted.
    ///
    /// Returns the number retired. Fails without retiring anything if an
    /// empty statement still claims mines.
    pub fn retire_empty(&mut self) -> Result<usize, KnowledgeError> {
        if let Some(bad) = self.statements.iter().find(|s| s.is_empty() && s.count() != 0) {
            return Err(KnowledgeError::InconsistentStatement {
                statement: bad.to_string(),
            });
        }
        let before = self.statements.len();
        self.statements.retain(|s| !s.is_empty());
        let retired = before - self.statements.len();
        if retired > 0 {
            self.index.retain(|s| !s.is_empty());
        }
        Ok(retired)
    }

    /// Fail on the first statement whose count left `0..=|cells|`.
    pub fn check_consistency(&self) -> Result<(), KnowledgeError> {
        match self.statements.iter().find(|s| !s.is_consistent()) {
            Some(bad) => Err(KnowledgeError::InconsistentStatement {
                statement: bad.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Apply the subset rule to every ordered pair of distinct statements.
    ///
    /// Returns the derived statements not already present, in discovery
    /// order and without duplicates. The collection itself is not modified.
    pub fn derive_subsets(&self) -> Result<Vec<Statement>, KnowledgeError> {
        let mut derived = Vec::new();
        let mut seen = FxHashSet::default();

        for (i, subset) in self.statements.iter().enumerate() {
            for (j, superset) in self.statements.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(candidate) = subset.subtract_from(superset) else {
                    continue;
                };
                // Equal cells with different counts, or a subset claiming
                // more mines than its superset.
                if candidate.is_empty() || !candidate.is_consistent() {
                    return Err(KnowledgeError::InconsistentStatement {
                        statement: format!("{} against {}", subset, superset),
                    });
                }
                if !self.index.contains(&candidate) && seen.insert(candidate.clone()) {
                    derived.push(candidate);
                }
            }
        }
        Ok(derived)
    }

    /// Only statements mentioning `cell` are touched. A purged statement
    /// that now equals one already indexed is dropped.
    fn purge(&mut self, cell: Cell, mark: fn(&mut Statement, Cell) -> bool) -> usize {
        let index = &mut self.index;
        let mut changed = 0;
        self.statements.retain_mut(|statement| {
            if !statement.contains(cell) {
                return true;
            }
            index.remove(&*statement);
            mark(statement, cell);
            changed += 1;
            index.insert(statement.clone())
        });
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(coords: &[(usize, usize)], count: i32) -> Statement {
        Statement::new(coords.iter().map(|&c| Cell::from(c)), count)
    }

    #[test]
    fn test_insert_dedups() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.insert(stmt(&[(0, 0), (0, 1)], 1)));
        assert!(!kb.insert(stmt(&[(0, 1), (0, 0)], 1)));
        assert!(kb.insert(stmt(&[(0, 0), (0, 1)], 2)));
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(2, 2)], 1));
        kb.insert(stmt(&[(0, 0)], 0));
        assert_eq!(kb.as_slice()[0], stmt(&[(2, 2)], 1));
        assert_eq!(kb.as_slice()[1], stmt(&[(0, 0)], 0));
    }

    #[test]
    fn test_purge_mine_updates_counts_and_index() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 1));
        kb.insert(stmt(&[(1, 0)], 0));

        assert_eq!(kb.purge_mine(Cell::new(0, 0)), 1);
        assert!(kb.contains(&stmt(&[(0, 1)], 0)));
        assert!(!kb.contains(&stmt(&[(0, 0), (0, 1)], 1)));
    }

    #[test]
    fn test_purge_collapses_duplicates() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 1));
        kb.insert(stmt(&[(0, 0), (0, 2)], 1));

        kb.purge_safe(Cell::new(0, 1));
        kb.purge_safe(Cell::new(0, 2));

        assert_eq!(kb.len(), 1);
        assert_eq!(kb.as_slice()[0], stmt(&[(0, 0)], 1));
    }

    #[test]
    fn test_purge_drops_copy_of_untouched_statement() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 1));
        kb.insert(stmt(&[(1, 1)], 1));
        kb.insert(stmt(&[(0, 0)], 1));

        assert_eq!(kb.purge_safe(Cell::new(0, 1)), 1);

        assert_eq!(kb.as_slice(), &[stmt(&[(1, 1)], 1), stmt(&[(0, 0)], 1)]);
        assert!(kb.contains(&stmt(&[(0, 0)], 1)));
        assert!(!kb.contains(&stmt(&[(0, 0), (0, 1)], 1)));
        // The index still tracks the survivor
        assert!(!kb.insert(stmt(&[(0, 0)], 1)));
    }

    #[test]
    fn test_purge_non_member_is_noop() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0)], 1));
        assert_eq!(kb.purge_safe(Cell::new(3, 3)), 0);
        assert_eq!(kb.purge_mine(Cell::new(3, 3)), 0);
        assert_eq!(kb.as_slice()[0], stmt(&[(0, 0)], 1));
    }

    #[test]
    fn test_known_unions() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 0));
        kb.insert(stmt(&[(1, 1)], 1));
        kb.insert(stmt(&[(2, 0), (2, 1)], 1));

        assert_eq!(kb.known_safes().len(), 2);
        assert_eq!(kb.known_mines(), [Cell::new(1, 1)].into_iter().collect());
    }

    #[test]
    fn test_retire_empty() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0)], 1));
        kb.insert(stmt(&[(0, 1)], 0));
        kb.purge_mine(Cell::new(0, 0));
        kb.purge_safe(Cell::new(0, 1));

        // Both statements became {} = 0 and collapsed into one
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.retire_empty(), Ok(1));
        assert!(kb.is_empty());
    }

    #[test]
    fn test_retire_empty_rejects_leftover_mines() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0)], 1));
        kb.purge_safe(Cell::new(0, 0));

        assert!(matches!(
            kb.retire_empty(),
            Err(KnowledgeError::InconsistentStatement { .. })
        ));
    }

    #[test]
    fn test_derive_subsets() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 1));
        kb.insert(stmt(&[(0, 0), (0, 1), (0, 2)], 1));

        let derived = kb.derive_subsets().unwrap();
        assert_eq!(derived, vec![stmt(&[(0, 2)], 0)]);
    }

    #[test]
    fn test_derive_subsets_skips_known() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 1));
        kb.insert(stmt(&[(0, 0), (0, 1), (0, 2)], 1));
        kb.insert(stmt(&[(0, 2)], 0));

        let derived = kb.derive_subsets().unwrap();
        // {(0,0),(0,1)} = 1 is re-derivable from the other two, but present
        assert!(derived.is_empty());
    }

    #[test]
    fn test_derive_subsets_detects_conflict() {
        let mut kb = KnowledgeBase::new();
        kb.insert(stmt(&[(0, 0), (0, 1)], 2));
        kb.insert(stmt(&[(0, 0), (0, 1), (0, 2)], 1));

        assert!(matches!(
            kb.derive_subsets(),
            Err(KnowledgeError::InconsistentStatement { .. })
        ));
    }
}
