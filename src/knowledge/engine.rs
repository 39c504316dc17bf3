//! The knowledge engine.
//!
//! Turns `(cell, count)` observations into certain facts. Each observation
//! adds at most one statement, after which the engine:
//!
//! 1. **Saturates**: repeatedly harvests cells that some statement proves
//!    safe (`count == 0`) or mined (`count == |cells|`), purges them from
//!    every statement, and retires exhausted statements, until a pass learns
//!    nothing new.
//! 2. **Infers**: applies the subset rule to every ordered pair of
//!    statements. Under `InferenceMode::SinglePass` this runs once and new
//!    statements wait for the next observation. Under
//!    `InferenceMode::Fixpoint` saturation and inference alternate until
//!    neither makes progress.
//!
//! ```
//! use rust_minesweeper::core::{BoardConfig, Cell, EngineConfig};
//! use rust_minesweeper::knowledge::KnowledgeEngine;
//!
//! let mut engine = KnowledgeEngine::new(EngineConfig::new(BoardConfig::new(3, 3, 1)));
//! engine.record_observation(Cell::new(0, 0), 0).unwrap();
//!
//! assert!(engine.is_known_safe(Cell::new(1, 1)));
//! assert!(engine.pick_safe_move().is_some());
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::core::{Cell, EngineConfig, GameRng, InferenceMode, KnowledgeError};

use super::base::KnowledgeBase;
use super::statement::Statement;

/// Everything the agent knows about one game.
///
/// Owned by a single caller. Concurrent simulations each need their own
/// engine.
#[derive(Clone, Debug)]
pub struct KnowledgeEngine {
    config: EngineConfig,
    moves_made: FxHashSet<Cell>,
    safes: FxHashSet<Cell>,
    mines: FxHashSet<Cell>,
    knowledge: KnowledgeBase,
    rng: GameRng,
}

impl KnowledgeEngine {
    /// Create an engine with no knowledge.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an engine drawing random moves from an existing stream.
    #[must_use]
    pub fn with_rng(config: EngineConfig, rng: GameRng) -> Self {
        Self {
            config,
            moves_made: FxHashSet::default(),
            safes: FxHashSet::default(),
            mines: FxHashSet::default(),
            knowledge: KnowledgeBase::new(),
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cells the agent has revealed.
    #[must_use]
    pub fn moves_made(&self) -> &FxHashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven mine-free.
    #[must_use]
    pub fn safes(&self) -> &FxHashSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }

    /// The working statements, in insertion order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        self.knowledge.as_slice()
    }

    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.safes.contains(&cell)
    }

    #[must_use]
    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    #[must_use]
    pub fn has_moved(&self, cell: Cell) -> bool {
        self.moves_made.contains(&cell)
    }

    // === Marking ===

    /// Record `cell` as a mine and purge it from every statement.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        self.check_bounds(cell)?;
        if self.safes.contains(&cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        if self.mines.insert(cell) {
            debug!(%cell, "learned mine");
        }
        self.knowledge.purge_mine(cell);
        Ok(())
    }

    /// Record `cell` as safe and purge it from every statement.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        self.check_bounds(cell)?;
        if self.mines.contains(&cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        if self.safes.insert(cell) {
            debug!(%cell, "learned safe");
        }
        self.knowledge.purge_safe(cell);
        Ok(())
    }

    // === Observations ===

    /// Feed back a revealed cell and the number of mines among its in-bounds
    /// neighbors.
    ///
    /// The caller guarantees `cell` is not a mine. Must not be interleaved
    /// with other engine calls.
    pub fn record_observation(&mut self, cell: Cell, count: usize) -> Result<(), KnowledgeError> {
        self.check_bounds(cell)?;
        let neighbors = cell.neighbors(self.config.board.height, self.config.board.width);
        if count > neighbors.len() {
            return Err(KnowledgeError::CountOutOfRange {
                cell,
                count,
                neighbors: neighbors.len(),
            });
        }

        self.moves_made.insert(cell);
        self.mark_safe(cell)?;

        let mut known_mine_count = 0;
        let mut new_cells = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if self.mines.contains(&neighbor) {
                known_mine_count += 1;
            } else if !self.safes.contains(&neighbor) {
                new_cells.push(neighbor);
            }
        }

        let statement = Statement::new(new_cells, count as i32 - known_mine_count);
        if statement.is_empty() {
            // Every neighbor is already known, so the count must agree with them
            if statement.count() != 0 {
                return Err(KnowledgeError::InconsistentStatement {
                    statement: statement.to_string(),
                });
            }
        } else {
            self.add_statement(statement)?;
        }

        match self.config.inference {
            InferenceMode::SinglePass => {
                self.saturate()?;
                self.infer()?;
            }
            InferenceMode::Fixpoint => {
                self.saturate()?;
                while self.infer()? > 0 {
                    self.saturate()?;
                }
            }
        }
        Ok(())
    }

    /// Add a statement to the knowledge base without running inference.
    ///
    /// Cells already known safe or mined are purged first. Returns whether
    /// the statement was new; one that purges down to nothing is not stored.
    /// Rejects statements whose count is outside `0..=|cells|` or that
    /// mention off-grid cells.
    pub fn add_statement(&mut self, mut statement: Statement) -> Result<bool, KnowledgeError> {
        if let Some(&cell) = statement.cells().iter().find(|c| !self.config.board.contains(**c)) {
            return Err(self.out_of_bounds(cell));
        }

        let known: Vec<Cell> = statement
            .cells()
            .iter()
            .copied()
            .filter(|c| self.safes.contains(c) || self.mines.contains(c))
            .collect();
        for cell in known {
            if self.mines.contains(&cell) {
                statement.mark_cell_as_mine(cell);
            } else {
                statement.mark_cell_as_safe(cell);
            }
        }

        if !statement.is_consistent() {
            return Err(KnowledgeError::InconsistentStatement {
                statement: statement.to_string(),
            });
        }
        if statement.is_empty() || self.knowledge.contains(&statement) {
            return Ok(false);
        }

        debug!(%statement, "new statement");
        Ok(self.knowledge.insert(statement))
    }

    /// Harvest certain cells until a pass learns nothing.
    ///
    /// Returns the number of passes that made progress.
    pub fn saturate(&mut self) -> Result<usize, KnowledgeError> {
        let mut passes = 0;
        loop {
            let safes_found = self.knowledge.known_safes();
            let mines_found = self.knowledge.known_mines();
            trace!(
                pass = passes,
                safes = safes_found.len(),
                mines = mines_found.len(),
                statements = self.knowledge.len(),
                "saturation pass"
            );

            for &cell in &safes_found {
                self.mark_safe(cell)?;
            }
            for &cell in &mines_found {
                self.mark_mine(cell)?;
            }
            self.knowledge.retire_empty()?;
            self.knowledge.check_consistency()?;

            if safes_found.is_empty() && mines_found.is_empty() {
                return Ok(passes);
            }
            passes += 1;
        }
    }

    /// One pass of the subset rule over every ordered pair of statements.
    ///
    /// Returns the number of statements added.
    pub fn infer(&mut self) -> Result<usize, KnowledgeError> {
        let derived = self.knowledge.derive_subsets()?;
        let mut added = 0;
        for statement in derived {
            debug!(%statement, "inferred statement");
            if self.knowledge.insert(statement) {
                added += 1;
            }
        }
        Ok(added)
    }

    // === Move selection ===

    /// A proven-safe cell not yet revealed, if any.
    ///
    /// The cell returned is the smallest in row-major order, so the choice
    /// does not depend on hash iteration order.
    #[must_use]
    pub fn pick_safe_move(&self) -> Option<Cell> {
        self.safes
            .iter()
            .filter(|cell| !self.moves_made.contains(*cell))
            .min()
            .copied()
    }

    /// A uniformly random cell that is neither revealed nor a known mine.
    pub fn pick_random_move(&mut self) -> Option<Cell> {
        let board = self.config.board;
        let choices: Vec<Cell> = Cell::all(board.height, board.width)
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        self.rng.choose(&choices).copied()
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.config.board.contains(cell) {
            Ok(())
        } else {
            Err(self.out_of_bounds(cell))
        }
    }

    fn out_of_bounds(&self, cell: Cell) -> KnowledgeError {
        KnowledgeError::OutOfBounds {
            cell,
            height: self.config.board.height,
            width: self.config.board.width,
        }
    }
}
