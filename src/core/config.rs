//! Board and engine configuration.
//!
//! - `BoardConfig`: grid dimensions and mine count
//! - `InferenceMode`: how hard the engine works per observation
//! - `EngineConfig`: combines the above with an RNG seed

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::BoardError;

/// Grid dimensions and total mine count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows.
    pub height: usize,

    /// Number of columns.
    pub width: usize,

    /// Number of hidden mines.
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl BoardConfig {
    /// Create a new board configuration.
    #[must_use]
    pub const fn new(height: usize, width: usize, mines: usize) -> Self {
        Self { height, width, mines }
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Set the mine count.
    #[must_use]
    pub fn with_mines(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// Total number of cells on the grid. Saturates on grids too large to
    /// count, which `validate` rejects.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.height.saturating_mul(self.width)
    }

    /// Check whether a cell lies on this grid.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width)
    }

    /// Reject empty or uncountable grids and impossible mine counts.
    pub fn validate(&self) -> Result<(), BoardError> {
        let cells = match self.height.checked_mul(self.width) {
            Some(cells) if cells > 0 => cells,
            _ => {
                return Err(BoardError::InvalidDimensions {
                    height: self.height,
                    width: self.width,
                })
            }
        };
        if self.mines > cells {
            return Err(BoardError::TooManyMines { mines: self.mines, cells });
        }
        Ok(())
    }
}

/// How the pairwise subset rule is scheduled within one observation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferenceMode {
    /// Saturate, then run the subset rule exactly once. Statements derived
    /// by that pass are only saturated on the next observation.
    #[default]
    SinglePass,
    /// Alternate saturation and the subset rule until neither makes progress.
    Fixpoint,
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid the engine reasons about. Only the dimensions are consulted;
    /// the engine never uses the mine count.
    pub board: BoardConfig,

    /// Subset-rule scheduling.
    pub inference: InferenceMode,

    /// Seed for random-move sampling.
    /// Same seed and same observations produce the same random moves.
    pub seed: u64,
}

impl EngineConfig {
    /// Create a config for the given board with default inference and seed 0.
    #[must_use]
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// Set the board.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Set the inference mode.
    #[must_use]
    pub fn with_inference(mut self, inference: InferenceMode) -> Self {
        self.inference = inference;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
