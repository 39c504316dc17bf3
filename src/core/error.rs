//! Error types.
//!
//! Contract violations surface at the call that introduced them. Running out
//! of moves is not an error; move queries return `None` for that.

use thiserror::Error;

use super::cell::Cell;

/// Errors raised by the knowledge engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("cell {cell} is outside the {height}x{width} grid")]
    OutOfBounds { cell: Cell, height: usize, width: usize },

    #[error("cell {cell} reported {count} neighboring mines but has only {neighbors} neighbors")]
    CountOutOfRange { cell: Cell, count: usize, neighbors: usize },

    #[error("cell {cell} is known to be both safe and a mine")]
    Contradiction { cell: Cell },

    /// A statement whose count left `0..=|cells|`. The knowledge base can no
    /// longer be trusted once this is returned.
    #[error("inconsistent statement {statement}")]
    InconsistentStatement { statement: String },
}

/// Errors raised by the minefield.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid grid dimensions {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("cannot place {mines} mines on {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("cell {cell} is outside the {height}x{width} grid")]
    OutOfBounds { cell: Cell, height: usize, width: usize },

    #[error("cell {cell} has already been revealed")]
    AlreadyRevealed { cell: Cell },
}

/// Errors that abort a simulated game.
///
/// Either side breaking its contract mid-game is a bug, not a loss.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error(transparent)]
    Board(#[from] BoardError),
}
