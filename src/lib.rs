//! # rust-minesweeper
//!
//! A Minesweeper agent that reasons purely by logical deduction.
//!
//! ## Design Principles
//!
//! 1. **Certainty only**: The agent never estimates probabilities. A cell is
//!    safe or a mine only once some statement forces it; otherwise it is
//!    unknown and the agent guesses uniformly.
//!
//! 2. **Owned state**: All knowledge lives in a `KnowledgeEngine` value. No
//!    globals, no interior mutability. One engine per game.
//!
//! 3. **Loud contract violations**: A count that contradicts earlier
//!    observations is an error, never silently absorbed.
//!
//! ## Architecture
//!
//! - **Statements**: "exactly `count` of these cells are mines". A revealed
//!   cell contributes one statement over its undetermined neighbors.
//!
//! - **Saturation**: statements with `count == 0` make all their cells safe,
//!   statements with `count == |cells|` make all their cells mines. Each new
//!   fact is purged from every statement, which can trigger more, so this
//!   loops to a fixpoint.
//!
//! - **Subset inference**: if `A ⊆ B`, then `B − A` holds exactly
//!   `B.count − A.count` mines.
//!
//! ## Modules
//!
//! - `core`: Cells, configuration, errors, RNG
//! - `knowledge`: Statements, the knowledge base, and the inference engine
//! - `board`: The minefield the agent plays against
//! - `simulation`: Headless self-play and statistics

pub mod core;
pub mod knowledge;
pub mod board;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    Cell, Neighbors,
    BoardConfig, EngineConfig, InferenceMode,
    BoardError, KnowledgeError, PlayError,
    GameRng,
};

pub use crate::knowledge::{KnowledgeBase, KnowledgeEngine, Statement};

pub use crate::board::{Minefield, Reveal};

pub use crate::simulation::{
    GameOutcome, GameRecord, MoveKind, MoveRecord, SimulationStats,
    SelfPlayConfig, SelfPlayWorker,
};
