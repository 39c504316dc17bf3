//! Batch simulation of complete games.
//!
//! Each game pairs its own `KnowledgeEngine` with its own `Minefield`;
//! nothing is shared between games.

pub mod record;
pub mod self_play;

pub use record::{GameOutcome, GameRecord, MoveKind, MoveRecord, SimulationStats};
pub use self_play::{SelfPlayConfig, SelfPlayWorker};
