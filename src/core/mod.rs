//! Core types: cells, configuration, errors, RNG.
//!
//! Nothing in here knows about statements or inference; the knowledge engine
//! and the minefield both build on these.

pub mod cell;
pub mod config;
pub mod error;
pub mod rng;

pub use cell::{Cell, Neighbors};
pub use config::{BoardConfig, EngineConfig, InferenceMode};
pub use error::{BoardError, KnowledgeError, PlayError};
pub use rng::GameRng;
