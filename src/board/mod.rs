//! The environment side of the game.
//!
//! `Minefield` places mines and answers neighbor-count queries. It is kept
//! apart from the knowledge engine, which only ever sees observations.

pub mod minefield;

pub use minefield::{Minefield, Reveal};
