//! Knowledge representation and inference.
//!
//! - `Statement`: "exactly `count` of these cells are mines"
//! - `KnowledgeBase`: duplicate-free, ordered statement collection
//! - `KnowledgeEngine`: safe/mine bookkeeping, saturation, subset inference,
//!   and move selection

pub mod base;
pub mod engine;
pub mod statement;

pub use base::KnowledgeBase;
pub use engine::KnowledgeEngine;
pub use statement::Statement;
