//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the logical [`crate::types::Key`] set and
//! tracks which keys are held, synthesizing key-up edges for terminals without
//! key-release events.

pub mod handler;
pub mod map;

pub use tui_blocks_types as types;

pub use handler::{Edges, KeyEdge, KeyTracker};
pub use map::{map_key, should_quit, Bindings};
