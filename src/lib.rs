//! TUI Blocks (workspace facade crate).
//!
//! Exposes `tui_blocks::{core,input,term,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;
