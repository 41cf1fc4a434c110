//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: frames from the core crate are
//! drawn into a framebuffer (2 terminal columns per grid cell) and flushed to
//! the terminal as a diff. A JSON-lines sink serves headless runs.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sink;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::{JsonLinesSink, TerminalSink};
