//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the falling-block engine: the walled
//! occupancy grid, the piece catalog, collision, the dual-cadence scheduler
//! and the session state machine that ties them together. It has no
//! dependencies on terminals or I/O; frames leave through a [`RenderSink`].
//!
//! # Module Structure
//!
//! - [`grid`]: rows x cols occupancy matrix with built-in walls and floor
//! - [`pieces`]: 4x4 bitmask catalog, one entry per rotation state
//! - [`part`]: the active part (kind, rotation, anchor) and spawning
//! - [`collision`]: part-vs-grid overlap test
//! - [`scheduler`]: frame throttle plus input and gravity countdowns
//! - [`session`]: phases, key handling, input and gravity ticks
//! - [`snapshot`]: borrowed frames and owned serializable snapshots
//! - [`rng`]: injectable random source
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameSession, NullSink, SimpleRng};
//! use tui_blocks_core::types::{EngineConfig, Key, Phase};
//!
//! let mut game = GameSession::new(EngineConfig::default(), SimpleRng::new(7)).unwrap();
//! game.key_down(Key::Start, &mut NullSink).unwrap();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // Three accepted frames make one input tick, which spawns the first part.
//! for i in 0..3 {
//!     game.tick(i * 40, &mut NullSink).unwrap();
//! }
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! With the defaults (frequency 3, keyframes 5, 40 ms floor) an input tick
//! runs every 3 accepted frames and gravity every 15, i.e. at most once per
//! 600 ms. Call [`GameSession::tick`](session::GameSession::tick) once per
//! display frame with a monotonic timestamp.

pub mod collision;
pub mod grid;
pub mod keys;
pub mod part;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use grid::Grid;
pub use keys::KeySet;
pub use part::Part;
pub use pieces::{get_mask, Mask};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scheduler::{FrameStep, Scheduler};
pub use session::{GameSession, TickOutcome};
pub use snapshot::{ActiveSnapshot, CellKind, Frame, NullSink, RenderSink, Snapshot};
