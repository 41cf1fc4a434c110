//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the input mapper and the renderers alike.
//!
//! # Grid Dimensions
//!
//! The grid includes its own walls: column 0, column `cols - 1` and the last
//! row are permanently occupied.
//!
//! - **Rows**: 21 by default (20 playable rows plus the floor)
//! - **Columns**: 12 by default (10 playable columns plus two walls)
//! - **Spawn position**: x in {4, 5}, y = -4 (above the visible top)
//!
//! # Cadence Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Interval of the real-time frame source (~60 FPS) |
//! | `DEFAULT_MIN_FRAME_MS` | 40 | Throttle floor between accepted frames (25 FPS) |
//! | `DEFAULT_FREQUENCY` | 3 | Accepted frames per input-response tick |
//! | `DEFAULT_KEYFRAMES` | 5 | Input-response ticks per gravity tick |
//!
//! With the defaults a part falls one row every 3 * 5 * 40ms = 600ms.
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{Key, PieceKind, Phase, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Key::from_str("moveLeft"), Some(Key::MoveLeft));
//! assert!(Key::RotateCcw.is_rotation());
//! assert_eq!(Phase::GameOver.as_str(), "gameOver");
//!
//! assert_eq!(DEFAULT_ROWS, 21);
//! assert_eq!(DEFAULT_COLS, 12);
//! ```

pub mod config;

pub use config::{ConfigError, EngineConfig};

/// Default grid height, floor row included.
pub const DEFAULT_ROWS: usize = 21;

/// Default grid width, both walls included.
pub const DEFAULT_COLS: usize = 12;

/// Default number of accepted frames per input-response tick.
pub const DEFAULT_FREQUENCY: u32 = 3;

/// Default number of input-response ticks per gravity tick.
pub const DEFAULT_KEYFRAMES: u32 = 5;

/// Default minimum time between two accepted frames (1000ms / 25fps).
pub const DEFAULT_MIN_FRAME_MS: u64 = 40;

/// Interval of the real-time frame source driving the scheduler (16ms ≈ 60 FPS).
pub const TICK_MS: u64 = 16;

/// Side length of a part mask.
pub const MASK_SIZE: usize = 4;

/// Vertical spawn offset: the mask starts fully above row 0.
pub const SPAWN_Y: i32 = -4;

/// Number of distinct horizontal spawn offsets (x = midpoint + 0..SPAWN_JITTER).
pub const SPAWN_JITTER: u32 = 2;

/// Smallest usable grid height: the floor plus one playable row.
pub const MIN_ROWS: usize = 2;

/// Smallest usable grid width: two walls, a full mask and one jitter cell.
pub const MIN_COLS: usize = MASK_SIZE + 3;

/// Auto-release delay for terminals that never report key release.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;


/// The seven shape kinds in the piece catalog
///
/// - **I**: straight bar (2 rotation states)
/// - **O**: 2x2 square (1 rotation state)
/// - **T**: T-shaped (4 rotation states)
/// - **S**: S-shaped (2 rotation states)
/// - **Z**: Z-shaped, mirror of S (2 rotation states)
/// - **J**: J-shaped (4 rotation states)
/// - **L**: L-shaped, mirror of J (4 rotation states)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Lifecycle phase of a game session
///
/// ```text
/// Intro --Start--> Playing --(blocked above the top)--> GameOver --Start--> Playing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Start screen, nothing is simulated.
    #[default]
    Intro,
    /// A game is in progress (possibly paused).
    Playing,
    /// The last part could not enter the grid.
    GameOver,
}

impl Phase {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }

    /// Whether a Start key press begins a new game in this phase.
    pub fn accepts_start(&self) -> bool {
        matches!(self, Phase::Intro | Phase::GameOver)
    }
}

/// Logical keys understood by the game session
///
/// Physical keys are mapped onto these by the input crate; a single physical
/// key may map to more than one logical key (Enter is both PauseResume and
/// Start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Start a new game from the intro or game-over screen
    Start,
    /// Toggle pause while playing
    PauseResume,
    /// Rotate forward through the rotation sequence
    RotateCw,
    /// Rotate backward through the rotation sequence
    RotateCcw,
    /// Move the part one column left
    MoveLeft,
    /// Move the part one column right
    MoveRight,
    /// Move the part one row down on every input-response tick while held
    SoftDrop,
}

impl Key {
    /// Every logical key.
    pub const ALL: [Key; 7] = [
        Key::Start,
        Key::PauseResume,
        Key::RotateCw,
        Key::RotateCcw,
        Key::MoveLeft,
        Key::MoveRight,
        Key::SoftDrop,
    ];

    /// Parse key from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Key;
    ///
    /// assert_eq!(Key::from_str("softDrop"), Some(Key::SoftDrop));
    /// assert_eq!(Key::from_str("ROTATECW"), Some(Key::RotateCw));
    /// assert_eq!(Key::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Key::Start),
            "pauseresume" => Some(Key::PauseResume),
            "rotatecw" => Some(Key::RotateCw),
            "rotateccw" => Some(Key::RotateCcw),
            "moveleft" => Some(Key::MoveLeft),
            "moveright" => Some(Key::MoveRight),
            "softdrop" => Some(Key::SoftDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Start => "start",
            Key::PauseResume => "pauseResume",
            Key::RotateCw => "rotateCw",
            Key::RotateCcw => "rotateCcw",
            Key::MoveLeft => "moveLeft",
            Key::MoveRight => "moveRight",
            Key::SoftDrop => "softDrop",
        }
    }

    /// Position in [`Key::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Rotation keys share the auto-repeat lock.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Key::RotateCw | Key::RotateCcw)
    }
}
