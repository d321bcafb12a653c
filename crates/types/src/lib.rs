//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and formatting,
//! making them usable in any context (core rules, engine, host adapters).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Speed Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED_MS` | 1000 | Fall interval at level 1 |
//! | `SPEED_STEP_MS` | 100 | Interval reduction per level |
//! | `FALL_INTERVAL_FLOOR_MS` | 100 | Lower clamp before the speed multiplier |
//! | `MIN_FALL_INTERVAL_MS` | 50 | Absolute lower clamp |
//! | `TIME_TICK_MS` | 1000 | Played time between `time:tick` events |
//!
//! # Examples
//!
//! ```
//! use tetrion_types::{Command, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let command = Command::from_str("hardDrop").unwrap();
//! assert_eq!(command, Command::HardDrop);
//!
//! assert_eq!(Position::new(3, 0).offset(1, 1), Some(Position::new(4, 1)));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Base points per placement, indexed by lines cleared (0-4).
///
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Fall interval at level 1
pub const BASE_SPEED_MS: u32 = 1000;

/// Fall interval reduction per level above 1
pub const SPEED_STEP_MS: u32 = 100;

/// Level-derived interval never drops below this before the multiplier applies
pub const FALL_INTERVAL_FLOOR_MS: u32 = 100;

/// Absolute minimum fall interval after the multiplier applies
pub const MIN_FALL_INTERVAL_MS: u32 = 50;

/// Played time between consecutive `time:tick` events
pub const TIME_TICK_MS: u64 = 1000;

/// The seven tetromino piece kinds
///
/// - **I**: 4-long bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    /// Every kind, in catalog order
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
    /// use tetrion_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
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
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell settled by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Top-left offset of a piece's bounding box on the board.
///
/// `y` may be negative while a piece hangs above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`, or `None` if a coordinate leaves
    /// the `i8` range
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y })
    }
}

/// Commands a host can send to the engine.
///
/// Input decoding (keys, touch gestures) happens outside the engine; by the
/// time a command reaches it, it is one of these discrete values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start a fresh game (valid from any phase)
    StartGame,
    /// Replace the running game with a fresh one (valid from any phase)
    Reset,
    Pause,
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    MoveLeft,
    MoveRight,
    /// Move the active piece down one row
    SoftDrop,
    /// Drop to the lowest valid row and land immediately
    HardDrop,
    /// Advance to the next rotation state
    Rotate,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startgame" => Some(Command::StartGame),
            "reset" => Some(Command::Reset),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "togglepause" => Some(Command::TogglePause),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartGame => "startGame",
            Command::Reset => "reset",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
        }
    }
}
