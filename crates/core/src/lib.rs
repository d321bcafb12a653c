//! Core game rules - pure, deterministic, and testable
//!
//! This crate contains the stateless building blocks of the engine. Nothing
//! here owns a game; the `tetrion-engine` crate strings these together.
//!
//! - **Deterministic**: the same inputs always produce the same board and score
//! - **Allocation-free**: collision checks, placement and line clears work on
//!   fixed-size arrays
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetrominoes and their pre-enumerated rotation states
//! - [`collision`]: whether a piece fits at a position
//! - [`board`]: the 10x20 grid, piece placement and line clearing
//! - [`scoring`]: score, level, combo and fall-speed arithmetic
//! - [`rng`]: seeded uniform and 7-bag piece selection
//!
//! # Example
//!
//! ```
//! use tetrion_core::{clear_lines, is_valid_position, place_piece, spawn_position, ActivePiece, Board};
//! use tetrion_core::types::{PieceKind, Position};
//!
//! let mut board = Board::new();
//! board.fill_row(19, PieceKind::L, Some(0));
//!
//! let piece = ActivePiece::new(PieceKind::I).rotated(); // vertical
//! assert!(is_valid_position(&board, &piece, spawn_position(PieceKind::I)));
//!
//! let placed = place_piece(&board, &piece, Position::new(-2, 16));
//! let result = clear_lines(&placed);
//! assert_eq!(result.lines_cleared, 1);
//! ```

pub mod board;
pub mod collision;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use tetrion_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, place_piece, Board, ClearedRows, LineClear};
pub use collision::{can_move, drop_position, is_valid_position};
pub use pieces::{shapes_for, spawn_position, ActivePiece, ShapeMatrix};
pub use rng::{PieceGenerator, Randomizer, SimpleRng};
pub use scoring::{
    fall_interval_ms, next_combo, next_level, score_delta, PlacementOutcome, Progress,
};
