//! Collision module - decides whether a piece fits at a position
//!
//! Called for every move, rotation and gravity step, so it only walks the
//! piece's filled cells (at most 16 box cells) and never allocates.

use crate::board::Board;
use crate::pieces::ActivePiece;
use crate::types::{Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece` fits on `board` at `position`.
///
/// A filled cell is rejected when its column is outside `[0, W)`, when its
/// row is at or below the floor, or when it lands on an occupied cell.
/// Rows above the board (y < 0) are always accepted.
pub fn is_valid_position(board: &Board, piece: &ActivePiece, position: Position) -> bool {
    piece.shape.cells().all(|(dx, dy)| {
        let x = position.x as i16 + dx as i16;
        let y = position.y as i16 + dy as i16;
        if x < 0 || x >= BOARD_WIDTH as i16 || y >= BOARD_HEIGHT as i16 {
            return false;
        }
        y < 0 || !board.is_occupied(x as i8, y as i8)
    })
}

/// Whether `piece` at `position` could move by `(dx, dy)`.
///
/// A shift that leaves the coordinate range is never valid.
pub fn can_move(board: &Board, piece: &ActivePiece, position: Position, dx: i8, dy: i8) -> bool {
    position
        .offset(dx, dy)
        .is_some_and(|target| is_valid_position(board, piece, target))
}

/// Lowest position reachable by moving straight down from `position`.
///
/// Returns `position` itself when the piece cannot descend.
pub fn drop_position(board: &Board, piece: &ActivePiece, position: Position) -> Position {
    let mut landed = position;
    while let Some(below) = landed.offset(0, 1) {
        if !is_valid_position(board, piece, below) {
            break;
        }
        landed = below;
    }
    landed
}
