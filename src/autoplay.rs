//! Greedy placement policy for the headless runner.
//!
//! Tries every rotation state at every column, simulates the hard drop with
//! the core rules, and keeps the placement with the lowest cost.

use tetrion::core::{clear_lines, drop_position, is_valid_position, place_piece, ActivePiece, Board};
use tetrion::engine::{EventSink, GameEngine};
use tetrion::types::{Position, BOARD_WIDTH};

/// Rotation count and target column for the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub rotations: u8,
    pub x: i8,
}

pub fn best_plan(board: &Board, piece: ActivePiece, from: Position) -> Option<Plan> {
    let mut best: Option<(i32, Plan)> = None;
    let mut rotated = piece;

    for rotations in 0..piece.rotation_count() {
        for x in -3..BOARD_WIDTH as i8 {
            let start = Position::new(x, from.y);
            if !is_valid_position(board, &rotated, start) {
                continue;
            }
            let landed = drop_position(board, &rotated, start);
            let result = clear_lines(&place_piece(board, &rotated, landed));
            let candidate = cost(&result.board, result.lines_cleared);

            if best.map_or(true, |(best_cost, _)| candidate < best_cost) {
                best = Some((candidate, Plan { rotations, x }));
            }
        }
        rotated = rotated.rotated();
    }

    best.map(|(_, plan)| plan)
}

/// Steer the engine's current piece to `plan` and hard drop it
pub fn execute<S: EventSink>(engine: &mut GameEngine<S>, plan: Plan) {
    for _ in 0..plan.rotations {
        if !engine.rotate() {
            break;
        }
    }
    while engine.current_position().x < plan.x && engine.move_right() {}
    while engine.current_position().x > plan.x && engine.move_left() {}
    engine.hard_drop();
}

/// Holes weigh most, then stack height; cleared lines pay back
fn cost(board: &Board, lines_cleared: u8) -> i32 {
    let mut holes = 0;
    let mut aggregate_height = 0;

    for x in 0..board.width() as i8 {
        let mut seen_block = false;
        for y in 0..board.height() as i8 {
            if board.is_occupied(x, y) {
                if !seen_block {
                    aggregate_height += i32::from(board.height()) - i32::from(y);
                    seen_block = true;
                }
            } else if seen_block {
                holes += 1;
            }
        }
    }

    holes * 8 + aggregate_height - i32::from(lines_cleared) * 4
}
