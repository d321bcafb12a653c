use crate::core::{drop_position, ActivePiece, Board, Progress};
use crate::state::{GameState, Phase};
use crate::types::Position;

/// Owned copy of everything a renderer needs.
///
/// The falling piece is not burned into `board`; draw `current` at
/// `position` (and optionally at `ghost`) on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Option<ActivePiece>,
    pub position: Position,
    /// Where `current` would land on a hard drop
    pub ghost: Option<Position>,
    pub next: Option<ActivePiece>,
    pub progress: Progress,
    pub phase: Phase,
    pub time_played_ms: u64,
    pub speed_multiplier: f64,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let ghost = state
            .current
            .map(|piece| drop_position(&state.board, &piece, state.position));

        Self {
            board: state.board.clone(),
            current: state.current,
            position: state.position,
            ghost,
            next: state.next,
            progress: state.progress,
            phase: state.phase,
            time_played_ms: state.played_ms,
            speed_multiplier: state.speed_multiplier,
            episode_id: state.episode_id,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::from(&GameState::default())
    }
}
