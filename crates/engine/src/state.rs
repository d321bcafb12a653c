//! Game state - the single mutable aggregate owned by the engine
//!
//! `GameState` is replaced wholesale on every start/reset. Only
//! [`GameEngine`](crate::GameEngine) mutates it; everything else gets a
//! shared reference or a [`GameSnapshot`](crate::GameSnapshot).

use serde::{Deserialize, Serialize};

use crate::core::{ActivePiece, Board, Progress};
use crate::types::{Position, TIME_TICK_MS};

/// Lifecycle phase.
///
/// `Idle → Running ⇄ Paused`, `Running → GameOver`; start/reset leads back
/// to `Running` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// A game is in progress (running or paused)
    pub fn is_playing(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }

    pub fn is_paused(self) -> bool {
        self == Phase::Paused
    }

    pub fn is_game_over(self) -> bool {
        self == Phase::GameOver
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameover",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current: Option<ActivePiece>,
    pub(crate) position: Position,
    pub(crate) next: Option<ActivePiece>,
    pub(crate) progress: Progress,
    pub(crate) phase: Phase,
    pub(crate) speed_multiplier: f64,
    /// Played time, pauses excluded
    pub(crate) played_ms: u64,
    /// Host timestamp of the last evaluated gravity step
    pub(crate) last_tick_ms: u64,
    /// Host timestamp that closed the last counted stretch of play (start,
    /// tick or resume); `None` before the first start
    pub(crate) last_frame_ms: Option<u64>,
    /// Whole seconds already announced through `time:tick`
    pub(crate) reported_seconds: u64,
    pub(crate) started_at_ms: u64,
    /// Monotonic game counter (increments on every start/reset)
    pub(crate) episode_id: u32,
}

impl GameState {
    /// Empty idle state: no pieces, zero totals
    pub fn new(speed_multiplier: f64) -> Self {
        Self {
            board: Board::new(),
            current: None,
            position: Position::default(),
            next: None,
            progress: Progress::new(),
            phase: Phase::Idle,
            speed_multiplier,
            played_ms: 0,
            last_tick_ms: 0,
            last_frame_ms: None,
            reported_seconds: 0,
            started_at_ms: 0,
            episode_id: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<ActivePiece> {
        self.current
    }

    pub fn current_position(&self) -> Position {
        self.position
    }

    pub fn next_piece(&self) -> Option<ActivePiece> {
        self.next
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn tetris_count(&self) -> u32 {
        self.progress.tetris_count
    }

    pub fn combo(&self) -> u32 {
        self.progress.combo
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn time_played_ms(&self) -> u64 {
        self.played_ms
    }

    /// Whole seconds of played time
    pub fn time_played(&self) -> u64 {
        self.played_ms / TIME_TICK_MS
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1.0)
    }
}
