//! Game engine - the state machine that owns and drives a [`GameState`]
//!
//! The host calls [`GameEngine::tick`] once per display refresh with a
//! monotonic millisecond timestamp, and the command methods in response to
//! input. Both must be serialized by the host; the engine does no locking.
//!
//! Commands never fail loudly: they return `true` when something happened
//! and `false` when they were rejected (blocked move, wrong phase).

use crate::config::{is_valid_multiplier, ConfigError, EngineConfig};
use crate::core::{
    clear_lines, drop_position, fall_interval_ms, is_valid_position, place_piece, spawn_position,
    ActivePiece, Board, PieceGenerator, PlacementOutcome, Progress,
};
use crate::events::{EventSink, GameEvent, NullSink};
use crate::snapshot::GameSnapshot;
use crate::state::{GameState, Phase};
use crate::types::{Command, Position};

pub struct GameEngine<S: EventSink = NullSink> {
    config: EngineConfig,
    generator: PieceGenerator,
    state: GameState,
    sink: S,
}

impl GameEngine<NullSink> {
    /// Engine with the default config that discards its events
    pub fn headless() -> Self {
        Self::with_sink(NullSink)
    }
}

impl Default for GameEngine<NullSink> {
    fn default() -> Self {
        Self::headless()
    }
}

impl<S: EventSink> GameEngine<S> {
    pub fn new(config: EngineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, sink))
    }

    /// Engine with the default config
    pub fn with_sink(sink: S) -> Self {
        Self::build(EngineConfig::default(), sink)
    }

    fn build(config: EngineConfig, sink: S) -> Self {
        Self {
            generator: PieceGenerator::new(config.randomizer, config.seed),
            state: GameState::new(config.speed_multiplier),
            config,
            sink,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn current_piece(&self) -> Option<ActivePiece> {
        self.state.current
    }

    pub fn current_position(&self) -> Position {
        self.state.position
    }

    pub fn next_piece(&self) -> Option<ActivePiece> {
        self.state.next
    }

    pub fn progress(&self) -> Progress {
        self.state.progress
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn time_played_ms(&self) -> u64 {
        self.state.played_ms
    }

    /// Current gravity interval for the level and speed multiplier
    pub fn fall_interval_ms(&self) -> u64 {
        fall_interval_ms(
            self.state.progress.level,
            self.state.speed_multiplier,
            self.config.base_speed_ms,
            self.config.speed_step_ms,
        )
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&self.state)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Replace the game with a fresh one, spawn the first piece and pick
    /// the next. Valid from any phase.
    pub fn start_game(&mut self, now_ms: u64) {
        self.generator.reseed(self.config.seed);

        let mut state = GameState::new(self.config.speed_multiplier);
        state.phase = Phase::Running;
        state.started_at_ms = now_ms;
        state.last_tick_ms = now_ms;
        state.last_frame_ms = Some(now_ms);
        state.episode_id = self.state.episode_id.wrapping_add(1);
        state.next = Some(ActivePiece::new(self.generator.draw()));
        self.state = state;

        log::info!(
            "game started (episode {}, seed {}, randomizer {})",
            self.state.episode_id,
            self.config.seed,
            self.generator.randomizer().as_str()
        );
        self.sink.publish(GameEvent::GameStarted { timestamp: now_ms });

        self.spawn_next();
    }

    /// Same as [`start_game`](Self::start_game)
    pub fn reset(&mut self, now_ms: u64) {
        self.start_game(now_ms);
    }

    /// Freeze the game at host time `now_ms`; play up to `now_ms` counts
    /// as played time
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.advance_clock(now_ms);
        self.state.phase = Phase::Paused;
        log::debug!("paused at {}ms played", self.state.played_ms);
        self.sink.publish(GameEvent::GamePaused {
            is_paused: true,
            time_played: self.state.time_played(),
        });
        true
    }

    /// Continue the game at host time `now_ms`; the pause gap is not
    /// counted as played time
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.state.phase = Phase::Running;
        self.state.last_frame_ms = Some(now_ms);
        log::debug!("resumed at {}ms played", self.state.played_ms);
        self.sink.publish(GameEvent::GamePaused {
            is_paused: false,
            time_played: self.state.time_played(),
        });
        true
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(now_ms),
            Phase::Paused => self.resume(now_ms),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        self.is_running() && self.try_shift(dx, 0)
    }

    /// Move down one row; never lands the piece
    pub fn soft_drop(&mut self) -> bool {
        self.is_running() && self.try_shift(0, 1)
    }

    /// Advance to the next rotation state in place.
    ///
    /// The rotated shape is only tried at the current position; there is no
    /// kick search. Pieces with a single rotation state (O) never rotate.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.state.current else {
            return false;
        };
        if piece.rotation_count() <= 1 {
            return false;
        }

        let rotated = piece.rotated();
        if !is_valid_position(&self.state.board, &rotated, self.state.position) {
            return false;
        }
        self.state.current = Some(rotated);
        true
    }

    /// Drop to the lowest valid row and land immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.state.current else {
            return false;
        };
        self.state.position = drop_position(&self.state.board, &piece, self.state.position);
        self.land();
        true
    }

    /// Advance time to `now_ms`.
    ///
    /// Accumulates played time and, once at least one fall interval has
    /// passed since the last gravity step, moves the piece down one row or
    /// lands it. Returns whether a gravity step was evaluated.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }

        self.advance_clock(now_ms);

        let elapsed = now_ms.saturating_sub(self.state.last_tick_ms);
        if elapsed < self.fall_interval_ms() {
            return false;
        }

        if !self.try_shift(0, 1) {
            self.land();
        }
        self.state.last_tick_ms = now_ms;
        true
    }

    /// Change the speed multiplier for this and future games.
    ///
    /// Rejects values that are not positive and finite.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> bool {
        if !is_valid_multiplier(multiplier) {
            return false;
        }
        self.config.speed_multiplier = multiplier;
        self.state.speed_multiplier = multiplier;
        true
    }

    /// Dispatch a decoded host command. `now_ms` is only used by
    /// start/reset and the pause commands.
    pub fn apply(&mut self, command: Command, now_ms: u64) -> bool {
        match command {
            Command::StartGame => {
                self.start_game(now_ms);
                true
            }
            Command::Reset => {
                self.reset(now_ms);
                true
            }
            Command::Pause => self.pause(now_ms),
            Command::Resume => self.resume(now_ms),
            Command::TogglePause => self.toggle_pause(now_ms),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
        }
    }

    fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.state.current else {
            return false;
        };
        let Some(target) = self.state.position.offset(dx, dy) else {
            return false;
        };
        if !is_valid_position(&self.state.board, &piece, target) {
            return false;
        }
        self.state.position = target;
        true
    }

    fn advance_clock(&mut self, now_ms: u64) {
        if let Some(previous) = self.state.last_frame_ms {
            self.state.played_ms += now_ms.saturating_sub(previous);
        }
        self.state.last_frame_ms = Some(now_ms);

        let seconds = self.state.time_played();
        if seconds > self.state.reported_seconds {
            self.state.reported_seconds = seconds;
            self.sink.publish(GameEvent::TimeTick {
                time_played: seconds,
            });
        }
    }

    /// Place the current piece, clear lines, update totals, spawn the next
    /// piece.
    fn land(&mut self) {
        let Some(piece) = self.state.current.take() else {
            return;
        };

        let placed = place_piece(&self.state.board, &piece, self.state.position);
        let cleared = clear_lines(&placed);
        self.state.board = cleared.board;

        let outcome = self.state.progress.after_placement(cleared.lines_cleared);
        self.state.progress = outcome.progress;

        log::debug!(
            "{} landed at ({}, {}), cleared {} (score {}, level {})",
            piece.kind.as_str(),
            self.state.position.x,
            self.state.position.y,
            outcome.lines_cleared,
            outcome.progress.score,
            outcome.progress.level
        );
        self.publish_placement(&outcome);

        self.spawn_next();
    }

    fn publish_placement(&mut self, outcome: &PlacementOutcome) {
        let progress = outcome.progress;

        if outcome.lines_cleared > 0 {
            self.sink.publish(GameEvent::LinesCleared {
                count: outcome.lines_cleared,
                is_tetris: outcome.is_tetris(),
                new_total: progress.lines,
                new_level: progress.level,
            });
        }
        if outcome.score_delta > 0 {
            self.sink.publish(GameEvent::ScoreUpdated {
                score: progress.score,
                delta: outcome.score_delta,
                level: progress.level,
            });
        }
        if outcome.leveled_up() {
            self.sink.publish(GameEvent::LevelUp {
                level: progress.level,
                previous_level: outcome.previous_level,
            });
        }
        self.sink.publish(GameEvent::ComboUpdated {
            combo: progress.combo,
            is_reset: outcome.combo_reset(),
        });
    }

    /// Promote the next piece to current and pick a new next piece.
    /// Ends the game when the new piece does not fit at its spawn position.
    fn spawn_next(&mut self) -> bool {
        let piece = match self.state.next.take() {
            Some(piece) => piece,
            None => ActivePiece::new(self.generator.draw()),
        };
        let position = spawn_position(piece.kind);

        self.state.current = Some(piece);
        self.state.position = position;
        self.state.next = Some(ActivePiece::new(self.generator.draw()));

        if !is_valid_position(&self.state.board, &piece, position) {
            self.finish_game();
            return false;
        }
        true
    }

    fn finish_game(&mut self) {
        self.state.phase = Phase::GameOver;
        let progress = self.state.progress;

        log::info!(
            "game over: score {}, level {}, lines {}, tetrises {}, {}s played",
            progress.score,
            progress.level,
            progress.lines,
            progress.tetris_count,
            self.state.time_played()
        );
        self.sink.publish(GameEvent::GameOver {
            score: progress.score,
            level: progress.level,
            lines: progress.lines,
            tetris_count: progress.tetris_count,
            time_played: self.state.time_played(),
        });
    }
}
