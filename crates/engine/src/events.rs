//! Event stream published by the engine
//!
//! The engine knows nothing about its subscribers; it hands every event to
//! an injected [`EventSink`]. Per placement the order is always
//! `lines:cleared` → `score:updated` → `level:up` → `combo:updated`, with
//! `game:over` last when the following spawn is blocked.
//!
//! Serialized events carry their wire name in a `type` field:
//!
//! ```
//! use tetrion_engine::GameEvent;
//!
//! let event = GameEvent::ComboUpdated { combo: 0, is_reset: true };
//! assert_eq!(event.name(), "combo:updated");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    #[serde(rename = "game:started")]
    GameStarted { timestamp: u64 },

    /// Published on both pause and resume
    #[serde(rename = "game:paused", rename_all = "camelCase")]
    GamePaused { is_paused: bool, time_played: u64 },

    /// Only when at least one line was cleared
    #[serde(rename = "lines:cleared", rename_all = "camelCase")]
    LinesCleared {
        count: u8,
        is_tetris: bool,
        new_total: u32,
        new_level: u32,
    },

    /// Only when the score changed
    #[serde(rename = "score:updated")]
    ScoreUpdated { score: u32, delta: u32, level: u32 },

    #[serde(rename = "level:up", rename_all = "camelCase")]
    LevelUp { level: u32, previous_level: u32 },

    /// After every placement
    #[serde(rename = "combo:updated", rename_all = "camelCase")]
    ComboUpdated { combo: u32, is_reset: bool },

    #[serde(rename = "game:over", rename_all = "camelCase")]
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
        tetris_count: u32,
        time_played: u64,
    },

    /// Once per whole second of played time
    #[serde(rename = "time:tick", rename_all = "camelCase")]
    TimeTick { time_played: u64 },
}

impl GameEvent {
    /// Wire name, e.g. `"lines:cleared"`
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game:started",
            GameEvent::GamePaused { .. } => "game:paused",
            GameEvent::LinesCleared { .. } => "lines:cleared",
            GameEvent::ScoreUpdated { .. } => "score:updated",
            GameEvent::LevelUp { .. } => "level:up",
            GameEvent::ComboUpdated { .. } => "combo:updated",
            GameEvent::GameOver { .. } => "game:over",
            GameEvent::TimeTick { .. } => "time:tick",
        }
    }
}

/// Receiver of engine events.
///
/// Called synchronously from inside engine commands; implementations must
/// not call back into the engine.
pub trait EventSink {
    fn publish(&mut self, event: GameEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: GameEvent) {
        (**self).publish(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: GameEvent) {}
}

/// Records events in publication order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Wire names in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GameEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Forwards events to the `log` facade (`time:tick` at trace, the rest at
/// info)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&mut self, event: GameEvent) {
        match event {
            GameEvent::TimeTick { time_played } => {
                log::trace!("{} time_played={}", event.name(), time_played)
            }
            _ => log::info!("{} {:?}", event.name(), event),
        }
    }
}
