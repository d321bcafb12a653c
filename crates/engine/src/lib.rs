//! Game engine - owns the authoritative game state and drives it
//!
//! [`GameEngine`] strings the pure rules from `tetrion-core` together into
//! the `Idle → Running ⇄ Paused → GameOver` state machine and publishes a
//! typed event stream to an injected [`EventSink`].
//!
//! # Example
//!
//! ```
//! use tetrion_engine::{EngineConfig, EventLog, GameEngine, Phase};
//!
//! let mut engine = GameEngine::new(EngineConfig::default().with_seed(7), EventLog::new()).unwrap();
//! engine.start_game(0);
//! assert_eq!(engine.phase(), Phase::Running);
//!
//! // Host loop: one tick per frame with a monotonic timestamp
//! let mut now = 0;
//! while !engine.is_game_over() && now < 60_000 {
//!     now += 16;
//!     engine.tick(now);
//!     engine.hard_drop();
//! }
//!
//! assert!(engine.sink().count("combo:updated") > 0);
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod state;

pub use tetrion_core as core;
pub use tetrion_types as types;

pub use config::{ConfigError, EngineConfig};
pub use engine::GameEngine;
pub use events::{EventLog, EventSink, GameEvent, LogSink, NullSink};
pub use snapshot::GameSnapshot;
pub use state::{GameState, Phase};
