//! Headless runner (default binary).
//!
//! Drives one game with synthetic 16ms frames and a greedy placement
//! policy, logging every event, then prints a JSON summary. Configure with
//! the `TETRION_*` environment variables (see `EngineConfig::from_env`),
//! `TETRION_MAX_FRAMES` to cap the run, and `RUST_LOG` for log output.

mod autoplay;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use tetrion::core::Progress;
use tetrion::engine::{EngineConfig, EventSink, GameEngine, GameEvent, LogSink, Phase};

/// Synthetic frame length
const FRAME_MS: u64 = 16;

/// Frames between two placements by the autoplayer
const FRAMES_PER_MOVE: u64 = 10;

const DEFAULT_MAX_FRAMES: u64 = 100_000;

/// Logs each event and counts them by name
#[derive(Debug, Default)]
struct CountingSink {
    log: LogSink,
    counts: BTreeMap<&'static str, u64>,
}

impl EventSink for CountingSink {
    fn publish(&mut self, event: GameEvent) {
        *self.counts.entry(event.name()).or_default() += 1;
        self.log.publish(event);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    config: EngineConfig,
    frames: u64,
    phase: Phase,
    time_played_ms: u64,
    progress: Progress,
    events: BTreeMap<&'static str, u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::from_env();
    let max_frames = std::env::var("TETRION_MAX_FRAMES")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let mut engine =
        GameEngine::new(config, CountingSink::default()).context("invalid engine configuration")?;
    log::info!("running up to {} frames with {:?}", max_frames, config);

    let frames = run(&mut engine, max_frames);

    let summary = Summary {
        config: *engine.config(),
        frames,
        phase: engine.phase(),
        time_played_ms: engine.time_played_ms(),
        progress: engine.progress(),
        events: engine.into_sink().counts,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
    );
    Ok(())
}

fn run<S: EventSink>(engine: &mut GameEngine<S>, max_frames: u64) -> u64 {
    let mut now = 0;
    engine.start_game(now);

    let mut frame = 0;
    while frame < max_frames && !engine.is_game_over() {
        frame += 1;
        now += FRAME_MS;
        engine.tick(now);

        if frame % FRAMES_PER_MOVE != 0 {
            continue;
        }
        let Some(piece) = engine.current_piece() else {
            continue;
        };
        match autoplay::best_plan(engine.board(), piece, engine.current_position()) {
            Some(plan) => autoplay::execute(engine, plan),
            None => {
                engine.hard_drop();
            }
        }
    }
    frame
}
