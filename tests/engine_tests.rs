//! Engine tests - lifecycle, commands and the event stream through the
//! public API

use tetrion::core::drop_position;
use tetrion::engine::{EngineConfig, EventLog, GameEngine, GameEvent, Phase};
use tetrion::types::{Command, BOARD_HEIGHT};

fn engine(seed: u32) -> GameEngine<EventLog> {
    GameEngine::new(EngineConfig::default().with_seed(seed), EventLog::new()).unwrap()
}

/// Hard drop at the spawn column until the stack tops out
fn play_until_game_over(engine: &mut GameEngine<EventLog>) -> u64 {
    let mut now = 0;
    for _ in 0..500 {
        if engine.is_game_over() {
            break;
        }
        now += 16;
        engine.tick(now);
        engine.hard_drop();
    }
    assert!(engine.is_game_over());
    now
}

#[test]
fn test_new_engine_is_idle() {
    let mut engine = engine(1);
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.current_piece().is_none());
    assert!(engine.next_piece().is_none());

    // Nothing happens before the first start
    assert!(!engine.tick(1000));
    assert!(!engine.move_left());
    assert!(!engine.rotate());
    assert!(!engine.hard_drop());
    assert!(!engine.pause(0));
    assert!(engine.sink().is_empty());
}

#[test]
fn test_start_game_spawns_current_and_next() {
    let mut engine = engine(1);
    engine.start_game(500);

    assert_eq!(engine.phase(), Phase::Running);
    assert!(engine.current_piece().is_some());
    assert!(engine.next_piece().is_some());
    assert_eq!(engine.progress().level, 1);
    assert_eq!(engine.progress().score, 0);
    assert_eq!(
        engine.sink().events(),
        &[GameEvent::GameStarted { timestamp: 500 }]
    );
}

#[test]
fn test_next_piece_becomes_current() {
    let mut engine = engine(3);
    engine.start_game(0);

    let next = engine.next_piece().unwrap();
    assert!(engine.hard_drop());
    assert_eq!(engine.current_piece().unwrap().kind, next.kind);
}

#[test]
fn test_hard_drop_lands_on_floor() {
    let mut engine = engine(1);
    engine.start_game(0);

    let piece = engine.current_piece().unwrap();
    let landing = drop_position(engine.board(), &piece, engine.current_position());
    assert!(engine.hard_drop());

    assert_eq!(engine.board().occupied_count(), 4);
    let lowest = piece
        .shape
        .cells()
        .map(|(_, dy)| landing.y + dy)
        .max()
        .unwrap();
    assert_eq!(lowest, BOARD_HEIGHT as i8 - 1);

    // No lines: only the combo reset is published
    assert_eq!(engine.sink().names(), vec!["game:started", "combo:updated"]);
    assert_eq!(
        engine.sink().events()[1],
        GameEvent::ComboUpdated {
            combo: 0,
            is_reset: true
        }
    );
}

#[test]
fn test_gravity_follows_fall_interval() {
    let mut engine = engine(1);
    engine.start_game(0);
    assert_eq!(engine.fall_interval_ms(), 1000);

    let start_y = engine.current_position().y;
    assert!(!engine.tick(999));
    assert_eq!(engine.current_position().y, start_y);

    assert!(engine.tick(1000));
    assert_eq!(engine.current_position().y, start_y + 1);

    // Re-measured from the last gravity step
    assert!(!engine.tick(1999));
    assert!(engine.tick(2000));
    assert_eq!(engine.current_position().y, start_y + 2);
}

#[test]
fn test_speed_multiplier_shortens_interval() {
    let mut engine = engine(1);
    assert!(engine.set_speed_multiplier(2.0));
    engine.start_game(0);
    assert_eq!(engine.fall_interval_ms(), 500);

    assert!(!engine.set_speed_multiplier(0.0));
    assert!(!engine.set_speed_multiplier(f64::NAN));
    assert_eq!(engine.fall_interval_ms(), 500);

    assert!(engine.set_speed_multiplier(100.0));
    assert_eq!(engine.fall_interval_ms(), 50);
}

#[test]
fn test_pause_excludes_time_and_freezes_piece() {
    let mut engine = engine(1);
    engine.start_game(0);
    for now in (16..=800).step_by(16) {
        engine.tick(now);
    }
    assert_eq!(engine.time_played_ms(), 800);
    let position = engine.current_position();

    assert!(engine.pause(810));
    assert!(engine.is_paused());
    assert!(!engine.tick(10_000));
    assert!(!engine.move_left());
    assert!(!engine.soft_drop());
    assert_eq!(engine.current_position(), position);
    assert_eq!(engine.time_played_ms(), 810);

    assert!(engine.resume(20_000));
    engine.tick(20_016);
    assert_eq!(engine.time_played_ms(), 826);

    let paused: Vec<_> = engine
        .sink()
        .events()
        .iter()
        .filter_map(|event| match event {
            GameEvent::GamePaused { is_paused, .. } => Some(*is_paused),
            _ => None,
        })
        .collect();
    assert_eq!(paused, vec![true, false]);
}

#[test]
fn test_time_ticks_once_per_second() {
    let mut engine = engine(1);
    engine.start_game(0);
    let mut now = 0;
    while now < 2500 {
        now += 16;
        engine.tick(now);
    }

    let seconds: Vec<_> = engine
        .sink()
        .events()
        .iter()
        .filter_map(|event| match event {
            GameEvent::TimeTick { time_played } => Some(*time_played),
            _ => None,
        })
        .collect();
    assert_eq!(seconds, vec![1, 2]);
}

#[test]
fn test_game_over_is_terminal_and_last() {
    let mut engine = engine(9);
    engine.start_game(0);
    let now = play_until_game_over(&mut engine);

    let progress = engine.progress();
    assert_eq!(engine.sink().names().last(), Some(&"game:over"));
    assert_eq!(engine.sink().count("game:over"), 1);
    match engine.sink().events().last() {
        Some(GameEvent::GameOver {
            score,
            level,
            lines,
            tetris_count,
            ..
        }) => {
            assert_eq!(*score, progress.score);
            assert_eq!(*level, progress.level);
            assert_eq!(*lines, progress.lines);
            assert_eq!(*tetris_count, progress.tetris_count);
        }
        other => panic!("expected game over, got {:?}", other),
    }

    // Nothing but start/reset leaves the terminal phase
    let board = engine.board().clone();
    assert!(!engine.tick(now + 5000));
    assert!(!engine.hard_drop());
    assert!(!engine.move_right());
    assert!(!engine.toggle_pause(now + 5000));
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.sink().count("game:over"), 1);
}

#[test]
fn test_reset_after_game_over_starts_fresh() {
    let mut engine = engine(9);
    engine.start_game(0);
    play_until_game_over(&mut engine);
    let episode = engine.state().episode_id();

    engine.reset(1_000_000);
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.progress().score, 0);
    assert_eq!(engine.progress().level, 1);
    assert_eq!(engine.time_played_ms(), 0);
    assert_eq!(engine.state().episode_id(), episode + 1);
}

#[test]
fn test_same_seed_same_script_same_game() {
    let script = [
        Command::MoveLeft,
        Command::Rotate,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Rotate,
        Command::Rotate,
        Command::MoveLeft,
        Command::HardDrop,
    ];

    let run = |seed: u32| {
        let mut engine = engine(seed);
        engine.start_game(0);
        let mut now = 0;
        for _ in 0..20 {
            for command in script {
                now += 33;
                engine.tick(now);
                engine.apply(command, now);
            }
        }
        (engine.snapshot(), engine.into_sink().drain())
    };

    let (first, first_events) = run(42);
    let (second, second_events) = run(42);
    assert_eq!(first, second);
    assert_eq!(first_events, second_events);
}

#[test]
fn test_apply_dispatches_decoded_commands() {
    let mut engine = engine(1);

    let start = Command::from_str("startGame").unwrap();
    assert!(engine.apply(start, 0));
    assert!(engine.is_playing());

    assert!(engine.apply(Command::from_str("togglePause").unwrap(), 10));
    assert!(engine.is_paused());
    assert!(!engine.apply(Command::Pause, 20));
    assert!(engine.apply(Command::Resume, 30));

    assert!(engine.apply(Command::HardDrop, 40));
    assert_eq!(engine.board().occupied_count(), 4);
}

#[test]
fn test_snapshot_reports_ghost() {
    let mut engine = engine(1);
    assert!(!engine.snapshot().playable());

    engine.start_game(0);
    let snapshot = engine.snapshot();
    assert!(snapshot.playable());

    let piece = snapshot.current.unwrap();
    assert_eq!(
        snapshot.ghost,
        Some(drop_position(&snapshot.board, &piece, snapshot.position))
    );

    // Hard drop lands exactly where the ghost was
    engine.hard_drop();
    let mut expected = snapshot.board.clone();
    expected.lock(&piece, snapshot.ghost.unwrap());
    assert_eq!(engine.board(), &expected);
}

#[test]
fn test_events_serialize_with_wire_names() {
    let mut engine = engine(1);
    engine.start_game(0);
    engine.hard_drop();

    let json = serde_json::to_value(engine.sink().events()).unwrap();
    assert_eq!(json[0]["type"], "game:started");
    assert_eq!(json[1]["type"], "combo:updated");
    assert_eq!(json[1]["isReset"], true);
}
