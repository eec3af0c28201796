//! Snapshot tests - serde round trips and cross-thread handoff

use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use tetris_rules::core::{Board, GameSnapshot, RulesConfig, Shape};
use tetris_rules::core::{Game, ScoringConfig};
use tetris_rules::types::{GameAction, PieceKind};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_plain_data_is_send_and_sync() {
    assert_send_sync::<Board>();
    assert_send_sync::<Shape>();
    assert_send_sync::<GameSnapshot>();
}

#[test]
fn test_snapshot_json_round_trip_mid_game() {
    let mut game = Game::new(99);
    game.start();
    for action in [GameAction::MoveLeft, GameAction::HardDrop, GameAction::Hold] {
        game.apply_action(action);
    }
    let snapshot = game.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
    assert!(back.hold.is_some());
    assert_eq!(back.active.map(|a| a.cells().len()), Some(4));
}

#[test]
fn test_piece_kinds_serialize_lowercase() {
    let json = serde_json::to_string(&[PieceKind::I, PieceKind::T]).unwrap();
    assert_eq!(json, r#"["i","t"]"#);
}

/// Host-side save file wrapping the core's types
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct SavedGame {
    rules: RulesConfig,
    snapshot: GameSnapshot,
}

#[test]
fn test_host_can_embed_core_types() {
    let mut game = Game::new(3);
    game.start();
    game.hard_drop();

    let saved = SavedGame {
        rules: RulesConfig {
            seed: 3,
            scoring: ScoringConfig {
                lines_per_level: 5,
                ..ScoringConfig::default()
            },
            ..RulesConfig::default()
        },
        snapshot: game.snapshot(),
    };
    let json = serde_json::to_string_pretty(&saved).unwrap();
    let back: SavedGame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);
    assert_eq!(back.rules.scoring.lines_per_level, 5);
}

#[test]
fn test_render_thread_reads_copies() {
    let (tx, rx) = mpsc::channel::<GameSnapshot>();
    let renderer = thread::spawn(move || {
        rx.iter()
            .map(|snapshot| snapshot.board.iter().flatten().filter(|&&c| c != 0).count())
            .collect::<Vec<_>>()
    });

    let mut game = Game::new(17);
    game.start();
    for _ in 0..3 {
        game.hard_drop();
        tx.send(game.snapshot()).unwrap();
    }
    drop(tx);

    let filled = renderer.join().unwrap();
    assert_eq!(filled, vec![4, 8, 12]);
}
