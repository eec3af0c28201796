//! Rotation tests - simple kicks, SRS kicks, failure leaves inputs alone

use tetris_rules::core::pieces::{shape_for_kind, shape_for_state, ActivePiece};
use tetris_rules::core::rotation::{
    attempt_rotation, attempt_srs_rotation, srs_kicks, RotationSystem, SIMPLE_KICKS,
};
use tetris_rules::core::{Board, CoreEvent, Shape};
use tetris_rules::types::{PieceKind, RotationDirection, RotationState};

/// Board filled everywhere except the cells of `shape` at `(col, row)`
fn sealed_around(shape: &Shape, col: i8, row: i8) -> Board {
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            board.set(x, y, 1);
        }
    }
    for (r, c, _) in shape.occupied() {
        board.set(col + c as i8, row + r as i8, 0);
    }
    board
}

#[test]
fn test_simple_kick_order() {
    assert_eq!(SIMPLE_KICKS, [1, -1, 2, -2]);
}

#[test]
fn test_simple_rotation_kicks_off_left_wall() {
    let board = Board::new();
    let vertical = shape_for_state(PieceKind::I, RotationState::East);

    let out = attempt_rotation(&board, &vertical, -2, 5, RotationDirection::Clockwise);
    assert!(out.valid);
    assert_eq!(out.kick, 2);
    assert_eq!((out.col, out.row), (0, 5));
    assert_eq!(out.shape, shape_for_state(PieceKind::I, RotationState::South));
}

#[test]
fn test_simple_rotation_prefers_right_kick() {
    let mut board = Board::new();
    let t = shape_for_kind(PieceKind::T);
    // In place the clockwise T needs frame column 2 row 2: block it.
    board.set(5, 7, 9);
    let out = attempt_rotation(&board, &t, 3, 5, RotationDirection::Clockwise);
    assert!(out.valid);
    assert_eq!(out.kick, 1);
    assert_eq!(out.col, 4);
}

#[test]
fn test_failed_rotation_returns_original() {
    let t = shape_for_kind(PieceKind::T);
    let board = sealed_around(&t, 3, 8);
    let before = board;

    let out = attempt_rotation(&board, &t, 3, 8, RotationDirection::Clockwise);
    assert!(!out.valid);
    assert_eq!(out.shape, t);
    assert_eq!((out.col, out.row, out.kick), (3, 8, 0));
    assert_eq!(board, before);

    let srs = attempt_srs_rotation(
        &board,
        PieceKind::T,
        &t,
        3,
        8,
        RotationState::North,
        RotationDirection::CounterClockwise,
    );
    assert!(!srs.valid);
    assert_eq!(srs.shape, t);
    assert_eq!((srs.col, srs.row), (3, 8));
    assert_eq!(srs.state, RotationState::North);
    assert_eq!(srs.kick_index, None);
}

#[test]
fn test_srs_i_kick_off_right_wall() {
    let board = Board::new();
    let vertical = shape_for_state(PieceKind::I, RotationState::East);

    let out = attempt_srs_rotation(
        &board,
        PieceKind::I,
        &vertical,
        7,
        10,
        RotationState::East,
        RotationDirection::Clockwise,
    );
    assert!(out.valid);
    assert_eq!(out.kick_index, Some(1));
    assert_eq!((out.col, out.row), (6, 10));
    assert_eq!(out.state, RotationState::South);
}

#[test]
fn test_srs_tries_candidates_in_table_order() {
    let mut board = Board::new();
    board.set(6, 12, 3);
    let vertical = shape_for_state(PieceKind::I, RotationState::East);

    assert_eq!(
        srs_kicks(PieceKind::I, RotationState::East, RotationState::South),
        &[(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]
    );

    let out = attempt_srs_rotation(
        &board,
        PieceKind::I,
        &vertical,
        7,
        10,
        RotationState::East,
        RotationDirection::Clockwise,
    );
    assert!(out.valid);
    assert_eq!(out.kick_index, Some(3));
    assert_eq!((out.col, out.row), (6, 8));
}

#[test]
fn test_jlstz_table_shared_by_o() {
    assert_eq!(
        srs_kicks(PieceKind::O, RotationState::North, RotationState::East),
        srs_kicks(PieceKind::T, RotationState::North, RotationState::East)
    );
    assert_ne!(
        srs_kicks(PieceKind::I, RotationState::North, RotationState::East),
        srs_kicks(PieceKind::T, RotationState::North, RotationState::East)
    );
}

#[test]
fn test_rotation_system_reports_events() {
    let mut board = Board::new();
    board.set(6, 12, 3);
    let piece = ActivePiece {
        shape: shape_for_state(PieceKind::I, RotationState::East),
        rotation: RotationState::East,
        ..ActivePiece::at(PieceKind::I, 7, 10)
    };

    let mut events: Vec<CoreEvent> = Vec::new();
    let rotated = RotationSystem::Srs
        .rotate(&board, &piece, RotationDirection::Clockwise, &mut events)
        .unwrap();
    assert_eq!(rotated.rotation, RotationState::South);
    assert_eq!(
        events,
        vec![CoreEvent::RotationKicked {
            direction: RotationDirection::Clockwise,
            col_offset: -1,
            row_offset: -2,
        }]
    );

    let sealed = sealed_around(&piece.shape, piece.col, piece.row);
    events.clear();
    assert!(RotationSystem::Simple
        .rotate(&sealed, &piece, RotationDirection::Clockwise, &mut events)
        .is_none());
    assert_eq!(
        events,
        vec![CoreEvent::RotationFailed {
            direction: RotationDirection::Clockwise
        }]
    );
}

#[test]
fn test_simple_system_tracks_rotation_state() {
    let board = Board::new();
    let mut piece = ActivePiece::at(PieceKind::J, 3, 5);
    let mut events: Vec<CoreEvent> = Vec::new();
    for expected in [
        RotationState::West,
        RotationState::South,
        RotationState::East,
        RotationState::North,
    ] {
        piece = RotationSystem::Simple
            .rotate(&board, &piece, RotationDirection::CounterClockwise, &mut events)
            .unwrap();
        assert_eq!(piece.rotation, expected);
        assert_eq!(piece.shape, shape_for_state(PieceKind::J, expected));
    }
    assert!(events.is_empty());
}

#[test]
fn test_rotation_system_parse() {
    assert_eq!("SRS".parse::<RotationSystem>(), Ok(RotationSystem::Srs));
    assert_eq!("simple".parse::<RotationSystem>(), Ok(RotationSystem::Simple));
    assert!("nes".parse::<RotationSystem>().is_err());
    assert_eq!(RotationSystem::default(), RotationSystem::Srs);
}
