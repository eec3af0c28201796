//! Rules core - pure, deterministic falling-block rules
//!
//! Everything here is synchronous and free of I/O. Hosts own the clock, input
//! and rendering; the core answers "is this placement valid", "what does this
//! rotation become", "what does locking here clear and score".
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 occupancy grid and row clearing
//! - [`shape`], [`pieces`]: 4x4 shape frames and the seven-piece catalog
//! - [`collision`]: placement validity and drop distance
//! - [`rotation`]: quarter turns resolved by the simple or SRS kick policy
//! - [`lock`]: merge a landed piece and clear completed rows
//! - [`scoring`]: line bonuses, levels and fall speed
//! - [`bag`]: seeded 7-bag randomizer
//! - [`game`]: a full session built from the pieces above
//! - [`events`], [`snapshot`], [`config`]: host plumbing
//!
//! # Example
//!
//! ```
//! use tetris_rules_core::Game;
//! use tetris_rules_types::GameAction;
//!
//! let mut game = Game::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod bag;
pub mod board;
pub mod collision;
pub mod config;
pub mod events;
pub mod game;
pub mod lock;
pub mod pieces;
pub mod rotation;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use tetris_rules_types as types;

pub use bag::{Bag, Lcg};
pub use board::{Board, ClearedRows};
pub use collision::{drop_distance, is_position_valid, landing_row};
pub use config::RulesConfig;
pub use events::{CoreEvent, EventSink, FnSink, NullSink};
pub use game::{Game, StepOutcome};
pub use lock::{lock_piece, merge_piece, LockResult};
pub use pieces::{rotate_shape, shape_for_index, shape_for_kind, ActivePiece};
pub use rotation::{attempt_rotation, attempt_srs_rotation, srs_kicks, RotationSystem};
pub use scoring::{ScoreManager, ScoreState, ScoringConfig};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
