//! Game module - one playable session
//!
//! Ties the board, the bag, the active piece, hold and scoring together. The
//! host owns time: it calls [`Game::gravity_step`] every
//! [`Game::drop_interval_ms`] and forwards player input through
//! [`Game::apply_action`] or the individual move methods.
//!
//! Lifecycle:
//! 1. [`Game::start`] spawns the first piece.
//! 2. Pieces move, rotate and drop until they lock.
//! 3. A lock merges the piece, clears rows, scores, and spawns the next piece.
//! 4. A spawn that does not fit ends the game; only [`Game::restart`] leaves
//!    that state.

use crate::bag::Bag;
use crate::board::Board;
use crate::collision::{drop_distance, landing_row};
use crate::config::RulesConfig;
use crate::events::{CoreEvent, EventSink, NullSink};
use crate::lock::{lock_piece_with_events, LockResult};
use crate::pieces::ActivePiece;
use crate::rotation::RotationSystem;
use crate::scoring::{ScoreManager, ScoreState};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, PieceKind, RotationDirection, RulesError, PREVIEW_LEN};

/// What a gravity step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do (not started, game over)
    Idle,
    /// The piece fell one row
    Moved,
    /// The piece could not fall and was locked
    Locked(LockResult),
}

/// A session of play, reporting events to `S`
#[derive(Debug, Clone)]
pub struct Game<S = NullSink> {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    bag: Bag,
    next: [PieceKind; PREVIEW_LEN],
    scoring: ScoreManager,
    rotation_system: RotationSystem,
    started: bool,
    game_over: bool,
    pieces_locked: u32,
    last_lock: Option<LockResult>,
    sink: S,
}

impl Game<NullSink> {
    /// Default rules with the given bag seed
    pub fn new(seed: u32) -> Self {
        Self::build(
            RulesConfig {
                seed,
                ..RulesConfig::default()
            },
            NullSink,
        )
    }

    pub fn from_config(config: RulesConfig) -> Result<Self, RulesError> {
        Self::with_sink(config, NullSink)
    }
}

impl<S: EventSink> Game<S> {
    /// Session that reports every [`CoreEvent`] to `sink`
    pub fn with_sink(config: RulesConfig, sink: S) -> Result<Self, RulesError> {
        config.validate()?;
        Ok(Self::build(config, sink))
    }

    fn build(config: RulesConfig, sink: S) -> Self {
        let bag = Bag::new(config.seed);
        let next = bag.preview();
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            bag,
            next,
            scoring: ScoreManager::new(config.scoring),
            rotation_system: config.rotation_system,
            started: false,
            game_over: false,
            pieces_locked: 0,
            last_lock: None,
            sink,
        }
    }

    /// Spawn the first piece; later calls do nothing
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::debug!("game started (seed {})", self.bag.seed());
        self.spawn();
    }

    /// Draw the next piece from the bag and place it at the spawn point
    ///
    /// Returns false, and ends the game, when the spawn position is blocked.
    fn spawn(&mut self) -> bool {
        let kind = self.bag.draw();
        self.next = self.bag.preview();
        self.spawn_kind(kind)
    }

    fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::new(kind);
        if !piece.is_valid(&self.board) {
            log::debug!(
                "spawn of {} blocked after {} pieces, game over",
                kind,
                self.pieces_locked
            );
            self.active = None;
            self.game_over = true;
            self.sink.emit(CoreEvent::SpawnBlocked { kind });
            return false;
        }
        self.active = Some(piece);
        self.sink.emit(CoreEvent::PieceSpawned { kind });
        true
    }

    fn playable_piece(&self) -> Option<ActivePiece> {
        if self.game_over || !self.started {
            return None;
        }
        self.active
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        match piece.shifted(dx, dy) {
            Some(moved) if moved.is_valid(&self.board) => {
                self.active = Some(moved);
                true
            }
            _ => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Move down one row for 1 point; does not lock when blocked
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_shift(0, 1);
        if moved {
            self.scoring.add_drop_points(1, false);
        }
        moved
    }

    /// Drop to the landing row for 2 points per row, then lock
    pub fn hard_drop(&mut self) -> Option<LockResult> {
        let piece = self.playable_piece()?;
        let distance = drop_distance(&self.board, &piece.shape, piece.col, piece.row);
        self.active = Some(ActivePiece {
            row: piece.row + distance as i8,
            ..piece
        });
        self.scoring.add_drop_points(u32::from(distance), true);
        self.lock()
    }

    /// Rotate with the configured kick policy; the piece is unchanged on failure
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        match self
            .rotation_system
            .rotate(&self.board, &piece, direction, &mut self.sink)
        {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Swap the active piece with the held one (or the next piece when the
    /// hold slot is empty). Allowed once per locked piece.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        self.can_hold = false;
        match self.hold.replace(piece.kind) {
            Some(held) => {
                self.spawn_kind(held);
            }
            None => {
                self.spawn();
            }
        }
        true
    }

    /// Lock the active piece where it is, score the clear and spawn the next
    pub fn lock(&mut self) -> Option<LockResult> {
        let piece = self.playable_piece()?;
        self.active = None;

        let result = lock_piece_with_events(
            &mut self.board,
            &piece.shape,
            piece.col,
            piece.row,
            Some(piece.kind),
            &mut self.sink,
        );
        self.scoring
            .clear_lines_with_events(result.lines_cleared, &mut self.sink);
        self.pieces_locked += 1;
        self.can_hold = true;
        self.last_lock = Some(result.clone());

        self.spawn();
        Some(result)
    }

    /// One tick of gravity: fall a row, or lock when resting on something
    pub fn gravity_step(&mut self) -> StepOutcome {
        if self.playable_piece().is_none() {
            return StepOutcome::Idle;
        }
        if self.try_shift(0, 1) {
            return StepOutcome::Moved;
        }
        match self.lock() {
            Some(result) => StepOutcome::Locked(result),
            None => StepOutcome::Idle,
        }
    }

    /// Dispatch a host action; returns whether it changed anything
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Start over with the same seed and rules
    pub fn restart(&mut self) {
        let seed = self.bag.seed();
        self.restart_with_seed(seed);
    }

    /// Start over with a new seed; the first piece is spawned immediately
    pub fn restart_with_seed(&mut self, seed: u32) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.bag = Bag::new(seed);
        self.next = self.bag.preview();
        self.scoring.reset();
        self.game_over = false;
        self.pieces_locked = 0;
        self.last_lock = None;
        self.started = false;
        self.start();
    }

    /// Frame row the active piece would land on after a hard drop
    pub fn ghost_row(&self) -> Option<i8> {
        self.active
            .map(|p| landing_row(&self.board, &p.shape, p.col, p.row))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            active: self.active.map(Into::into),
            ghost_row: self.ghost_row(),
            hold: self.hold,
            can_hold: self.can_hold,
            next: self.next,
            score: self.score(),
            level: self.level(),
            lines: self.lines(),
            drop_interval_ms: self.drop_interval_ms(),
            started: self.started,
            game_over: self.game_over,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for hosts that set up positions (puzzles, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn next_queue(&self) -> &[PieceKind; PREVIEW_LEN] {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.total_lines()
    }

    pub fn score_state(&self) -> ScoreState {
        self.scoring.state()
    }

    /// Milliseconds between gravity steps at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        self.scoring.drop_interval_ms()
    }

    pub fn rotation_system(&self) -> RotationSystem {
        self.rotation_system
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn last_lock(&self) -> Option<&LockResult> {
        self.last_lock.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
