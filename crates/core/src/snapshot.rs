//! Snapshot module - immutable copies of a session for renderers
//!
//! A snapshot is plain data: it can be sent to another thread or serialized
//! without borrowing the session.

use serde::{Deserialize, Serialize};

use crate::board::{COLS, ROWS};
use crate::pieces::{shape_for_state, ActivePiece};
use crate::shape::Shape;
use crate::types::{Cell, PieceKind, RotationState, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: RotationState,
    pub col: i8,
    pub row: i8,
}

impl ActiveSnapshot {
    pub fn shape(&self) -> Shape {
        shape_for_state(self.kind, self.rotation)
    }

    /// Absolute `(col, row)` of the piece's cells
    pub fn cells(&self) -> Vec<(i8, i8)> {
        self.shape()
            .occupied()
            .filter_map(|(r, c, _)| {
                Some((self.col.checked_add(c as i8)?, self.row.checked_add(r as i8)?))
            })
            .collect()
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(piece: ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            col: piece.col,
            row: piece.row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[Cell; COLS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    /// Frame row the active piece would land on
    pub ghost_row: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next: [PieceKind; PREVIEW_LEN],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub started: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Cell at `(col, row)`, `None` outside the board
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; COLS]; ROWS],
            active: None,
            ghost_row: None,
            hold: None,
            can_hold: true,
            next: [PieceKind::I; PREVIEW_LEN],
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
            started: false,
            game_over: false,
        }
    }
}
