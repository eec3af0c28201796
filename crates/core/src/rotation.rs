//! Rotation module - quarter turns with kick resolution
//!
//! Two kick policies are provided:
//!
//! - **Simple**: rotate in place, else try the horizontal shifts `+1, -1, +2, -2`.
//! - **SRS**: per-transition kick tables (one for I, one for every other kind),
//!   keyed by `from -> to` rotation state. Offsets are `(dcol, drow)` with rows
//!   growing downward, i.e. the guideline tables with their y component negated.
//!   Reference: https://tetris.wiki/SRS
//!
//! Candidate order is part of the rules: the first candidate that fits wins, so
//! the order decides which wall a piece prefers to kick away from.
//!
//! Failed attempts hand back the caller's original shape, offset and state.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::collision::is_position_valid;
use crate::events::{CoreEvent, EventSink};
use crate::pieces::ActivePiece;
use crate::shape::Shape;
use crate::types::{PieceKind, RotationDirection, RotationState, RulesError};

/// Horizontal shifts tried by the simple policy after the in-place attempt
pub const SIMPLE_KICKS: [i8; 4] = [1, -1, 2, -2];

/// Result of [`attempt_rotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
    pub valid: bool,
    /// Column shift that made the rotation fit (0 when in place or failed)
    pub kick: i8,
}

/// Result of [`attempt_srs_rotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrsRotationOutcome {
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
    pub state: RotationState,
    pub valid: bool,
    /// Index of the winning candidate in the kick list (`Some(0)` = no shift)
    pub kick_index: Option<usize>,
}

/// Rotate a shape and resolve it with the simple kick policy
pub fn attempt_rotation(
    board: &Board,
    shape: &Shape,
    col: i8,
    row: i8,
    direction: RotationDirection,
) -> RotationOutcome {
    let rotated = shape.rotate(direction);

    if is_position_valid(board, &rotated, col, row) {
        return RotationOutcome {
            shape: rotated,
            col,
            row,
            valid: true,
            kick: 0,
        };
    }

    for kick in SIMPLE_KICKS {
        let Some(kicked_col) = col.checked_add(kick) else {
            continue;
        };
        if is_position_valid(board, &rotated, kicked_col, row) {
            log::trace!("rotate {}: kicked by {} columns", direction.as_str(), kick);
            return RotationOutcome {
                shape: rotated,
                col: kicked_col,
                row,
                valid: true,
                kick,
            };
        }
    }

    RotationOutcome {
        shape: *shape,
        col,
        row,
        valid: false,
        kick: 0,
    }
}

type KickList = [(i8, i8); 5];

struct KickEntry {
    from: RotationState,
    to: RotationState,
    offsets: KickList,
}

const fn entry(from: u8, to: u8, offsets: KickList) -> KickEntry {
    const STATES: [RotationState; 4] = [
        RotationState::North,
        RotationState::East,
        RotationState::South,
        RotationState::West,
    ];
    KickEntry {
        from: STATES[from as usize],
        to: STATES[to as usize],
        offsets,
    }
}

/// J, L, S, T, Z (and O, which never needs more than the first candidate)
static JLSTZ_KICKS: [KickEntry; 8] = [
    entry(0, 1, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    entry(1, 0, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    entry(1, 2, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    entry(2, 1, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    entry(2, 3, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    entry(3, 2, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    entry(3, 0, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    entry(0, 3, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
];

static I_KICKS: [KickEntry; 8] = [
    entry(0, 1, [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]),
    entry(1, 0, [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]),
    entry(1, 2, [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]),
    entry(2, 1, [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]),
    entry(2, 3, [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]),
    entry(3, 2, [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]),
    entry(3, 0, [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]),
    entry(0, 3, [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]),
];

static NO_KICK: [(i8, i8); 1] = [(0, 0)];

/// Ordered `(dcol, drow)` candidates for a transition
///
/// Transitions missing from the table (anything that is not a quarter turn)
/// get the single candidate `(0, 0)`.
pub fn srs_kicks(kind: PieceKind, from: RotationState, to: RotationState) -> &'static [(i8, i8)] {
    let table: &'static [KickEntry] = if kind.is_i() { &I_KICKS } else { &JLSTZ_KICKS };
    table
        .iter()
        .find(|e| e.from == from && e.to == to)
        .map(|e| &e.offsets[..])
        .unwrap_or(&NO_KICK)
}

/// `"0->1"`-style label of a transition, as used in logs
pub fn transition_label(from: RotationState, to: RotationState) -> String {
    format!("{}->{}", from.index(), to.index())
}

/// Rotate a shape and resolve it against the SRS kick table
///
/// `shape` must be the shape of `kind` in `state`; the returned state is the
/// new one on success and `state` unchanged on failure.
pub fn attempt_srs_rotation(
    board: &Board,
    kind: PieceKind,
    shape: &Shape,
    col: i8,
    row: i8,
    state: RotationState,
    direction: RotationDirection,
) -> SrsRotationOutcome {
    let rotated = shape.rotate(direction);
    let target = state.rotate(direction);

    for (index, &(dx, dy)) in srs_kicks(kind, state, target).iter().enumerate() {
        let (Some(x), Some(y)) = (col.checked_add(dx), row.checked_add(dy)) else {
            continue;
        };
        if is_position_valid(board, &rotated, x, y) {
            if index > 0 {
                log::trace!(
                    "srs {} {}: candidate {} ({}, {}) fits",
                    kind,
                    transition_label(state, target),
                    index,
                    dx,
                    dy
                );
            }
            return SrsRotationOutcome {
                shape: rotated,
                col: x,
                row: y,
                state: target,
                valid: true,
                kick_index: Some(index),
            };
        }
    }

    SrsRotationOutcome {
        shape: *shape,
        col,
        row,
        state,
        valid: false,
        kick_index: None,
    }
}

/// Kick policy used by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSystem {
    Simple,
    #[default]
    Srs,
}

impl RotationSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            RotationSystem::Simple => "simple",
            RotationSystem::Srs => "srs",
        }
    }

    /// Rotate an active piece; `None` when no candidate fits
    ///
    /// Emits `RotationKicked` when the piece had to shift and `RotationFailed`
    /// when it could not turn at all.
    pub fn rotate(
        self,
        board: &Board,
        piece: &ActivePiece,
        direction: RotationDirection,
        sink: &mut dyn EventSink,
    ) -> Option<ActivePiece> {
        let result = match self {
            RotationSystem::Simple => {
                let out = attempt_rotation(board, &piece.shape, piece.col, piece.row, direction);
                out.valid.then(|| {
                    let next = ActivePiece {
                        shape: out.shape,
                        col: out.col,
                        row: out.row,
                        rotation: piece.rotation.rotate(direction),
                        ..*piece
                    };
                    (next, out.kick != 0)
                })
            }
            RotationSystem::Srs => {
                let out = attempt_srs_rotation(
                    board,
                    piece.kind,
                    &piece.shape,
                    piece.col,
                    piece.row,
                    piece.rotation,
                    direction,
                );
                out.valid.then(|| {
                    let next = ActivePiece {
                        shape: out.shape,
                        col: out.col,
                        row: out.row,
                        rotation: out.state,
                        ..*piece
                    };
                    (next, out.kick_index != Some(0))
                })
            }
        };

        match result {
            Some((next, kicked)) => {
                if kicked {
                    sink.emit(CoreEvent::RotationKicked {
                        direction,
                        col_offset: next.col - piece.col,
                        row_offset: next.row - piece.row,
                    });
                }
                Some(next)
            }
            None => {
                sink.emit(CoreEvent::RotationFailed { direction });
                None
            }
        }
    }
}

impl std::str::FromStr for RotationSystem {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(RotationSystem::Simple),
            "srs" => Ok(RotationSystem::Srs),
            _ => Err(RulesError::InvalidConfig("rotation system must be simple or srs")),
        }
    }
}
