//! Pieces module - canonical tetromino shapes
//!
//! Each kind has one base shape in the shared 4x4 frame; every other orientation
//! is derived by rotating the frame, so the catalog stores nothing per rotation.
//!
//! Frame placement of the base shapes:
//! - **I** lies on row 1, so its four orientations match SRS exactly
//! - **O** sits on rows/cols 1-2, the centre of the frame, and is unchanged by rotation
//! - **T, S, Z, J, L** occupy the top-left 3x3 corner

use crate::board::Board;
use crate::collision::is_position_valid;
use crate::shape::Shape;
use crate::types::{
    PieceKind, RotationDirection, RotationState, RulesError, SPAWN_COL, SPAWN_ROW,
};

const I_SHAPE: Shape = Shape::new([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::new([[0, 0, 0, 0], [0, 2, 2, 0], [0, 2, 2, 0], [0, 0, 0, 0]]);
const T_SHAPE: Shape = Shape::new([[0, 3, 0, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: Shape = Shape::new([[0, 4, 4, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SHAPE: Shape = Shape::new([[5, 5, 0, 0], [0, 5, 5, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Shape = Shape::new([[6, 0, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: Shape = Shape::new([[0, 0, 7, 0], [7, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Base (spawn orientation) shape for a kind
pub fn shape_for_kind(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Base shape for a 0-based catalog index
///
/// An index outside the seven kinds is a caller bug and is reported, never
/// replaced by some other piece.
pub fn shape_for_index(index: usize) -> Result<Shape, RulesError> {
    PieceKind::from_index(index).map(shape_for_kind)
}

/// Shape of a kind in a given rotation state
pub fn shape_for_state(kind: PieceKind, state: RotationState) -> Shape {
    shape_for_kind(kind).rotate_times(state.index())
}

/// Quarter-turn a shape; see [`Shape::rotate`]
pub fn rotate_shape(shape: &Shape, direction: RotationDirection) -> Shape {
    shape.rotate(direction)
}

/// A falling piece: kind, current shape, frame offset and SRS state
///
/// Plain value; moving or rotating produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
    pub rotation: RotationState,
}

impl ActivePiece {
    /// A piece of `kind` at the spawn point in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_COL, SPAWN_ROW)
    }

    pub fn at(kind: PieceKind, col: i8, row: i8) -> Self {
        Self {
            kind,
            shape: shape_for_kind(kind),
            col,
            row,
            rotation: RotationState::North,
        }
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        is_position_valid(board, &self.shape, self.col, self.row)
    }

    /// Same piece shifted by `(dx, dy)`; `None` if the offset overflows
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            col: self.col.checked_add(dx)?,
            row: self.row.checked_add(dy)?,
            ..*self
        })
    }

    /// Absolute `(col, row)` of every occupied cell; cells past `i8` are skipped
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied()
            .filter_map(move |(r, c, _)| {
                Some((self.col.checked_add(c as i8)?, self.row.checked_add(r as i8)?))
            })
    }
}
