//! Collision module - the single placement predicate
//!
//! Every movement, rotation and gravity rule asks one question: can this shape
//! sit with its frame's top-left corner at `(col, row)`? All helpers below are
//! that predicate with an adjusted offset.

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{RotationDirection, EMPTY};

/// Absolute board coordinates of a shape cell, `None` on `i8` overflow
#[inline]
fn absolute(col: i8, row: i8, local_row: usize, local_col: usize) -> Option<(i8, i8)> {
    let x = col.checked_add(local_col as i8)?;
    let y = row.checked_add(local_row as i8)?;
    Some((x, y))
}

/// Whether `shape` fits at `(col, row)`
///
/// False if any occupied cell leaves `[0, width) x [0, height)` (rows above the
/// top count as out of bounds exactly like rows below the bottom) or lands on a
/// non-empty board cell. An empty shape is trivially valid.
pub fn is_position_valid(board: &Board, shape: &Shape, col: i8, row: i8) -> bool {
    shape.occupied().all(|(r, c, _)| match absolute(col, row, r, c) {
        Some((x, y)) => board.get(x, y) == Some(EMPTY),
        None => false,
    })
}

pub fn can_move(board: &Board, shape: &Shape, col: i8, row: i8, dx: i8, dy: i8) -> bool {
    match (col.checked_add(dx), row.checked_add(dy)) {
        (Some(x), Some(y)) => is_position_valid(board, shape, x, y),
        _ => false,
    }
}

pub fn can_move_down(board: &Board, shape: &Shape, col: i8, row: i8) -> bool {
    can_move(board, shape, col, row, 0, 1)
}

pub fn can_move_left(board: &Board, shape: &Shape, col: i8, row: i8) -> bool {
    can_move(board, shape, col, row, -1, 0)
}

pub fn can_move_right(board: &Board, shape: &Shape, col: i8, row: i8) -> bool {
    can_move(board, shape, col, row, 1, 0)
}

/// Whether the rotated shape fits at the same offset (no kicks)
pub fn can_rotate(
    board: &Board,
    shape: &Shape,
    col: i8,
    row: i8,
    direction: RotationDirection,
) -> bool {
    is_position_valid(board, &shape.rotate(direction), col, row)
}

/// Rows the shape can fall from `(col, row)` before it rests on something
///
/// Returns 0 when the shape cannot move down at all, including when the
/// starting position is itself invalid, and for an empty shape.
pub fn drop_distance(board: &Board, shape: &Shape, col: i8, row: i8) -> u8 {
    if shape.is_empty() || !is_position_valid(board, shape, col, row) {
        return 0;
    }
    let mut distance: u8 = 0;
    while let Some(y) = row.checked_add(distance as i8 + 1) {
        if !is_position_valid(board, shape, col, y) {
            break;
        }
        distance += 1;
    }
    distance
}

/// Row the shape's frame would rest on after a hard drop (ghost piece row)
pub fn landing_row(board: &Board, shape: &Shape, col: i8, row: i8) -> i8 {
    row + drop_distance(board, shape, col, row) as i8
}
