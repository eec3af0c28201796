//! Lock module - merging a landed piece and clearing rows
//!
//! Locking writes the piece into the board, then takes one snapshot of which
//! rows are complete and compacts them away. Rows that only become full because
//! of compaction are not re-scanned in the same call.

use crate::board::{Board, ClearedRows};
use crate::events::{CoreEvent, EventSink, NullSink};
use crate::shape::Shape;
use crate::types::PieceKind;

/// Outcome of a single lock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockResult {
    /// Number of rows removed (bounded only by the board height)
    pub lines_cleared: usize,
    /// Removed rows in pre-clear coordinates, ascending
    pub cleared_rows: ClearedRows,
    /// Shape cells that landed inside the board
    pub cells_written: usize,
}

/// Write every in-bounds occupied cell of `shape` into the board
///
/// Cells outside the board (typically above the top) are dropped rather than
/// rejected, and existing contents are overwritten. Returns the number of
/// cells written.
pub fn merge_piece(board: &mut Board, shape: &Shape, col: i8, row: i8) -> usize {
    let mut written = 0;
    for (r, c, value) in shape.occupied() {
        let (Some(x), Some(y)) = (col.checked_add(c as i8), row.checked_add(r as i8)) else {
            continue;
        };
        if board.set(x, y, value) {
            written += 1;
        }
    }
    written
}

/// Merge a piece, clear completed rows and report what happened
pub fn lock_piece(board: &mut Board, shape: &Shape, col: i8, row: i8) -> LockResult {
    lock_piece_with_events(board, shape, col, row, None, &mut NullSink)
}

/// [`lock_piece`] that also reports `PieceLocked` and `LinesCleared`
pub fn lock_piece_with_events(
    board: &mut Board,
    shape: &Shape,
    col: i8,
    row: i8,
    kind: Option<PieceKind>,
    sink: &mut dyn EventSink,
) -> LockResult {
    let cells_written = merge_piece(board, shape, col, row);
    let cleared_rows = board.clear_completed_rows();
    let lines_cleared = cleared_rows.len();

    log::debug!(
        "locked at ({}, {}): {} cells, {} lines",
        col,
        row,
        cells_written,
        lines_cleared
    );

    sink.emit(CoreEvent::PieceLocked {
        kind,
        cells_written,
        lines_cleared,
    });
    if lines_cleared > 0 {
        sink.emit(CoreEvent::LinesCleared {
            rows: cleared_rows.clone(),
            count: lines_cleared,
        });
    }

    LockResult {
        lines_cleared,
        cleared_rows,
        cells_written,
    }
}

/// Indices of complete rows, ascending
pub fn completed_rows(board: &Board) -> ClearedRows {
    board.completed_rows()
}

pub fn is_row_complete(board: &Board, row: usize) -> bool {
    board.is_row_complete(row)
}

/// Whether any row in `start..end` is complete
pub fn has_completed_rows_in_range(board: &Board, start: usize, end: usize) -> bool {
    board.has_completed_rows_in_range(start, end)
}
