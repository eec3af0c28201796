//! Board module - the occupancy grid
//!
//! The board is a 10x20 grid of [`Cell`] values stored as a flat, row-major array.
//! Coordinates are `(col, row)` with `col` in 0..10 (left to right) and `row` in
//! 0..20 (top to bottom). Dimensions never change after creation.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Number of columns as a `usize`
pub const COLS: usize = BOARD_WIDTH as usize;

/// Number of rows as a `usize`
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// Row indices removed by a clear, ascending (top to bottom)
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board from row slices; missing rows or columns stay empty and
    /// extra ones are ignored
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().take(ROWS).enumerate() {
            for (x, &cell) in row.as_ref().iter().take(COLS).enumerate() {
                board.cells[y * COLS + x] = cell;
            }
        }
        board
    }

    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get the cell at `(col, row)`, or `None` when out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(col, row)`; returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_empty_at(&self, col: i8, row: i8) -> bool {
        self.get(col, row) == Some(EMPTY)
    }

    /// In bounds and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(cell) if cell != EMPTY)
    }

    pub fn is_out_of_bounds(&self, col: i8, row: i8) -> bool {
        Self::index(col, row).is_none()
    }

    /// Cells of one row, or `None` past the bottom
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= ROWS {
            return None;
        }
        let start = row * COLS;
        Some(&self.cells[start..start + COLS])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(COLS)
    }

    /// Check if a row is completely filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Indices of all completed rows, ascending
    pub fn completed_rows(&self) -> ClearedRows {
        (0..ROWS).filter(|&y| self.is_row_complete(y)).collect()
    }

    /// Whether any row in `start..end` is complete (`end` is clamped to the height)
    pub fn has_completed_rows_in_range(&self, start: usize, end: usize) -> bool {
        (start..end.min(ROWS)).any(|y| self.is_row_complete(y))
    }

    /// Remove one row and shift every row above it down by one
    ///
    /// Returns the number of rows removed (1, or 0 when `row` is out of range).
    pub fn clear_row(&mut self, row: usize) -> usize {
        if row >= ROWS {
            return 0;
        }

        for y in (1..=row).rev() {
            let src = (y - 1) * COLS;
            self.cells.copy_within(src..src + COLS, y * COLS);
        }
        self.cells[..COLS].fill(EMPTY);

        1
    }

    /// Remove every completed row in one pass and compact the rest downward
    ///
    /// Completeness is decided on the board as it is when the call starts:
    /// the scan runs bottom to top and each surviving row is copied to the
    /// lowest free slot, so a row is always read before anything is written
    /// over it. Freed rows at the top are emptied. Returns the removed row
    /// indices (pre-clear coordinates), ascending.
    pub fn clear_completed_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = ROWS;

        for read_y in (0..ROWS).rev() {
            if self.is_row_complete(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * COLS;
                self.cells.copy_within(src..src + COLS, write_y * COLS);
            }
        }

        self.cells[..write_y * COLS].fill(EMPTY);

        cleared.reverse();
        cleared
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy into a fixed 2-D grid (snapshots, rendering threads)
    pub fn to_rows(&self) -> [[Cell; COLS]; ROWS] {
        let mut out = [[EMPTY; COLS]; ROWS];
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: i8, value: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, row, value);
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_flat_layout() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        board.set(5, 10, 3);

        assert_eq!(board.cells[0], 1);
        assert_eq!(board.cells[10 * COLS + 5], 3);
        assert_eq!(board.row(10).unwrap()[5], 3);
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut rows = [[EMPTY; COLS]; ROWS];
        rows[5][3] = 2;
        rows[19][9] = 7;

        let board = Board::from_rows(&rows);
        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.rows().count(), ROWS);
    }

    #[test]
    fn test_clear_completed_rows_matches_one_at_a_time() {
        let mut board = Board::new();
        fill_row(&mut board, 19, 1);
        fill_row(&mut board, 17, 2);
        fill_row(&mut board, 12, 3);
        board.set(4, 18, 4);
        board.set(0, 16, 5);
        board.set(9, 3, 6);

        let mut one_by_one = board;
        // Top-down, so earlier removals do not shift the later indices.
        for y in [12usize, 17, 19] {
            one_by_one.clear_row(y);
        }

        let cleared = board.clear_completed_rows();
        assert_eq!(cleared.as_slice(), &[12, 17, 19]);
        assert_eq!(board, one_by_one);
    }

    #[test]
    fn test_has_completed_rows_in_range_clamps() {
        let mut board = Board::new();
        fill_row(&mut board, 19, 1);

        assert!(board.has_completed_rows_in_range(15, 100));
        assert!(!board.has_completed_rows_in_range(0, 19));
        assert!(!board.has_completed_rows_in_range(25, 30));
    }
}
