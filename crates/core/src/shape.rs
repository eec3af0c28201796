//! Shape module - square cell frames for pieces
//!
//! Every piece, in every rotation, lives in the same 4x4 frame so rotation never
//! has to resize a bounding box. Local coordinates are `(row, col)` inside the
//! frame; the frame's top-left corner is what callers position on the board.

use std::fmt;

use crate::types::{Cell, RotationDirection, EMPTY, SHAPE_SIZE};

const N: usize = SHAPE_SIZE;

/// Immutable 4x4 frame of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[Cell; N]; N],
}

/// Tight box around the occupied cells of a shape, in local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl ShapeBounds {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }
}

impl Shape {
    pub const fn new(cells: [[Cell; N]; N]) -> Self {
        Self { cells }
    }

    /// A frame with no occupied cells
    pub const fn empty() -> Self {
        Self {
            cells: [[EMPTY; N]; N],
        }
    }

    /// Build a frame from its top rows; missing rows stay empty and extra ones are ignored
    pub fn from_rows(rows: &[[Cell; N]]) -> Self {
        let mut cells = [[EMPTY; N]; N];
        for (dst, src) in cells.iter_mut().zip(rows) {
            *dst = *src;
        }
        Self { cells }
    }

    /// Side length of the frame
    pub fn size(&self) -> usize {
        N
    }

    /// Cell at local `(row, col)`; `None` outside the frame
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Occupied cells as `(row, col, value)`, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != EMPTY)
                .map(move |(c, &cell)| (r, c, cell))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell == EMPTY)
    }

    /// Quarter-turn the frame
    ///
    /// Clockwise sends local `(i, j)` to `(j, N-1-i)`; counter-clockwise sends it
    /// to `(N-1-j, i)`. Four turns in either direction give back the input.
    pub fn rotate(&self, direction: RotationDirection) -> Shape {
        let mut out = [[EMPTY; N]; N];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                let (r, c) = match direction {
                    RotationDirection::Clockwise => (j, N - 1 - i),
                    RotationDirection::CounterClockwise => (N - 1 - j, i),
                };
                out[r][c] = cell;
            }
        }
        Shape { cells: out }
    }

    /// Rotate clockwise `turns` times (mod 4)
    pub fn rotate_times(&self, turns: u8) -> Shape {
        (0..turns % 4).fold(*self, |shape, _| shape.rotate(RotationDirection::Clockwise))
    }

    /// Tight bounds of the occupied cells, `None` for an empty frame
    pub fn bounds(&self) -> Option<ShapeBounds> {
        self.occupied().fold(None, |acc, (r, c, _)| {
            Some(match acc {
                None => ShapeBounds {
                    min_row: r,
                    max_row: r,
                    min_col: c,
                    max_col: c,
                },
                Some(b) => ShapeBounds {
                    min_row: b.min_row.min(r),
                    max_row: b.max_row.max(r),
                    min_col: b.min_col.min(c),
                    max_col: b.max_col.max(c),
                },
            })
        })
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Shape {
    /// `#` for occupied, `.` for empty, one line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell == EMPTY { "." } else { "#" })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_like() -> Shape {
        Shape::from_rows(&[[0, 0, 7, 0], [7, 7, 7, 0]])
    }

    #[test]
    fn test_clockwise_mapping() {
        let shape = Shape::from_rows(&[[1, 0, 0, 0]]);
        // (0, 0) -> (0, 3)
        assert_eq!(shape.rotate(RotationDirection::Clockwise).get(0, 3), Some(1));
        // (0, 0) -> (3, 0)
        assert_eq!(
            shape.rotate(RotationDirection::CounterClockwise).get(3, 0),
            Some(1)
        );
    }

    #[test]
    fn test_rotation_closure() {
        let shape = l_like();
        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let back = (0..4).fold(shape, |s, _| s.rotate(direction));
            assert_eq!(back, shape);
        }
        assert_eq!(shape.rotate_times(4), shape);
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        let shape = l_like();
        let turned = shape.rotate(RotationDirection::Clockwise);
        assert_ne!(turned, shape);
        assert_eq!(turned.rotate(RotationDirection::CounterClockwise), shape);
    }

    #[test]
    fn test_rotation_keeps_cell_values() {
        let shape = l_like();
        let turned = shape.rotate(RotationDirection::Clockwise);
        assert_eq!(turned.cell_count(), 4);
        assert!(turned.occupied().all(|(_, _, v)| v == 7));
    }

    #[test]
    fn test_bounds() {
        let bounds = l_like().bounds().unwrap();
        assert_eq!(
            bounds,
            ShapeBounds {
                min_row: 0,
                max_row: 1,
                min_col: 0,
                max_col: 2,
            }
        );
        assert_eq!(bounds.width(), 3);
        assert_eq!(bounds.height(), 2);
        assert_eq!(Shape::empty().bounds(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(l_like().to_string(), "..#.\n###.\n....\n....");
    }
}
