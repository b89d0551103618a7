//! Pieces module - tetromino matrices, the shape catalog, and rotation
//!
//! Pieces are small rectangular cell matrices: `0` for empty, the kind's
//! color id for occupied. Rotation produces a new matrix value (an N x M
//! matrix rotates into an M x N one), so shapes are never aliased or edited
//! in place.
//!
//! Collisions after a rotation are resolved by a bounded horizontal offset
//! search: `+1, -1, +2, -2, ...` up to the rotated matrix's width. This is a
//! simplified wall-kick approximation, not the SRS kick tables.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, CELL_EMPTY, MAX_MATRIX_CELLS, MAX_MATRIX_DIM};

/// A piece shape matrix
///
/// Fixed-capacity, row-major cell storage; all catalog shapes (and their
/// rotations) fit in 4x4. Treated as an immutable value: movement changes the
/// piece position, rotation swaps in a new `Matrix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    cells: ArrayVec<Cell, MAX_MATRIX_CELLS>,
    cols: usize,
    rows: usize,
}

impl Matrix {
    /// Build a matrix from row slices
    pub fn from_rows(rows: &[&[Cell]]) -> Self {
        debug_assert!(!rows.is_empty() && rows.len() <= MAX_MATRIX_DIM);
        let cols = rows[0].len();
        debug_assert!(cols > 0 && cols <= MAX_MATRIX_DIM);
        debug_assert!(rows.iter().all(|r| r.len() == cols));

        let mut cells = ArrayVec::new();
        for row in rows {
            for &v in *row {
                cells.push(v);
            }
        }
        Self {
            cells,
            cols,
            rows: rows.len(),
        }
    }

    /// Number of columns (the matrix width)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows (the matrix height)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell value at (x, y); x indexes columns, y indexes rows
    pub fn get(&self, x: usize, y: usize) -> Cell {
        debug_assert!(x < self.cols && y < self.rows);
        self.cells[y * self.cols + x]
    }

    fn set(&mut self, x: usize, y: usize, value: Cell) {
        debug_assert!(x < self.cols && y < self.rows);
        self.cells[y * self.cols + x] = value;
    }

    /// Iterate over occupied cells as `(x, y, value)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, &v)| {
            if v != CELL_EMPTY {
                Some((i % self.cols, i / self.cols, v))
            } else {
                None
            }
        })
    }

    /// Rotate 90 degrees, producing a new matrix with transposed dimensions
    ///
    /// Clockwise maps `(x, y)` to `(rows - 1 - y, x)`; counter-clockwise maps
    /// it to `(y, cols - 1 - x)`. Equivalent to transpose plus row/column
    /// reversal, and correct for non-square shapes (the 1x4 I bar rotates
    /// into a 4x1 column).
    pub fn rotated(&self, clockwise: bool) -> Matrix {
        let mut cells = ArrayVec::new();
        for _ in 0..self.cells.len() {
            cells.push(CELL_EMPTY);
        }
        let mut out = Matrix {
            cells,
            cols: self.rows,
            rows: self.cols,
        };

        for y in 0..self.rows {
            for x in 0..self.cols {
                let v = self.get(x, y);
                if clockwise {
                    out.set(self.rows - 1 - y, x, v);
                } else {
                    out.set(y, self.cols - 1 - x, v);
                }
            }
        }
        out
    }
}

/// Create a fresh matrix for a piece kind
///
/// Returns an independently-owned copy on every call; callers are free to
/// rotate or discard it without affecting the catalog or other pieces. Each
/// shape's occupied cells carry that kind's color id.
pub fn create_piece(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => Matrix::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Matrix::from_rows(&[&[2, 2], &[2, 2]]),
        PieceKind::T => Matrix::from_rows(&[&[3, 3, 3], &[0, 3, 0]]),
        PieceKind::L => Matrix::from_rows(&[&[4, 4, 4], &[4, 0, 0]]),
        PieceKind::J => Matrix::from_rows(&[&[5, 5, 5], &[0, 0, 5]]),
        PieceKind::Z => Matrix::from_rows(&[&[6, 6, 0], &[0, 6, 6]]),
        PieceKind::S => Matrix::from_rows(&[&[0, 7, 7], &[7, 7, 0]]),
    }
}

/// Horizontal offsets tried when a rotation collides: alternating sign,
/// increasing magnitude, bounded by the rotated piece's width
pub fn kick_offsets(width: usize) -> ArrayVec<i32, { 2 * MAX_MATRIX_DIM }> {
    debug_assert!(width >= 1 && width <= MAX_MATRIX_DIM);
    let mut offsets = ArrayVec::new();
    for magnitude in 1..=width as i32 {
        offsets.push(magnitude);
        offsets.push(-magnitude);
    }
    offsets
}

/// Try to rotate a piece matrix, resolving collisions with the offset search
///
/// `collides` tests the candidate matrix at a candidate x position (the y
/// position is unchanged by a kick). Returns the rotated matrix and resolved
/// x on success; `None` means the rotation is a no-op and the caller keeps
/// the original matrix and position.
pub fn try_rotate<F>(
    matrix: &Matrix,
    x: i32,
    clockwise: bool,
    mut collides: F,
) -> Option<(Matrix, i32)>
where
    F: FnMut(&Matrix, i32) -> bool,
{
    let rotated = matrix.rotated(clockwise);

    if !collides(&rotated, x) {
        return Some((rotated, x));
    }
    for dx in kick_offsets(rotated.cols()) {
        if !collides(&rotated, x + dx) {
            return Some((rotated, x + dx));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_returns_fresh_copies() {
        let a = create_piece(PieceKind::T);
        let b = create_piece(PieceKind::T);
        assert_eq!(a, b);

        // Rotating one copy must not disturb the other
        let rotated = a.rotated(true);
        assert_ne!(rotated, b);
        assert_eq!(create_piece(PieceKind::T), b);
    }

    #[test]
    fn test_catalog_color_ids() {
        for kind in PieceKind::ALL {
            let matrix = create_piece(kind);
            let mut occupied = 0;
            for (_, _, v) in matrix.occupied() {
                assert_eq!(v, kind.color_id());
                occupied += 1;
            }
            assert_eq!(occupied, 4, "{:?} must occupy four cells", kind);
        }
    }

    #[test]
    fn test_i_rotation_dimensions() {
        let i = create_piece(PieceKind::I);
        assert_eq!((i.rows(), i.cols()), (1, 4));

        let vertical = i.rotated(true);
        assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
        for y in 0..4 {
            assert_eq!(vertical.get(0, y), 1);
        }
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            for clockwise in [true, false] {
                let original = create_piece(kind);
                let mut m = original.clone();
                for _ in 0..4 {
                    m = m.rotated(clockwise);
                }
                assert_eq!(m, original, "{:?} cw={}", kind, clockwise);
            }
        }
    }

    #[test]
    fn test_rotations_are_inverse() {
        for kind in PieceKind::ALL {
            let original = create_piece(kind);
            assert_eq!(original.rotated(true).rotated(false), original);
            assert_eq!(original.rotated(false).rotated(true), original);
        }
    }

    #[test]
    fn test_rotation_preserves_cells() {
        // Distinct values verify the mapping, not just the footprint
        let m = Matrix::from_rows(&[&[1, 2], &[3, 4], &[5, 6]]);
        let cw = m.rotated(true);
        assert_eq!((cw.rows(), cw.cols()), (2, 3));
        // Bottom-left of the input becomes the top-left of the output
        assert_eq!(cw.get(0, 0), 5);
        assert_eq!(cw.get(1, 0), 3);
        assert_eq!(cw.get(2, 0), 1);
        assert_eq!(cw.get(0, 1), 6);
        assert_eq!(cw.get(2, 1), 2);
    }

    #[test]
    fn test_kick_offsets_order_and_bound() {
        let offsets = kick_offsets(3);
        assert_eq!(offsets.as_slice(), &[1, -1, 2, -2, 3, -3]);

        let offsets = kick_offsets(1);
        assert_eq!(offsets.as_slice(), &[1, -1]);
    }

    #[test]
    fn test_try_rotate_unobstructed() {
        let i = create_piece(PieceKind::I);
        let result = try_rotate(&i, 3, true, |_, _| false);
        let (rotated, x) = result.unwrap();
        assert_eq!(x, 3);
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
    }

    #[test]
    fn test_try_rotate_kicks_off_wall() {
        let i = create_piece(PieceKind::I).rotated(true); // vertical, width 1

        // Horizontal I at x = -2 would hang past the left wall; the search
        // must find the first offset that clears it.
        let result = try_rotate(&i, -2, true, |m, x| x < 0 || x + m.cols() as i32 > 10);
        let (rotated, x) = result.unwrap();
        assert_eq!(rotated.cols(), 4);
        assert_eq!(x, 0, "offsets +1, -1, +2 are tried in order; +2 clears");
    }

    #[test]
    fn test_try_rotate_reverts_when_blocked() {
        let t = create_piece(PieceKind::T);
        let result = try_rotate(&t, 4, true, |_, _| true);
        assert!(result.is_none());
    }
}
