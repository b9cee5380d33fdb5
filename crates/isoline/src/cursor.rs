//! Mutable state of one trace.
//!
//! Every field the spiral search and the edge follower share lives here, so
//! the state functions in `spiral` and `crossing` take the cursor explicitly
//! instead of reaching for globals.

use crate::emit::PenAction;
use crate::visitation::Orientation;

/// Cursor over the grid in 1-based vertex indices.
#[derive(Debug, Clone)]
pub(crate) struct TraceCursor {
    /// Current vertex. The spiral negates a component to walk toward lower
    /// indices; it is made positive again before any grid access.
    pub cell: [isize; 2],
    /// Spiral limits per side: `[nx, ny, -1, -1]`.
    pub limit: [isize; 4],
    /// How far the current ring has reached on each side.
    pub ring: [isize; 4],
    /// Direction the ring last grew in (0..4).
    pub dir: usize,
    /// Direction being tried next (0..4).
    pub next_dir: usize,
    /// Side index into `limit` / `ring` for the active direction.
    pub side: usize,
    /// Edge orientation under test: 0 along x, 1 along y.
    pub orient: usize,
    /// Boundary code from `detect_boundary`: bit 0 low side, bit 1 high side.
    pub boundary: u8,
    /// Edge (1..=4, clockwise from bottom) the contour entered the cell by.
    pub entry_edge: usize,
    /// Edge the contour leaves the cell by.
    pub exit_edge: usize,
    /// Crossing fraction on each of the four edges of the current cell.
    pub fraction: [f64; 4],
    pub pen: PenAction,
    /// Set once the boundary-only pass is exhausted and interior starts are
    /// allowed.
    pub interior_pass: bool,
    /// Vertex the spiral restarts from after a segment or a pass ends.
    pub resume: [isize; 2],
    /// Index of the active level.
    pub level: usize,
    /// Value of the active level.
    pub value: f64,
}

impl TraceCursor {
    pub fn new(x_steps: usize, y_steps: usize, level: usize, value: f64) -> Self {
        Self {
            cell: [1, 1],
            limit: [x_steps as isize, y_steps as isize, -1, -1],
            ring: [0; 4],
            dir: 0,
            next_dir: 1,
            side: 0,
            orient: 0,
            boundary: 0,
            entry_edge: 0,
            exit_edge: 0,
            fraction: [0.0; 4],
            pen: PenAction::MovePen,
            interior_pass: false,
            resume: [1, 1],
            level,
            value,
        }
    }

    /// Point the active spiral direction at the current vertex by giving the
    /// walking component the sign of that side's limit.
    pub fn face_spiral_direction(&mut self) {
        self.orient = self.dir % 2;
        let o = self.orient;
        self.cell[o] = with_sign(self.cell[o], self.limit[self.side]);
    }

    /// Make the previous exit edge the entry edge of the next cell, carrying
    /// its crossing fraction over.
    pub fn enter_through_exit(&mut self) {
        let mut entry = self.exit_edge + 2;
        if entry > 4 {
            entry -= 4;
        }
        self.entry_edge = entry;
        self.fraction[entry - 1] = self.fraction[self.exit_edge - 1];
    }

    /// 1-based fractional index of the crossing on the current edge.
    pub fn crossing_xy(&self) -> [f64; 2] {
        let o = self.orient;
        let mut xy = [0.0; 2];
        xy[o] = self.cell[o] as f64 + self.fraction[self.entry_edge - 1];
        xy[1 - o] = self.cell[1 - o] as f64;
        xy
    }

    /// Visitation key of the current edge in 0-based indices.
    pub fn edge_key(&self) -> (usize, usize, Orientation) {
        (
            self.cell[0] as usize - 1,
            self.cell[1] as usize - 1,
            Orientation::from_index(self.orient),
        )
    }
}

/// `|a|` carrying the sign of `b`.
fn with_sign(a: isize, b: isize) -> isize {
    if b < 0 {
        -a.abs()
    } else {
        a.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sign() {
        assert_eq!(with_sign(3, -1), -3);
        assert_eq!(with_sign(-3, 5), 3);
        assert_eq!(with_sign(-3, -1), -3);
    }

    #[test]
    fn test_enter_through_exit_wraps() {
        let mut cursor = TraceCursor::new(4, 4, 0, 1.0);
        cursor.exit_edge = 3;
        cursor.fraction[2] = 0.25;
        cursor.enter_through_exit();
        assert_eq!(cursor.entry_edge, 1);
        assert_eq!(cursor.fraction[0], 0.25);

        cursor.exit_edge = 2;
        cursor.fraction[1] = 0.75;
        cursor.enter_through_exit();
        assert_eq!(cursor.entry_edge, 4);
        assert_eq!(cursor.fraction[3], 0.75);
    }

    #[test]
    fn test_crossing_xy_along_y() {
        let mut cursor = TraceCursor::new(4, 4, 0, 1.0);
        cursor.cell = [2, 3];
        cursor.orient = 1;
        cursor.entry_edge = 2;
        cursor.fraction[1] = 0.5;
        assert_eq!(cursor.crossing_xy(), [2.0, 3.5]);
    }
}
