//! Spiral search for the next untraced crossing.
//!
//! Each function is one state of the search and returns the next one. The
//! spiral grows a ring around its starting vertex one side at a time; each
//! side's reach is kept in `cursor.ring` and bounded by `cursor.limit`. When
//! no side can grow any more the grid has been covered: the first time this
//! happens only boundary crossings were eligible, so the search restarts from
//! the resume vertex with interior starts allowed; the second time the level
//! is exhausted.

use crate::access::GridAccess;
use crate::cursor::TraceCursor;
use crate::emit::PenAction;
use crate::visitation::VisitationTable;

/// Result of one search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Check whether the edge along the current orientation exists.
    Scan,
    /// Test the current edge for a seed crossing.
    Test,
    /// Try the other orientation, then move on.
    NextOrientation,
    /// Move the spiral one vertex.
    Advance,
    /// A seed was found; follow the contour from it.
    Follow,
    /// Every vertex has been searched for this level.
    Exhausted,
}

/// Unit step along each orientation.
const ALONG: [[isize; 2]; 2] = [[1, 0], [0, 1]];

/// Start a new ring around the current vertex.
pub(crate) fn restart(cursor: &mut TraceCursor, grid: &GridAccess<'_>) -> Transition {
    let [i, j] = cursor.cell;
    cursor.ring = [i, j, -i, -j];
    cursor.dir = 0;
    cursor.next_dir = 1;
    cursor.side = 0;
    cursor.cell = [i.abs(), j.abs()];

    if !grid.valid(cursor.cell[0], cursor.cell[1]) {
        cursor.face_spiral_direction();
        return Transition::Advance;
    }

    cursor.orient = 0;
    Transition::Scan
}

/// The edge along `orient` exists when it stays on the grid and its far
/// vertex holds valid data.
pub(crate) fn scan(cursor: &TraceCursor, grid: &GridAccess<'_>) -> Transition {
    let o = cursor.orient;
    if cursor.cell[o] >= cursor.limit[o] {
        return Transition::NextOrientation;
    }

    let [i, j] = far_vertex(cursor);
    if !grid.valid(i, j) {
        return Transition::NextOrientation;
    }

    Transition::Test
}

pub(crate) fn next_orientation(cursor: &mut TraceCursor) -> Transition {
    cursor.orient += 1;
    if cursor.orient <= 1 {
        return Transition::Scan;
    }
    cursor.face_spiral_direction();
    Transition::Advance
}

/// Walk to the next valid vertex of the spiral.
pub(crate) fn advance(cursor: &mut TraceCursor, grid: &GridAccess<'_>) -> Transition {
    loop {
        let o = cursor.orient;

        if cursor.cell[o] < cursor.limit[cursor.side] {
            cursor.cell[o] += 1;
            if cursor.cell[o] > cursor.ring[cursor.side] {
                cursor.ring[cursor.side] = cursor.cell[o];
                cursor.dir = cursor.next_dir;
                cursor.next_dir = cursor.dir + 1;
                cursor.side = cursor.next_dir - 1;
                if cursor.next_dir > 3 {
                    cursor.next_dir = 0;
                }
            }

            cursor.cell = [cursor.cell[0].abs(), cursor.cell[1].abs()];
            if !grid.valid(cursor.cell[0], cursor.cell[1]) {
                cursor.face_spiral_direction();
                continue;
            }

            cursor.orient = 0;
            return Transition::Scan;
        }

        // This side is blocked by the grid edge; turn to the next one.
        if cursor.dir != cursor.next_dir {
            cursor.next_dir += 1;
            cursor.cell[o] = cursor.limit[cursor.side];
            cursor.side = cursor.next_dir - 1;
            cursor.orient = 1 - o;
            cursor.cell[cursor.orient] = cursor.ring[cursor.side];
            if cursor.next_dir > 3 {
                cursor.next_dir = 0;
            }
            continue;
        }

        if cursor.interior_pass {
            return Transition::Exhausted;
        }

        cursor.interior_pass = true;
        cursor.cell = cursor.resume;
        match restart(cursor, grid) {
            Transition::Advance => continue,
            next => return next,
        }
    }
}

/// Classify the current edge against the data boundary.
///
/// Bit 0 is set when the cell on the low side (toward smaller indices across
/// the edge) is off the grid or touches invalid data, bit 1 likewise for the
/// high side. A value of 3 means the edge borders no valid cell.
pub(crate) fn detect_boundary(cursor: &mut TraceCursor, grid: &GridAccess<'_>) {
    let o = cursor.orient;
    let across = 1 - o;
    let [i, j] = cursor.cell;
    let [pi, pj] = ALONG[across];
    let [ai, aj] = ALONG[o];

    let mut code = 1;
    if cursor.cell[across] != 1 {
        if grid.valid(i - pi, j - pj) && grid.valid(i - pi + ai, j - pj + aj) {
            code = 0;
        }
        if cursor.cell[across] >= cursor.limit[across] {
            cursor.boundary = code + 2;
            return;
        }
    }

    if !grid.valid(i + pi, j + pj) || !grid.valid(i + 1, j + 1) {
        code += 2;
    }
    cursor.boundary = code;
}

/// Try to start a contour on the current edge.
///
/// During the first pass only edges on the data boundary qualify, so open
/// contours are traced from one end to the other before any closed contour
/// is started.
pub(crate) fn test_seed(
    cursor: &mut TraceCursor,
    grid: &GridAccess<'_>,
    visits: &mut VisitationTable,
) -> Transition {
    detect_boundary(cursor, grid);
    if cursor.boundary == 3 || (cursor.boundary == 0 && !cursor.interior_pass) {
        return Transition::NextOrientation;
    }

    let [i, j] = cursor.cell;
    let [fi, fj] = far_vertex(cursor);
    let z1 = grid.z(i, j);
    let z2 = grid.z(fi, fj);
    if !crossed_by_contour(cursor, visits, z1, z2) {
        return Transition::NextOrientation;
    }

    let mut entry = cursor.orient + 1;
    if cursor.boundary != 1 {
        entry += 2;
    }
    cursor.entry_edge = entry;
    cursor.pen = if cursor.interior_pass {
        PenAction::StartInterior
    } else {
        PenAction::StartAtBoundary
    };
    cursor.fraction[entry - 1] = (cursor.value - z1) / (z2 - z1);
    Transition::Follow
}

/// True when the edge brackets the level and has not been traced for it yet.
/// Marks the edge on success.
fn crossed_by_contour(
    cursor: &TraceCursor,
    visits: &mut VisitationTable,
    z1: f64,
    z2: f64,
) -> bool {
    let (i, j, orientation) = cursor.edge_key();
    if visits.is_marked(cursor.level, i, j, orientation) {
        return false;
    }
    if !brackets(cursor.value, z1, z2) {
        return false;
    }
    visits.mark(cursor.level, i, j, orientation);
    true
}

/// Half-open crossing test shared by the search and the follower. Equal
/// corner values never bracket, so the interpolation never divides by zero.
#[inline]
pub(crate) fn brackets(level: f64, z1: f64, z2: f64) -> bool {
    level > z1.min(z2) && level <= z1.max(z2)
}

fn far_vertex(cursor: &TraceCursor) -> [isize; 2] {
    let [di, dj] = ALONG[cursor.orient];
    [cursor.cell[0] + di, cursor.cell[1] + dj]
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::Grid;

    fn ramp(n: usize) -> Grid {
        let z: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64; n]).collect();
        Grid::from_nested(&z).unwrap()
    }

    #[test]
    fn test_brackets_half_open() {
        assert!(brackets(5.0, 0.0, 10.0));
        assert!(brackets(10.0, 0.0, 10.0));
        assert!(!brackets(0.0, 0.0, 10.0));
        assert!(!brackets(3.0, 3.0, 3.0));
        assert!(!brackets(f64::NAN, 0.0, 10.0));
    }

    #[test]
    fn test_detect_boundary_codes() {
        let grid = ramp(4);
        let access = GridAccess::new(&grid);
        let mut cursor = TraceCursor::new(4, 4, 0, 1.5);

        // Bottom row edge along x: low side off-grid
        cursor.cell = [2, 1];
        cursor.orient = 0;
        detect_boundary(&mut cursor, &access);
        assert_eq!(cursor.boundary, 1);

        // Interior edge
        cursor.cell = [2, 2];
        detect_boundary(&mut cursor, &access);
        assert_eq!(cursor.boundary, 0);

        // Top row edge along x: high side off-grid
        cursor.cell = [2, 4];
        detect_boundary(&mut cursor, &access);
        assert_eq!(cursor.boundary, 2);

        // Left column edge along y
        cursor.cell = [1, 2];
        cursor.orient = 1;
        detect_boundary(&mut cursor, &access);
        assert_eq!(cursor.boundary, 1);
    }

    #[test]
    fn test_detect_boundary_sees_fill() {
        let mut weights = vec![1.0; 9];
        // Vertex (1, 0) 0-based, i.e. (2, 1) 1-based
        weights[1] = 0.0;
        let grid = ramp(3).with_weights(weights).unwrap();
        let access = GridAccess::new(&grid);
        let mut cursor = TraceCursor::new(3, 3, 0, 0.5);

        // Edge (1,2)-(2,2) along x: the cell below holds the fill vertex
        cursor.cell = [1, 2];
        cursor.orient = 0;
        detect_boundary(&mut cursor, &access);
        assert_eq!(cursor.boundary, 1);
    }

    #[test]
    fn test_spiral_visits_every_vertex() {
        let grid = ramp(5);
        let access = GridAccess::new(&grid);
        let mut cursor = TraceCursor::new(5, 5, 0, 100.0);
        let mut seen = std::collections::HashSet::new();

        let mut state = restart(&mut cursor, &access);
        let mut guard = 0;
        while state != Transition::Exhausted {
            if state == Transition::Scan && cursor.orient == 0 {
                seen.insert((cursor.cell[0], cursor.cell[1], cursor.interior_pass));
            }
            state = match state {
                Transition::Scan => scan(&cursor, &access),
                Transition::Test | Transition::NextOrientation => next_orientation(&mut cursor),
                Transition::Advance => advance(&mut cursor, &access),
                Transition::Follow | Transition::Exhausted => unreachable!(),
            };
            guard += 1;
            assert!(guard < 10_000, "spiral did not terminate");
        }

        for pass in [false, true] {
            for i in 1..=5 {
                for j in 1..=5 {
                    assert!(seen.contains(&(i, j, pass)), "missed ({i}, {j}) pass {pass}");
                }
            }
        }
    }
}
