//! Edge-to-edge step of the contour follower.
//!
//! Cell edges are numbered clockwise from 1 (the edge from `(i, j)` to
//! `(i + 1, j)`) to 4. Edges 1 and 3 run along x, 2 and 4 along y; edges 3
//! and 4 are owned by the neighbouring base vertices `(i, j + 1)` and
//! `(i + 1, j)`.

use crate::access::GridAccess;
use crate::cursor::TraceCursor;
use crate::emit::PenAction;
use crate::spiral::brackets;

/// Corner offsets: edge `k` runs from `(i + C[k-1], j + C[k])` to
/// `(i + C[k], j + C[k+1])`.
const CORNER: [isize; 6] = [1, 0, 0, 1, 1, 0];

/// Move the cursor from the entry edge of a cell to its exit edge.
///
/// The crossing fraction on every crossed edge is measured from the edge's
/// base vertex, so a fraction carried into the neighbouring cell keeps its
/// meaning.
pub(crate) fn continue_contour(cursor: &mut TraceCursor, grid: &GridAccess<'_>) {
    let entry = cursor.entry_edge;
    if entry >= 3 {
        cursor.cell[0] -= CORNER[entry - 1];
        cursor.cell[1] -= CORNER[entry + 1];
    }

    let [i, j] = cursor.cell;
    let level = cursor.value;
    let mut crossed = 0;

    for edge in 1..=4 {
        if edge == entry {
            continue;
        }
        let mut z1 = grid.z(i + CORNER[edge - 1], j + CORNER[edge]);
        let mut z2 = grid.z(i + CORNER[edge], j + CORNER[edge + 1]);
        if brackets(level, z1, z2) {
            if edge == 1 || edge == 4 {
                std::mem::swap(&mut z1, &mut z2);
            }
            cursor.fraction[edge - 1] = (level - z1) / (z2 - z1);
            cursor.exit_edge = edge;
            crossed += 1;
        }
    }

    if crossed != 1 {
        cursor.exit_edge = saddle_exit(entry, &cursor.fraction);
    }

    let exit = cursor.exit_edge;
    cursor.orient = exit - 1;
    cursor.pen = PenAction::Continue;
    if exit >= 3 {
        cursor.cell[0] += CORNER[exit - 1];
        cursor.cell[1] += CORNER[exit + 1];
        cursor.orient = exit - 3;
    }
}

/// Exit edge when the level crosses all four edges of a cell.
///
/// Pairs top-to-left and bottom-to-right when the crossing on edge 3 lies
/// before the one on edge 1, the other pairing otherwise. The rule gives the
/// same topology with the axes swapped and never lets a contour cross itself
/// inside a cell; downstream consumers depend on it, so it must not change.
fn saddle_exit(entry: usize, fraction: &[f64; 4]) -> usize {
    if fraction[2] >= fraction[0] {
        let exit = 3 - entry as isize;
        if exit <= 0 {
            (exit + 4) as usize
        } else {
            exit as usize
        }
    } else {
        5 - entry
    }
}
