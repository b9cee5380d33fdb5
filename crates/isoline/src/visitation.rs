//! Per-level record of which cell edges a contour has already crossed.

/// Direction of a cell edge leaving a vertex toward larger indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Edge from `(i, j)` to `(i + 1, j)`.
    AlongX = 0,
    /// Edge from `(i, j)` to `(i, j + 1)`.
    AlongY = 1,
}

impl Orientation {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::AlongX,
            _ => Self::AlongY,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Write-once table with one flag per (level, vertex, orientation).
///
/// Entries are never cleared during a trace, which is what keeps each
/// crossing from being traced twice for the same level.
#[derive(Debug, Clone)]
pub struct VisitationTable {
    x_steps: usize,
    y_steps: usize,
    levels: usize,
    marks: Vec<bool>,
}

impl VisitationTable {
    /// Allocate a clean table. Callers should check [`Self::entries_for`]
    /// against their memory budget first.
    pub fn new(x_steps: usize, y_steps: usize, levels: usize) -> Self {
        Self {
            x_steps,
            y_steps,
            levels,
            marks: vec![false; 2 * x_steps * y_steps * levels],
        }
    }

    /// Number of entries a table of this shape needs, or `None` on overflow.
    pub fn entries_for(x_steps: usize, y_steps: usize, levels: usize) -> Option<usize> {
        2usize
            .checked_mul(x_steps)?
            .checked_mul(y_steps)?
            .checked_mul(levels)
    }

    #[inline]
    fn slot(&self, level: usize, i: usize, j: usize, orientation: Orientation) -> usize {
        debug_assert!(level < self.levels && i < self.x_steps && j < self.y_steps);
        2 * (self.x_steps * (self.y_steps * level + j) + i) + orientation.index()
    }

    #[inline]
    pub fn is_marked(&self, level: usize, i: usize, j: usize, orientation: Orientation) -> bool {
        self.marks[self.slot(level, i, j, orientation)]
    }

    #[inline]
    pub fn mark(&mut self, level: usize, i: usize, j: usize, orientation: Orientation) {
        let slot = self.slot(level, i, j, orientation);
        self.marks[slot] = true;
    }

    /// Number of entries set so far.
    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
