//! Read-only view of a grid used by the tracer.
//!
//! The tracer addresses vertices with 1-based signed indices (the spiral
//! search flips signs to walk backwards), so this wrapper offers both the
//! plain 0-based accessors and the 1-based ones the cursor needs.

use grid_common::Grid;

/// Borrowed grid plus the coordinate mapping for fractional indices.
#[derive(Debug, Clone, Copy)]
pub struct GridAccess<'a> {
    grid: &'a Grid,
}

impl<'a> GridAccess<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn x_steps(&self) -> usize {
        self.grid.nx()
    }

    pub fn y_steps(&self) -> usize {
        self.grid.ny()
    }

    /// Raw value at 0-based `(i, j)`.
    #[inline]
    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.grid.value(i, j)
    }

    /// Weight at 0-based `(i, j)`; zero marks fill.
    #[inline]
    pub fn weight_at(&self, i: usize, j: usize) -> f64 {
        self.grid.weight(i, j)
    }

    /// Value at 1-based `(i, j)`.
    #[inline]
    pub(crate) fn z(&self, i: isize, j: isize) -> f64 {
        let (i0, j0) = self.zero_based(i, j);
        self.grid.value(i0, j0)
    }

    /// Validity of the vertex at 1-based `(i, j)`.
    #[inline]
    pub(crate) fn valid(&self, i: isize, j: isize) -> bool {
        let (i0, j0) = self.zero_based(i, j);
        self.grid.is_valid(i0, j0)
    }

    #[inline]
    fn zero_based(&self, i: isize, j: isize) -> (usize, usize) {
        debug_assert!(
            i >= 1 && j >= 1 && i as usize <= self.grid.nx() && j as usize <= self.grid.ny(),
            "vertex ({i}, {j}) outside 1-based grid {}x{}",
            self.grid.nx(),
            self.grid.ny()
        );
        (i as usize - 1, j as usize - 1)
    }

    /// Physical x for a 1-based fractional index.
    pub fn x_at(&self, index: f64) -> f64 {
        tag_at(self.grid.x_tags(), index)
    }

    /// Physical y for a 1-based fractional index.
    pub fn y_at(&self, index: f64) -> f64 {
        tag_at(self.grid.y_tags(), index)
    }
}

/// Linear interpolation into a tag array at a 1-based fractional index.
///
/// The integer part is clamped to `len - 2` so the last tag is reached with a
/// fraction of 1. An exact integer index returns the tag itself.
pub fn tag_at(tags: &[f64], index: f64) -> f64 {
    debug_assert!(tags.len() >= 2, "tag interpolation needs at least two tags");
    let f = index - 1.0;
    let mut i0 = f.floor() as usize;
    if i0 >= tags.len() - 1 {
        i0 = tags.len() - 2;
    }
    let alpha = f - i0 as f64;
    if alpha == 0.0 {
        return tags[i0];
    }
    tags[i0] * (1.0 - alpha) + tags[i0 + 1] * alpha
}
