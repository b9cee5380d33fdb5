//! Rectilinear scalar grids with coordinate tags and a validity mask.

use crate::error::{GridError, GridResult};
use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// A rank-2 table of z-values with x/y tags and optional weights.
///
/// Index `i` runs along x (`0..nx`) and `j` along y (`0..ny`). Values are
/// stored row-major with x varying fastest, the same ordering the gridded
/// products use elsewhere in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
    x_tags: Vec<f64>,
    y_tags: Vec<f64>,
    /// `None` means every vertex carries weight 1.
    weights: Option<Vec<f64>>,
}

impl Grid {
    /// Create a grid from flat row-major values (`values[j * nx + i]`).
    ///
    /// Tags default to the vertex indices.
    pub fn new(nx: usize, ny: usize, values: Vec<f64>) -> GridResult<Self> {
        match nx.checked_mul(ny) {
            Some(n) if n == values.len() => {}
            // usize::MAX stands in for a shape too large to represent
            other => {
                return Err(GridError::length_mismatch(
                    "values",
                    other.unwrap_or(usize::MAX),
                    values.len(),
                ))
            }
        }

        Ok(Self {
            nx,
            ny,
            values,
            x_tags: index_tags(nx),
            y_tags: index_tags(ny),
            weights: None,
        })
    }

    /// Create a grid from nested values addressed as `z[i][j]`.
    ///
    /// Every inner vector must have the same length; ragged input is rejected.
    pub fn from_nested(z: &[Vec<f64>]) -> GridResult<Self> {
        let nx = z.len();
        let ny = z.first().map_or(0, Vec::len);

        for (column, inner) in z.iter().enumerate() {
            if inner.len() != ny {
                return Err(GridError::InvalidGridShape {
                    column,
                    expected: ny,
                    found: inner.len(),
                });
            }
        }

        let mut values = vec![0.0; nx * ny];
        for (i, inner) in z.iter().enumerate() {
            for (j, &v) in inner.iter().enumerate() {
                values[j * nx + i] = v;
            }
        }

        Self::new(nx, ny, values)
    }

    /// Replace the x tags. Length must equal `nx`.
    pub fn with_x_tags(mut self, x_tags: Vec<f64>) -> GridResult<Self> {
        if x_tags.len() != self.nx {
            return Err(GridError::length_mismatch("x tags", self.nx, x_tags.len()));
        }
        self.x_tags = x_tags;
        Ok(self)
    }

    /// Replace the y tags. Length must equal `ny`.
    pub fn with_y_tags(mut self, y_tags: Vec<f64>) -> GridResult<Self> {
        if y_tags.len() != self.ny {
            return Err(GridError::length_mismatch("y tags", self.ny, y_tags.len()));
        }
        self.y_tags = y_tags;
        Ok(self)
    }

    /// Attach a weight grid in the same flat layout as the values.
    ///
    /// A zero weight marks the vertex as fill.
    pub fn with_weights(mut self, weights: Vec<f64>) -> GridResult<Self> {
        let expected = self.len();
        if weights.len() != expected {
            return Err(GridError::length_mismatch("weights", expected, weights.len()));
        }
        self.weights = Some(weights);
        Ok(self)
    }

    /// Number of vertices along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of vertices along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of grid vertices.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }

    /// A grid with fewer than two vertices along either axis has no cells.
    pub fn is_degenerate(&self) -> bool {
        self.nx < 2 || self.ny < 2
    }

    /// Get the 1D array index for a 2D grid position.
    #[inline]
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny, "({i}, {j}) outside grid");
        j * self.nx + i
    }

    /// Raw value at `(i, j)`.
    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[self.flat_index(i, j)]
    }

    /// Weight at `(i, j)`; 1.0 when no weights were attached.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        match &self.weights {
            Some(w) => w[self.flat_index(i, j)],
            None => 1.0,
        }
    }

    /// A vertex is usable when its weight is non-zero and its value finite.
    #[inline]
    pub fn is_valid(&self, i: usize, j: usize) -> bool {
        self.weight(i, j) != 0.0 && self.value(i, j).is_finite()
    }

    /// Number of usable vertices.
    pub fn valid_count(&self) -> usize {
        (0..self.ny)
            .flat_map(|j| (0..self.nx).map(move |i| (i, j)))
            .filter(|&(i, j)| self.is_valid(i, j))
            .count()
    }

    /// Range of the usable values, or `None` if nothing is usable.
    pub fn valid_range(&self) -> Option<(f64, f64)> {
        (0..self.ny)
            .flat_map(|j| (0..self.nx).map(move |i| (i, j)))
            .filter(|&(i, j)| self.is_valid(i, j))
            .map(|(i, j)| self.value(i, j))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn x_tags(&self) -> &[f64] {
        &self.x_tags
    }

    pub fn y_tags(&self) -> &[f64] {
        &self.y_tags
    }

    /// Extent of the coordinate tags.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_tags(&self.x_tags, &self.y_tags)
    }
}

/// Wire form of [`Grid`]. Deserialized grids go through the same checks as
/// the constructors.
#[derive(Deserialize)]
struct GridRepr {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
    x_tags: Vec<f64>,
    y_tags: Vec<f64>,
    #[serde(default)]
    weights: Option<Vec<f64>>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> GridResult<Self> {
        let grid = Grid::new(repr.nx, repr.ny, repr.values)?
            .with_x_tags(repr.x_tags)?
            .with_y_tags(repr.y_tags)?;
        match repr.weights {
            Some(weights) => grid.with_weights(weights),
            None => Ok(grid),
        }
    }
}

fn index_tags(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}
