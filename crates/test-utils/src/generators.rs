//! Synthetic grids with known contour geometry.
//!
//! Values are addressed as `z[i][j]` with `i` along x and `j` along y, and
//! tags default to the indices, so expected crossings can be worked out by
//! hand.

use grid_common::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a ramp along x: `z[i][j] = i`.
///
/// Every level strictly between `0` and `nx - 1` is a single straight line
/// at constant x spanning the full y range.
///
/// # Example
///
/// ```
/// use test_utils::ramp_grid;
///
/// let grid = ramp_grid(5, 3);
/// assert_eq!(grid.value(4, 2), 4.0);
/// assert_eq!(grid.value(0, 2), 0.0);
/// ```
pub fn ramp_grid(nx: usize, ny: usize) -> Grid {
    from_fn(nx, ny, |i, _| i as f64)
}

/// Creates an `n x n` grid of zeros with `height` at the centre vertex.
///
/// `n` should be odd. Any level in `(0, height]` gives one closed ring
/// around the centre.
pub fn peak_grid(n: usize, height: f64) -> Grid {
    let c = n / 2;
    from_fn(n, n, |i, j| if i == c && j == c { height } else { 0.0 })
}

/// Creates a cone: distance from the grid centre, so levels are concentric
/// rings (closed when they fit inside the grid, open otherwise).
pub fn cone_grid(nx: usize, ny: usize) -> Grid {
    let cx = (nx as f64 - 1.0) / 2.0;
    let cy = (ny as f64 - 1.0) / 2.0;
    from_fn(nx, ny, |i, j| (i as f64 - cx).hypot(j as f64 - cy))
}

/// Creates a smooth wavy field similar to a pressure or height analysis.
pub fn wave_grid(nx: usize, ny: usize) -> Grid {
    from_fn(nx, ny, |i, j| {
        let x = i as f64 / nx.max(2) as f64 * std::f64::consts::TAU;
        let y = j as f64 / ny.max(2) as f64 * std::f64::consts::TAU;
        10.0 * x.sin() * y.cos() + 2.0 * (2.0 * x).cos()
    })
}

/// Creates a reproducible random field with values in `[0, 10)`.
///
/// Values are quantised to quarters so that exact ties with levels and
/// between neighbours occur.
pub fn random_grid(nx: usize, ny: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..nx * ny)
        .map(|_| (rng.gen_range(0..40) as f64) * 0.25)
        .collect();
    grid(nx, ny, values)
}

/// Creates a random 0/1 weight mask with roughly `missing` of the vertices
/// zeroed.
pub fn random_weights(nx: usize, ny: usize, missing: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..nx * ny)
        .map(|_| if rng.gen_bool(missing) { 0.0 } else { 1.0 })
        .collect()
}

/// Replaces the listed `(i, j)` vertices with NaN.
///
/// Positions outside the grid are ignored.
pub fn with_nans(source: &Grid, positions: &[(usize, usize)]) -> Grid {
    let mut values = source.values().to_vec();
    for &(i, j) in positions {
        if i < source.nx() && j < source.ny() {
            values[source.flat_index(i, j)] = f64::NAN;
        }
    }
    grid(source.nx(), source.ny(), values)
}

/// Builds a grid from `f(i, j)`.
pub fn from_fn(nx: usize, ny: usize, f: impl Fn(usize, usize) -> f64) -> Grid {
    let mut values = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            values.push(f(i, j));
        }
    }
    grid(nx, ny, values)
}

fn grid(nx: usize, ny: usize, values: Vec<f64>) -> Grid {
    match Grid::new(nx, ny, values) {
        Ok(grid) => grid,
        Err(e) => panic!("generator produced an inconsistent grid: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_grid_centre() {
        let grid = peak_grid(5, 7.0);
        assert_eq!(grid.value(2, 2), 7.0);
        assert_eq!(grid.valid_range(), Some((0.0, 7.0)));
    }

    #[test]
    fn test_random_grid_reproducible() {
        let a = random_grid(6, 4, 42);
        let b = random_grid(6, 4, 42);
        assert_eq!(a.values(), b.values());
        assert!(a.values().iter().all(|v| (0.0..10.0).contains(v)));
    }

    #[test]
    fn test_with_nans() {
        let grid = with_nans(&ramp_grid(3, 3), &[(1, 1), (9, 9)]);
        assert!(grid.value(1, 1).is_nan());
        assert_eq!(grid.valid_count(), 8);
    }
}
