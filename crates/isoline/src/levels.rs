//! Contour level selection.

use grid_common::Grid;

/// Most levels a single call will generate.
pub const MAX_GENERATED_LEVELS: usize = 100_000;

/// Generate contour levels at regular intervals.
///
/// Levels are the multiples of `interval` that fall within
/// `[min_value, max_value]`.
///
/// # Arguments
/// * `min_value` - Lowest data value
/// * `max_value` - Highest data value
/// * `interval` - Spacing between levels
///
/// # Returns
/// Ascending level values; empty when the interval is not positive, the
/// range is empty or not finite, or more than [`MAX_GENERATED_LEVELS`]
/// levels would be produced.
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !interval.is_finite() || interval <= 0.0 || max_value <= min_value {
        return vec![];
    }
    if !min_value.is_finite() || !max_value.is_finite() {
        return vec![];
    }

    // Count steps instead of accumulating so long ranges do not drift
    let first = (min_value / interval).ceil() as i64;
    let last = (max_value / interval).floor() as i64;
    if last < first {
        return vec![];
    }

    let count = last
        .checked_sub(first)
        .and_then(|span| usize::try_from(span).ok())
        .and_then(|span| span.checked_add(1));
    match count {
        Some(n) if n <= MAX_GENERATED_LEVELS => {}
        _ => {
            tracing::warn!(
                min_value,
                max_value,
                interval,
                limit = MAX_GENERATED_LEVELS,
                "Too many contour levels requested"
            );
            return vec![];
        }
    }

    (first..=last).map(|k| k as f64 * interval).collect()
}

/// Levels spanning the valid data of `grid`.
pub fn levels_for_grid(grid: &Grid, interval: f64) -> Vec<f64> {
    match grid.valid_range() {
        Some((min, max)) => generate_contour_levels(min, max, interval),
        None => vec![],
    }
}
