//! Tracing many independent grids at once.

use grid_common::Grid;
use rayon::prelude::*;

use crate::config::TraceConfig;
use crate::error::Result;
use crate::output::ContourBundle;
use crate::tracer::trace;

/// Trace the same levels over each grid in parallel.
///
/// Each grid gets its own tracer and visitation table; results come back in
/// input order and one failing grid does not affect the others.
pub fn trace_batch(
    grids: &[Grid],
    levels: &[f64],
    config: &TraceConfig,
) -> Vec<Result<ContourBundle>> {
    tracing::debug!(num_grids = grids.len(), num_levels = levels.len(), "Tracing batch");
    grids
        .par_iter()
        .map(|grid| trace(grid, levels, config))
        .collect()
}
