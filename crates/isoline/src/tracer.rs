//! Contour tracing driver.
//!
//! This is the main entry point: it runs the spiral search for every level,
//! follows each crossing it finds and hands the buffered result to the
//! caller only once the whole trace has succeeded.

use grid_common::Grid;

use crate::access::GridAccess;
use crate::cancel::CancelFlag;
use crate::config::TraceConfig;
use crate::crossing::continue_contour;
use crate::cursor::TraceCursor;
use crate::emit::{Emitter, PenAction};
use crate::error::{ContourError, Result};
use crate::output::{ContourBundle, ContourSink};
use crate::spiral::{self, Transition};
use crate::visitation::VisitationTable;

/// How a followed contour segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnd {
    /// Ran into the grid edge or invalid data.
    Boundary,
    /// Returned to an edge it had already crossed.
    Closed,
}

/// One full trace over a grid and a level set.
///
/// The tracer is single-use and not shared between threads; independent
/// grids can be traced in parallel with [`crate::batch::trace_batch`].
pub struct ContourTracer<'a> {
    access: GridAccess<'a>,
    levels: &'a [f64],
    config: &'a TraceConfig,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> ContourTracer<'a> {
    pub fn new(grid: &'a Grid, levels: &'a [f64], config: &'a TraceConfig) -> Self {
        Self {
            access: GridAccess::new(grid),
            levels,
            config,
            cancel: None,
        }
    }

    /// Check `cancel` once per emitted point.
    pub fn with_cancel(mut self, cancel: &'a CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Trace every level and return the ordered output.
    pub fn run(self) -> Result<ContourBundle> {
        self.config.validate().map_err(ContourError::invalid_config)?;

        let nx = self.access.x_steps();
        let ny = self.access.y_steps();
        let mut bundle = ContourBundle::new(self.config.fill_value);

        if self.levels.is_empty() || self.access.grid().is_degenerate() {
            tracing::debug!(
                nx,
                ny,
                num_levels = self.levels.len(),
                "Nothing to trace"
            );
            return Ok(bundle);
        }

        let entries = VisitationTable::entries_for(nx, ny, self.levels.len());
        match entries {
            Some(n) if n <= self.config.max_visitation_entries => {}
            _ => {
                tracing::warn!(
                    nx,
                    ny,
                    num_levels = self.levels.len(),
                    limit = self.config.max_visitation_entries,
                    "Visitation table over budget"
                );
                return Err(ContourError::visitation_too_large(
                    entries,
                    self.config.max_visitation_entries,
                ));
            }
        }

        tracing::debug!(
            nx,
            ny,
            valid_count = self.access.grid().valid_count(),
            num_levels = self.levels.len(),
            first_level = self.levels.first().copied().unwrap_or(0.0),
            last_level = self.levels.last().copied().unwrap_or(0.0),
            "trace input"
        );

        let mut visits = VisitationTable::new(nx, ny, self.levels.len());
        let mut emitter = Emitter::new(self.config.fill_value, self.cancel);

        for (level, &value) in self.levels.iter().enumerate() {
            self.trace_level(level, value, &mut visits, &mut emitter)
                .map_err(|e| {
                    tracing::warn!(level, error = %e, "Trace aborted");
                    e
                })?;
        }

        tracing::debug!(
            num_points = emitter.len(),
            segments = emitter.segments(),
            last_step = emitter.step(),
            marked_edges = visits.marked_count(),
            "Traced contours"
        );

        for point in emitter.into_points() {
            bundle.accept(point);
        }
        Ok(bundle)
    }

    fn trace_level(
        &self,
        level: usize,
        value: f64,
        visits: &mut VisitationTable,
        emitter: &mut Emitter<'_>,
    ) -> Result<()> {
        let access = &self.access;
        let mut cursor = TraceCursor::new(access.x_steps(), access.y_steps(), level, value);
        emitter.draw(cursor.pen, [1.0, 1.0], value, access)?;

        let mut state = spiral::restart(&mut cursor, access);
        loop {
            state = match state {
                Transition::Scan => spiral::scan(&cursor, access),
                Transition::Test => spiral::test_seed(&mut cursor, access, visits),
                Transition::NextOrientation => spiral::next_orientation(&mut cursor),
                Transition::Advance => spiral::advance(&mut cursor, access),
                Transition::Follow => {
                    let start_step = emitter.step() + 1;
                    let start_len = emitter.len();
                    let end = self.follow(&mut cursor, visits, emitter)?;
                    tracing::trace!(
                        level = value,
                        step = start_step,
                        outcome = ?end,
                        points = emitter.len() - start_len,
                        "Segment finished"
                    );
                    spiral::restart(&mut cursor, access)
                }
                Transition::Exhausted => return Ok(()),
            };
        }
    }

    /// Follow a contour from its seed edge until it closes or leaves the data.
    fn follow(
        &self,
        cursor: &mut TraceCursor,
        visits: &mut VisitationTable,
        emitter: &mut Emitter<'_>,
    ) -> Result<SegmentEnd> {
        let access = &self.access;
        loop {
            let (i, j, orientation) = cursor.edge_key();
            visits.mark(cursor.level, i, j, orientation);
            emitter.draw(cursor.pen, cursor.crossing_xy(), cursor.value, access)?;

            if cursor.pen.finishes() {
                cursor.resume = cursor.cell;
                return Ok(match cursor.pen {
                    PenAction::FinishAtBoundary => SegmentEnd::Boundary,
                    _ => SegmentEnd::Closed,
                });
            }

            continue_contour(cursor, access);

            let (i, j, orientation) = cursor.edge_key();
            if visits.is_marked(cursor.level, i, j, orientation) {
                cursor.pen = PenAction::FinishClosed;
            } else {
                spiral::detect_boundary(cursor, access);
                if cursor.boundary != 0 {
                    cursor.pen = PenAction::FinishAtBoundary;
                }
            }
            cursor.enter_through_exit();
        }
    }
}

/// Trace `levels` over `grid` and return the buffered output.
pub fn trace(grid: &Grid, levels: &[f64], config: &TraceConfig) -> Result<ContourBundle> {
    ContourTracer::new(grid, levels, config).run()
}

/// Like [`trace`], but stops with [`ContourError::Cancelled`] once `cancel`
/// is raised.
pub fn trace_with_cancel(
    grid: &Grid,
    levels: &[f64],
    config: &TraceConfig,
    cancel: &CancelFlag,
) -> Result<ContourBundle> {
    ContourTracer::new(grid, levels, config)
        .with_cancel(cancel)
        .run()
}

/// Trace and feed the points to `sink` in order.
///
/// Nothing reaches the sink unless the whole trace succeeds.
pub fn trace_into<S: ContourSink + ?Sized>(
    grid: &Grid,
    levels: &[f64],
    config: &TraceConfig,
    sink: &mut S,
) -> Result<()> {
    let bundle = trace(grid, levels, config)?;
    for point in bundle.into_points() {
        sink.accept(point);
    }
    sink.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_one_closed_ring() {
        let grid = Grid::from_nested(&[
            vec![0.0, 0.0, 0.0],
            vec![0.0, 10.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        let bundle = trace(&grid, &[5.0], &TraceConfig::default()).unwrap();

        let points = bundle.points();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.step == 1 && p.z == 5.0));
        assert_eq!(points[0], points[4]);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        let grid = Grid::new(1, 4, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let bundle = trace(&grid, &[1.5], &TraceConfig::default()).unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_empty_levels_is_empty() {
        let grid = Grid::new(3, 3, vec![1.0; 9]).unwrap();
        let bundle = trace(&grid, &[], &TraceConfig::default()).unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_visitation_budget_enforced() {
        let grid = Grid::new(10, 10, vec![0.0; 100]).unwrap();
        let config = TraceConfig {
            max_visitation_entries: 100,
            ..TraceConfig::default()
        };
        let err = trace(&grid, &[1.0], &config).unwrap_err();
        assert!(matches!(err, ContourError::VisitationTooLarge { .. }));
    }

    #[test]
    fn test_cancel_between_levels_discards_partial_output() {
        let z: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64; 5]).collect();
        let grid = Grid::from_nested(&z).unwrap();
        let levels = [1.5, 2.5];
        let config = TraceConfig::default();
        let cancel = CancelFlag::new();
        let tracer = ContourTracer::new(&grid, &levels, &config).with_cancel(&cancel);

        let mut visits = VisitationTable::new(5, 5, levels.len());
        let mut emitter = Emitter::new(config.fill_value, tracer.cancel);

        tracer.trace_level(0, levels[0], &mut visits, &mut emitter).unwrap();
        let emitted = emitter.len();
        assert_eq!(emitted, 6);

        cancel.cancel();
        let err = tracer
            .trace_level(1, levels[1], &mut visits, &mut emitter)
            .unwrap_err();
        assert!(matches!(err, ContourError::Cancelled));
        assert_eq!(emitter.len(), emitted);

        // A run never hands back the points buffered before cancellation
        let result = ContourTracer::new(&grid, &levels, &config)
            .with_cancel(&cancel)
            .run();
        assert!(matches!(result, Err(ContourError::Cancelled)));
    }

    #[test]
    fn test_cancel_mid_segment() {
        let grid = Grid::new(2, 2, vec![0.0; 4]).unwrap();
        let access = GridAccess::new(&grid);
        let cancel = CancelFlag::new();
        let mut emitter = Emitter::new(-1.0e31, Some(&cancel));

        emitter.draw(PenAction::StartAtBoundary, [1.5, 1.0], 0.5, &access).unwrap();
        emitter.draw(PenAction::Continue, [1.5, 2.0], 0.5, &access).unwrap();
        cancel.cancel();
        let err = emitter
            .draw(PenAction::FinishAtBoundary, [1.5, 2.0], 0.5, &access)
            .unwrap_err();

        assert!(matches!(err, ContourError::Cancelled));
        assert_eq!(emitter.len(), 2);
        assert_eq!(emitter.step(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let grid = Grid::new(2, 2, vec![0.0; 4]).unwrap();
        let config = TraceConfig {
            fill_value: f64::NAN,
            ..TraceConfig::default()
        };
        assert!(matches!(
            trace(&grid, &[1.0], &config),
            Err(ContourError::InvalidConfig(_))
        ));
    }
}
