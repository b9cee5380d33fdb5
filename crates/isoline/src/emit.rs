//! Conversion of tracer positions into output records.

use crate::access::GridAccess;
use crate::cancel::CancelFlag;
use crate::error::{ContourError, Result};
use crate::output::ContourPoint;

/// What the pen does with the point currently under the cursor.
///
/// The discriminants are the historical GCONTR `iflag` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenAction {
    /// Continue the current contour.
    Continue = 1,
    /// Start a contour on the data boundary.
    StartAtBoundary = 2,
    /// Start a contour away from the boundary.
    StartInterior = 3,
    /// Finish a contour at the data boundary.
    FinishAtBoundary = 4,
    /// Finish a closed contour.
    FinishClosed = 5,
    /// Move the pen without drawing.
    MovePen = 6,
}

impl PenAction {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Finishing actions end the current segment.
    pub fn finishes(self) -> bool {
        matches!(self, Self::FinishAtBoundary | Self::FinishClosed)
    }

    fn starts(self) -> bool {
        matches!(self, Self::StartAtBoundary | Self::StartInterior)
    }
}

/// Buffers emitted points and keeps the running step counter.
pub(crate) struct Emitter<'a> {
    step: i64,
    segments: usize,
    fill_value: f64,
    points: Vec<ContourPoint>,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(fill_value: f64, cancel: Option<&'a CancelFlag>) -> Self {
        Self {
            step: 0,
            segments: 0,
            fill_value,
            points: Vec::new(),
            cancel,
        }
    }

    /// Emit the point at 1-based fractional index `xy` for contour value `z`.
    pub(crate) fn draw(
        &mut self,
        pen: PenAction,
        xy: [f64; 2],
        z: f64,
        access: &GridAccess<'_>,
    ) -> Result<()> {
        if pen == PenAction::MovePen {
            return Ok(());
        }

        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(ContourError::Cancelled);
        }

        if pen.starts() {
            self.step += 1;
            self.segments += 1;
        }

        self.points.push(ContourPoint {
            x: access.x_at(xy[0]),
            y: access.y_at(xy[1]),
            z,
            step: self.step,
        });

        if pen == PenAction::FinishAtBoundary {
            self.step += 1;
            self.points.push(ContourPoint::fill(self.fill_value, self.step));
        }

        Ok(())
    }

    pub(crate) fn step(&self) -> i64 {
        self.step
    }

    /// Segments started so far.
    pub(crate) fn segments(&self) -> usize {
        self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn into_points(self) -> Vec<ContourPoint> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::Grid;

    fn access_fixture() -> Grid {
        Grid::new(3, 3, vec![0.0; 9])
            .unwrap()
            .with_x_tags(vec![0.0, 10.0, 20.0])
            .unwrap()
    }

    #[test]
    fn test_step_table() {
        let grid = access_fixture();
        let access = GridAccess::new(&grid);
        let mut emitter = Emitter::new(-1.0e31, None);

        emitter.draw(PenAction::MovePen, [1.0, 1.0], 5.0, &access).unwrap();
        assert_eq!(emitter.len(), 0);

        emitter.draw(PenAction::StartAtBoundary, [1.5, 1.0], 5.0, &access).unwrap();
        emitter.draw(PenAction::Continue, [2.0, 1.5], 5.0, &access).unwrap();
        emitter.draw(PenAction::FinishAtBoundary, [2.5, 3.0], 5.0, &access).unwrap();
        emitter.draw(PenAction::StartInterior, [1.5, 2.0], 5.0, &access).unwrap();
        emitter.draw(PenAction::FinishClosed, [1.5, 2.0], 5.0, &access).unwrap();

        assert_eq!(emitter.segments(), 2);
        let steps: Vec<i64> = emitter.into_points().iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![1, 1, 1, 2, 3, 3]);
    }

    #[test]
    fn test_coordinates_use_tags() {
        let grid = access_fixture();
        let access = GridAccess::new(&grid);
        let mut emitter = Emitter::new(-1.0e31, None);
        emitter.draw(PenAction::StartInterior, [1.5, 2.0], 7.0, &access).unwrap();

        let p = emitter.into_points()[0];
        assert!((p.x - 5.0).abs() < 1e-12);
        assert_eq!(p.y, 1.0);
        assert_eq!(p.z, 7.0);
    }

    #[test]
    fn test_cancelled_before_emission() {
        let grid = access_fixture();
        let access = GridAccess::new(&grid);
        let flag = CancelFlag::new();
        flag.cancel();
        let mut emitter = Emitter::new(-1.0e31, Some(&flag));

        let err = emitter
            .draw(PenAction::StartInterior, [1.5, 2.0], 7.0, &access)
            .unwrap_err();
        assert!(matches!(err, ContourError::Cancelled));
        assert_eq!(emitter.step(), 0);
    }
}
