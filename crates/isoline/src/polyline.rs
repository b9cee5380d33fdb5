//! Polylines rebuilt from the step-delimited point stream.

use serde::{Deserialize, Serialize};

use crate::output::ContourBundle;

/// One contour segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Step number shared by every point of the segment.
    pub step: i64,
    pub level: f64,
    pub points: Vec<(f64, f64)>,
    /// First and last points coincide.
    pub closed: bool,
}

impl Polyline {
    /// Euclidean length in tag units.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Split a bundle into polylines at every step change, dropping break records.
pub fn group_polylines(bundle: &ContourBundle) -> Vec<Polyline> {
    let mut lines: Vec<Polyline> = Vec::new();

    for p in bundle.contour_points() {
        match lines.last_mut() {
            Some(line) if line.step == p.step => line.points.push((p.x, p.y)),
            _ => lines.push(Polyline {
                step: p.step,
                level: p.z,
                points: vec![(p.x, p.y)],
                closed: false,
            }),
        }
    }

    for line in &mut lines {
        line.closed = line.points.len() > 2 && line.points.first() == line.points.last();
    }
    lines
}
