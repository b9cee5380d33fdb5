//! Output records and the bundle handed to consumers.
//!
//! A bundle is an ordered stream of `(x, y, z, step)` records. Consecutive
//! records sharing a step belong to one polyline; a boundary-terminated
//! polyline is followed by a break record whose coordinates are the fill
//! value.

use serde::{Deserialize, Serialize};

use crate::config::{BundleLayout, TraceConfig};

/// One emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub step: i64,
}

impl ContourPoint {
    /// A break record.
    pub fn fill(fill_value: f64, step: i64) -> Self {
        Self {
            x: fill_value,
            y: fill_value,
            z: fill_value,
            step,
        }
    }

    pub fn is_fill(&self, fill_value: f64) -> bool {
        self.x == fill_value && self.y == fill_value && self.z == fill_value
    }
}

/// Receiver for emitted records, in emission order.
pub trait ContourSink {
    fn accept(&mut self, point: ContourPoint);

    /// Called once after the last record of a successful trace.
    fn finish(&mut self) {}
}

impl ContourSink for Vec<ContourPoint> {
    fn accept(&mut self, point: ContourPoint) {
        self.push(point);
    }
}

/// Ordered trace output plus the fill value used for break records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourBundle {
    fill_value: f64,
    points: Vec<ContourPoint>,
}

impl ContourSink for ContourBundle {
    fn accept(&mut self, point: ContourPoint) {
        self.points.push(point);
    }
}

impl ContourBundle {
    pub fn new(fill_value: f64) -> Self {
        Self {
            fill_value,
            points: Vec::new(),
        }
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// All records, break records included.
    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<ContourPoint> {
        self.points
    }

    /// Records that lie on a contour (break records skipped).
    pub fn contour_points(&self) -> impl Iterator<Item = &ContourPoint> + '_ {
        self.points.iter().filter(move |p| !p.is_fill(self.fill_value))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct polylines.
    pub fn segment_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for p in self.contour_points() {
            if last != Some(p.step) {
                count += 1;
                last = Some(p.step);
            }
        }
        count
    }

    /// True when the step column never decreases.
    pub fn steps_are_monotonic(&self) -> bool {
        self.points.windows(2).all(|w| w[0].step <= w[1].step)
    }

    /// Form A: flat rows with a parallel step column.
    pub fn to_step_column(&self) -> StepColumnTable {
        StepColumnTable {
            fill_value: self.fill_value,
            rows: self.points.iter().map(|p| [p.x, p.y, p.z]).collect(),
            steps: self.points.iter().map(|p| p.step).collect(),
        }
    }

    /// Form B: rows grouped by step, the step stored once per block.
    pub fn to_step_metadata(&self) -> StepMetadataTable {
        let mut blocks: Vec<StepBlock> = Vec::new();
        for p in &self.points {
            match blocks.last_mut() {
                Some(block) if block.step == p.step => block.rows.push([p.x, p.y, p.z]),
                _ => blocks.push(StepBlock {
                    step: p.step,
                    rows: vec![[p.x, p.y, p.z]],
                }),
            }
        }
        StepMetadataTable {
            fill_value: self.fill_value,
            blocks,
        }
    }

    pub fn to_table(&self, layout: BundleLayout) -> BundleTable {
        match layout {
            BundleLayout::StepColumn => BundleTable::StepColumn(self.to_step_column()),
            BundleLayout::StepMetadata => BundleTable::StepMetadata(self.to_step_metadata()),
        }
    }

    /// Table in the layout chosen by `config`.
    pub fn to_configured_table(&self, config: &TraceConfig) -> BundleTable {
        self.to_table(config.layout)
    }

    /// JSON in the layout chosen by `config`.
    pub fn to_configured_json(&self, config: &TraceConfig) -> serde_json::Result<String> {
        self.to_json(config.layout)
    }

    /// Serialize the bundle in the requested layout.
    pub fn to_json(&self, layout: BundleLayout) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_table(layout))
    }
}

/// Column names shared by both layouts.
pub const COLUMNS: [&str; 3] = ["x", "y", "z"];

/// Form A layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepColumnTable {
    pub fill_value: f64,
    pub rows: Vec<[f64; 3]>,
    pub steps: Vec<i64>,
}

/// Form B layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetadataTable {
    pub fill_value: f64,
    pub blocks: Vec<StepBlock>,
}

/// Rows sharing one step number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepBlock {
    pub step: i64,
    pub rows: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum BundleTable {
    StepColumn(StepColumnTable),
    StepMetadata(StepMetadataTable),
}
