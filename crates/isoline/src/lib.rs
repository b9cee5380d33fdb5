//! Contour line extraction for gridded scalar data.
//!
//! The tracer follows Snyder's GCONTR: an outward spiral search finds an
//! untraced level crossing, the contour is walked cell by cell until it
//! closes or runs into the data boundary, and the search resumes from where
//! the contour ended. Output is an ordered stream of `(x, y, z, step)`
//! records where a change in `step` starts a new polyline.
//!
//! ```text
//! trace(grid, levels)
//!      │
//!      ├─► per level: spiral search ──► crossing found?
//!      │                   ▲                 │
//!      │                   │                 ▼
//!      │                   └──── follow edge to edge (emit points)
//!      │                           until closed / boundary
//!      │
//!      └─► buffered ContourBundle ──► sink (only on success)
//! ```
//!
//! # Example
//!
//! ```
//! use grid_common::Grid;
//! use isoline::{trace, TraceConfig};
//!
//! let grid = Grid::from_nested(&[
//!     vec![0.0, 0.0, 0.0],
//!     vec![0.0, 10.0, 0.0],
//!     vec![0.0, 0.0, 0.0],
//! ])?;
//! let bundle = trace(&grid, &[5.0], &TraceConfig::default())?;
//! assert_eq!(bundle.segment_count(), 1);
//! # Ok::<(), isoline::ContourError>(())
//! ```

pub mod access;
pub mod batch;
pub mod cancel;
pub mod config;
mod crossing;
mod cursor;
pub mod emit;
pub mod error;
pub mod levels;
pub mod output;
pub mod polyline;
mod spiral;
pub mod tracer;
pub mod visitation;

pub use access::GridAccess;
pub use batch::trace_batch;
pub use cancel::CancelFlag;
pub use config::{BundleLayout, TraceConfig};
pub use emit::PenAction;
pub use error::{ContourError, Result};
pub use levels::{generate_contour_levels, levels_for_grid};
pub use output::{BundleTable, ContourBundle, ContourPoint, ContourSink};
pub use polyline::{group_polylines, Polyline};
pub use tracer::{trace, trace_into, trace_with_cancel, ContourTracer, SegmentEnd};
pub use visitation::{Orientation, VisitationTable};
