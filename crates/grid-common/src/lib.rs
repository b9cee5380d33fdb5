//! Common grid types shared by the isoline workspace.

pub mod bbox;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use error::{GridError, GridResult};
pub use grid::Grid;
