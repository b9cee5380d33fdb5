//! Error types for grid construction.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while assembling a grid, before any tracing starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Nested input is ragged: not every column has the same number of values.
    #[error("grid is not a qube: column {column} has {found} values, expected {expected}")]
    InvalidGridShape {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// A parallel array (values, tags or weights) has the wrong length.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl GridError {
    /// Create a LengthMismatch error.
    pub fn length_mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            found,
        }
    }
}
