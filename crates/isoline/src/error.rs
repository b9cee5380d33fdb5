//! Error types for contour tracing.

use grid_common::GridError;
use thiserror::Error;

/// Errors that abort a whole trace.
///
/// Empty level sets and degenerate grids are not errors; they produce an
/// empty bundle.
#[derive(Error, Debug)]
pub enum ContourError {
    /// The input grid could not be assembled.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The visitation table would exceed the configured limit.
    #[error("visitation table needs {requested} entries, limit is {limit}")]
    VisitationTooLarge { requested: String, limit: usize },

    /// The caller raised the cancellation flag mid-trace.
    #[error("contour trace cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

impl ContourError {
    /// Create a VisitationTooLarge error. `requested` is `None` when the
    /// size computation overflowed.
    pub fn visitation_too_large(requested: Option<usize>, limit: usize) -> Self {
        Self::VisitationTooLarge {
            requested: requested.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string()),
            limit,
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
