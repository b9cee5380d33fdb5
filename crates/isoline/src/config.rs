//! Configuration for contour tracing.

use serde::{Deserialize, Serialize};

/// Fill value written into break records after a boundary-terminated segment.
pub const DEFAULT_FILL_VALUE: f64 = -1.0e31;

/// Default cap on visitation table entries (`2 * nx * ny * levels`).
pub const DEFAULT_MAX_VISITATION_ENTRIES: usize = 512 * 1024 * 1024;

/// Configuration for a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Value used for x, y and z of fill/break records.
    pub fill_value: f64,

    /// Upper bound on visitation table entries; larger traces are rejected
    /// before any allocation.
    pub max_visitation_entries: usize,

    /// Preferred table layout when exporting a bundle.
    pub layout: BundleLayout,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            fill_value: DEFAULT_FILL_VALUE,
            max_visitation_entries: DEFAULT_MAX_VISITATION_ENTRIES,
            layout: BundleLayout::StepColumn,
        }
    }
}

impl TraceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ISOLINE_FILL_VALUE") {
            if let Ok(fill) = val.parse() {
                config.fill_value = fill;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_MAX_VISITATION_ENTRIES") {
            if let Ok(limit) = val.parse() {
                config.max_visitation_entries = limit;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_LAYOUT") {
            config.layout = BundleLayout::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_visitation_entries == 0 {
            return Err("max_visitation_entries must be > 0".to_string());
        }

        // Break records are recognised by comparing against the fill value.
        if self.fill_value.is_nan() {
            return Err("fill_value must not be NaN".to_string());
        }

        Ok(())
    }
}

/// Table layout for exported contour bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleLayout {
    /// Flat `[x, y, z]` rows with a parallel step column.
    StepColumn,
    /// Rows grouped into blocks, each carrying its step as metadata.
    StepMetadata,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self::StepColumn
    }
}

impl BundleLayout {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "step_metadata" | "metadata" | "blocks" => Self::StepMetadata,
            _ => Self::StepColumn,
        }
    }

    /// Get the layout name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StepColumn => "step_column",
            Self::StepMetadata => "step_metadata",
        }
    }
}

impl std::fmt::Display for BundleLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
