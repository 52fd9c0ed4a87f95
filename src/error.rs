//! Error types for the decimation pipeline
//!
//! An empty time window is not an error: it is reported as
//! [`HistoryView::NoData`](crate::pipeline::HistoryView::NoData). Everything here
//! is either a broken caller contract or a failure at the I/O boundary.

use thiserror::Error;

/// Main error type for history decimation
#[derive(Error, Debug)]
pub enum DecimateError {
    /// LTTB called with a threshold that cannot hold both endpoints and a bucket
    #[error("Invalid LTTB threshold {threshold} for {len} points (must be 0 or >= 3)")]
    InvalidThreshold { threshold: usize, len: usize },

    /// A series does not line up with the timestamp axis
    #[error("Series '{series}' has {actual} samples but the timestamp axis has {expected}")]
    MisalignedSeries {
        series: String,
        expected: usize,
        actual: usize,
    },

    /// Requested window must cover at least one hour
    #[error("Requested time window must be a positive number of hours, got {0}")]
    InvalidHours(u32),

    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for decimation operations
pub type Result<T> = std::result::Result<T, DecimateError>;

/// UI-friendly error message formatting
impl DecimateError {
    /// Get a user-friendly error message suitable for a status line
    pub fn user_message(&self) -> String {
        match self {
            DecimateError::InvalidThreshold { threshold, len } => {
                format!("Cannot reduce {} points to {}", len, threshold)
            }
            DecimateError::MisalignedSeries {
                series,
                expected,
                actual,
            } => format!(
                "Series '{}' has {} values for {} timestamps",
                series, actual, expected
            ),
            DecimateError::InvalidHours(hours) => format!("Invalid time range: {}h", hours),
            DecimateError::FileIo(e) => format!("File error: {}", e),
            DecimateError::Json(e) => format!("JSON error: {}", e),
            DecimateError::Config(msg) => format!("Config error: {}", msg),
            DecimateError::Custom(msg) => msg.clone(),
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            DecimateError::InvalidThreshold { .. } => "Invalid Threshold",
            DecimateError::MisalignedSeries { .. } => "Misaligned Series",
            DecimateError::InvalidHours(_) => "Invalid Time Range",
            DecimateError::FileIo(_) => "File Error",
            DecimateError::Json(_) => "JSON Error",
            DecimateError::Config(_) => "Configuration Error",
            DecimateError::Custom(_) => "Error",
        }
    }
}
