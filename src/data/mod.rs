pub mod point;
pub mod source;
pub mod stats;

// Re-export key types for convenience
pub use point::{Point, from_points, to_points};
pub use source::{HistoryPayload, HistoryWindow, SeriesMap};
pub use stats::{SeriesStats, calculate_stats};
