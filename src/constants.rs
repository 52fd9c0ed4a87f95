//! Crate-wide constants and default values
//!
//! This module centralizes the magic numbers used by the decimation pipeline,
//! making them easier to maintain and configure.

/// Point budget defaults for the chart renderer
pub mod budget {
    /// Budget for a one hour window (full resolution at one sample per 30s)
    pub const ONE_HOUR_TARGET: usize = 120;

    /// Budget for the four and twelve hour windows
    pub const MEDIUM_TARGET: usize = 275;

    /// Budget for a full day
    pub const DAY_TARGET: usize = 350;

    /// Budget used for any window without a dedicated tier
    pub const DEFAULT_TARGET: usize = 300;

    /// Lower bound every configured budget is clamped to
    pub const MIN_TARGET_POINTS: usize = 100;

    /// Upper bound every configured budget is clamped to
    pub const MAX_TARGET_POINTS: usize = 400;
}

/// LTTB algorithm constants
pub mod lttb {
    /// Smallest threshold that still leaves room for one interior bucket
    pub const MIN_THRESHOLD: usize = 3;
}

/// Time axis constants
pub mod time {
    /// Seconds per hour
    pub const SECONDS_PER_HOUR: i64 = 3600;

    /// Default requested window in hours
    pub const DEFAULT_HOURS: u32 = 24;

    /// Windows up to this many hours label the axis with time of day only
    pub const SHORT_RANGE_HOURS: u32 = 4;
}

/// Series naming
pub mod series {
    pub const TEMPERATURE: &str = "temperature";
    pub const HUMIDITY: &str = "humidity";
    pub const PRESSURE: &str = "pressure";
    pub const VALVE_POSITION: &str = "valve_position";

    /// Series whose decimated timestamps label the x axis
    pub const DEFAULT_AXIS_SERIES: &str = TEMPERATURE;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "history-decimator.json";
}
