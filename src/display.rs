//! Text shown around the history chart: the point-count badge and axis labels

use crate::constants::time::SHORT_RANGE_HOURS;
use crate::pipeline::DecimationResult;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// Tooltip explaining the LTTB marker
pub const LTTB_TOOLTIP: &str = "Data downsampled using LTTB algorithm for optimal performance while preserving visual fidelity";

/// Transparency indicator: how many points are drawn out of how many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsBadge {
    pub showing: usize,
    pub total: usize,
    pub downsampled: bool,
}

impl From<&DecimationResult> for PointsBadge {
    fn from(result: &DecimationResult) -> Self {
        Self {
            showing: result.decimated_count(),
            total: result.original_count(),
            downsampled: result.was_decimated(),
        }
    }
}

impl fmt::Display for PointsBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} of {} points",
            format_count(self.showing),
            format_count(self.total)
        )?;
        if self.downsampled {
            write!(f, " [LTTB]")?;
        }
        Ok(())
    }
}

/// Group digits by thousands: 12345 -> "12,345"
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Axis label for a Unix timestamp in UTC
pub fn format_timestamp(timestamp: i64, hours: u32) -> String {
    format_timestamp_in(timestamp, hours, &Utc)
}

/// Axis label in the given time zone
///
/// Short windows show the time of day only; longer ones prefix the date.
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: i64, hours: u32, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };
    let local = utc.with_timezone(tz);
    if hours <= SHORT_RANGE_HOURS {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d, %H:%M").to_string()
    }
}
