//! Trailing time-window selection over a history snapshot

use crate::constants::time::SECONDS_PER_HOUR;
use crate::data::HistoryWindow;
use crate::error::{DecimateError, Result};

/// Source of "now" in Unix seconds
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Frozen clock for tests and replaying recorded payloads
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Oldest timestamp still inside a window of `hours` ending at `now`
pub fn cutoff(now: i64, hours: u32) -> i64 {
    now.saturating_sub(i64::from(hours) * SECONDS_PER_HOUR)
}

/// Keep the samples with `timestamp >= now - hours * 3600`
///
/// Only the lower bound is enforced; samples stamped after `now` are kept.
/// Returns `Ok(None)` when no sample falls inside the window.
pub fn filter_by_time_range(
    window: &HistoryWindow,
    hours: u32,
    now: i64,
) -> Result<Option<HistoryWindow>> {
    profiling::scope!("filter_by_time_range");

    if hours == 0 {
        return Err(DecimateError::InvalidHours(hours));
    }

    let cutoff = cutoff(now, hours);
    tracing::debug!(hours, now, cutoff, "filtering history by time range");
    if let Some((oldest, newest)) = window.time_span() {
        tracing::debug!(
            oldest,
            newest,
            oldest_age_hours = now.saturating_sub(oldest) as f64 / SECONDS_PER_HOUR as f64,
            "history data range"
        );
    }

    let indices: Vec<usize> = window
        .timestamps()
        .iter()
        .enumerate()
        .filter(|&(_, &ts)| ts >= cutoff)
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(kept = indices.len(), hours, "points within time range");

    if indices.is_empty() {
        return Ok(None);
    }
    if indices.len() == window.len() {
        return Ok(Some(window.clone()));
    }
    Ok(Some(window.select(&indices)))
}
