//! Point budget selection for a requested time window

use crate::constants::budget::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time ranges offered by the history chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last hour (full resolution)
    OneHour,
    /// Last four hours
    FourHours,
    /// Last twelve hours
    TwelveHours,
    /// Last 24 hours
    Day,
}

impl TimeRange {
    pub fn hours(&self) -> u32 {
        match self {
            TimeRange::OneHour => 1,
            TimeRange::FourHours => 4,
            TimeRange::TwelveHours => 12,
            TimeRange::Day => 24,
        }
    }

    /// Default point budget for this range
    pub fn target_points(&self) -> usize {
        match self {
            TimeRange::OneHour => ONE_HOUR_TARGET,
            TimeRange::FourHours | TimeRange::TwelveHours => MEDIUM_TARGET,
            TimeRange::Day => DAY_TARGET,
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::FourHours => "4h",
            TimeRange::TwelveHours => "12h",
            TimeRange::Day => "24h",
        }
    }

    /// Match an hour count to a menu entry
    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::all().into_iter().find(|r| r.hours() == hours)
    }

    pub fn all() -> [TimeRange; 4] {
        [
            TimeRange::OneHour,
            TimeRange::FourHours,
            TimeRange::TwelveHours,
            TimeRange::Day,
        ]
    }
}

/// Maps a requested window to a bounded point budget
///
/// The budget depends only on the window length, never on how many samples
/// exist, and always lies in `[MIN_TARGET_POINTS, MAX_TARGET_POINTS]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPolicy {
    overrides: BTreeMap<u32, usize>,
    default_target: usize,
}

impl TargetPolicy {
    /// Policy with custom per-hour budgets; every value is clamped into range
    pub fn new(overrides: BTreeMap<u32, usize>, default_target: usize) -> Self {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(hours, target)| (hours, clamp_target(target)))
                .collect(),
            default_target: clamp_target(default_target),
        }
    }

    /// Point budget for a window of `hours`
    pub fn target_for(&self, hours: u32) -> usize {
        if let Some(&target) = self.overrides.get(&hours) {
            return target;
        }
        TimeRange::from_hours(hours)
            .map(|r| r.target_points())
            .unwrap_or(self.default_target)
    }

    pub fn default_target(&self) -> usize {
        self.default_target
    }
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::new(BTreeMap::new(), DEFAULT_TARGET)
    }
}

fn clamp_target(target: usize) -> usize {
    target.clamp(MIN_TARGET_POINTS, MAX_TARGET_POINTS)
}
