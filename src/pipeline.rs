//! Filter → budget → LTTB orchestration for the history chart
//!
//! Every series is decimated on its own with the same threshold, so each one
//! keeps its locally representative samples. The chosen indices can differ
//! between series. One series is the axis of record: its decimated timestamps
//! label the x axis and the other series' values are plotted positionally
//! against it. Output `i` of every series comes from bucket `i`, so the drift
//! stays under one bucket width.

use crate::config::PipelineConfig;
use crate::constants::series::DEFAULT_AXIS_SERIES;
use crate::data::{HistoryWindow, SeriesMap, SeriesStats, calculate_stats, from_points, to_points};
use crate::error::Result;
use crate::filter::{Clock, filter_by_time_range};
use crate::lod::TargetPolicy;
use crate::perf::lttb_downsample;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Chart-ready output of one recompute; never modified after construction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimationResult {
    timestamps: Vec<i64>,
    series: SeriesMap,
    original_count: usize,
    decimated_count: usize,
    total_count: usize,
    was_decimated: bool,
    target: usize,
    hours: u32,
    axis_series: Option<String>,
}

impl DecimationResult {
    /// Timestamp axis (the axis-of-record series' picks when decimated)
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn series(&self) -> &SeriesMap {
        &self.series
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Samples inside the requested window before decimation
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// Samples handed to the chart
    pub fn decimated_count(&self) -> usize {
        self.decimated_count
    }

    /// Samples in the fetched history before the time filter
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn was_decimated(&self) -> bool {
        self.was_decimated
    }

    /// Point budget that applied to this window
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Series whose timestamps label the x axis, if any series exists
    pub fn axis_series(&self) -> Option<&str> {
        self.axis_series.as_deref()
    }

    /// Min/max/avg/latest per series over the decimated values
    pub fn stats(&self) -> BTreeMap<&str, SeriesStats> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), calculate_stats(values)))
            .collect()
    }
}

/// What the chart should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum HistoryView {
    /// No history fetched yet
    Loading,
    /// History exists but nothing falls inside the requested window
    NoData { hours: u32 },
    /// Data to plot
    Ready(Arc<DecimationResult>),
}

impl HistoryView {
    pub fn result(&self) -> Option<&Arc<DecimationResult>> {
        match self {
            HistoryView::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, HistoryView::Ready(_))
    }
}

/// Stateless recompute of a [`HistoryView`] from a window and requested hours
#[derive(Debug, Clone)]
pub struct DecimationPipeline {
    policy: TargetPolicy,
    axis_series: String,
}

impl DecimationPipeline {
    pub fn new(policy: TargetPolicy, axis_series: impl Into<String>) -> Self {
        Self {
            policy,
            axis_series: axis_series.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.policy(), config.axis_series.clone())
    }

    pub fn policy(&self) -> &TargetPolicy {
        &self.policy
    }

    /// Recompute using the clock for "now"
    pub fn run_with_clock(
        &self,
        window: &HistoryWindow,
        hours: u32,
        clock: &dyn Clock,
    ) -> Result<HistoryView> {
        self.run(window, hours, clock.now_secs())
    }

    /// Filter `window` to the last `hours` before `now` and fit it to the budget
    pub fn run(&self, window: &HistoryWindow, hours: u32, now: i64) -> Result<HistoryView> {
        profiling::scope!("DecimationPipeline::run");

        let Some(filtered) = filter_by_time_range(window, hours, now)? else {
            tracing::debug!(hours, total = window.len(), "no history inside requested window");
            return Ok(HistoryView::NoData { hours });
        };

        let target = self.policy.target_for(hours);
        let original_count = filtered.len();
        let axis_series = self.resolve_axis(&filtered).map(str::to_string);

        let result = if original_count <= target {
            DecimationResult {
                timestamps: filtered.timestamps().to_vec(),
                series: filtered.series().clone(),
                original_count,
                decimated_count: original_count,
                total_count: window.len(),
                was_decimated: false,
                target,
                hours,
                axis_series,
            }
        } else {
            let (timestamps, series) = crate::timed!(
                "decimate_series",
                decimate_all(&filtered, target, axis_series.as_deref())
            )?;
            DecimationResult {
                decimated_count: timestamps.len(),
                timestamps,
                series,
                original_count,
                total_count: window.len(),
                was_decimated: true,
                target,
                hours,
                axis_series,
            }
        };

        tracing::debug!(
            hours,
            budget = target,
            original = result.original_count,
            decimated = result.decimated_count,
            was_decimated = result.was_decimated,
            "history recomputed"
        );
        Ok(HistoryView::Ready(Arc::new(result)))
    }

    /// Configured axis series, else the first series by name
    fn resolve_axis<'a>(&'a self, window: &'a HistoryWindow) -> Option<&'a str> {
        if window.get(&self.axis_series).is_some() {
            return Some(self.axis_series.as_str());
        }
        window.series_names().next()
    }
}

impl Default for DecimationPipeline {
    fn default() -> Self {
        Self::new(TargetPolicy::default(), DEFAULT_AXIS_SERIES)
    }
}

/// Run LTTB on every series independently with the same threshold
fn decimate_all(
    window: &HistoryWindow,
    target: usize,
    axis: Option<&str>,
) -> Result<(Vec<i64>, SeriesMap)> {
    let Some(axis) = axis else {
        // No series: thin the bare timestamp axis
        let blank = vec![None; window.len()];
        let points = to_points("timestamps", window.timestamps(), &blank)?;
        let (timestamps, _) = from_points(&lttb_downsample(&points, target)?);
        return Ok((timestamps, SeriesMap::new()));
    };

    let mut timestamps = Vec::new();
    let mut series = SeriesMap::new();
    for (name, values) in window.series() {
        let points = to_points(name, window.timestamps(), values)?;
        let (picked_ts, picked_values) = from_points(&lttb_downsample(&points, target)?);
        if name == axis {
            timestamps = picked_ts;
        }
        series.insert(name.clone(), picked_values);
    }
    Ok((timestamps, series))
}
