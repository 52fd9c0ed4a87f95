use crate::constants::series;
use crate::error::{DecimateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Named series sharing one timestamp axis
pub type SeriesMap = BTreeMap<String, Vec<Option<f64>>>;

/// History payload as served by the thermostat's history endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    pub timestamps: Vec<i64>,
    pub temperatures: Vec<Option<f64>>,
    pub humidities: Vec<Option<f64>>,
    /// Older firmware omits pressure entirely
    #[serde(default)]
    pub pressures: Option<Vec<Option<f64>>>,
    pub valve_positions: Vec<Option<f64>>,
    #[serde(default)]
    pub count: Option<usize>,
    /// Capacity of the device's ring buffer
    #[serde(default)]
    pub max_size: Option<usize>,
}

impl HistoryPayload {
    /// Validate the payload and convert it into a [`HistoryWindow`]
    pub fn into_window(self) -> Result<HistoryWindow> {
        let len = self.timestamps.len();
        let pressures = self.pressures.unwrap_or_else(|| vec![None; len]);

        let mut map = SeriesMap::new();
        map.insert(series::TEMPERATURE.to_string(), self.temperatures);
        map.insert(series::HUMIDITY.to_string(), self.humidities);
        map.insert(series::PRESSURE.to_string(), pressures);
        map.insert(series::VALVE_POSITION.to_string(), self.valve_positions);

        let mut window = HistoryWindow::new(self.timestamps, map)?;
        window.reported_count = self.count;
        window.capacity = self.max_size;
        Ok(window)
    }
}

/// One fetched snapshot of sensor history
///
/// Every series is index-aligned with `timestamps`. The constructor enforces
/// this, so code holding a `HistoryWindow` never re-checks lengths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryWindow {
    timestamps: Vec<i64>,
    series: SeriesMap,
    reported_count: Option<usize>,
    capacity: Option<usize>,
}

impl HistoryWindow {
    /// Build a window, rejecting any series whose length differs from the axis
    pub fn new(timestamps: Vec<i64>, series: SeriesMap) -> Result<Self> {
        for (name, values) in &series {
            if values.len() != timestamps.len() {
                return Err(DecimateError::MisalignedSeries {
                    series: name.clone(),
                    expected: timestamps.len(),
                    actual: values.len(),
                });
            }
        }

        Ok(Self {
            timestamps,
            series,
            reported_count: None,
            capacity: None,
        })
    }

    /// Parse an upstream JSON payload
    pub fn from_json_str(json: &str) -> Result<Self> {
        let payload: HistoryPayload = serde_json::from_str(json)?;
        payload.into_window()
    }

    /// Read an upstream JSON payload from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let window = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            samples = window.len(),
            series = window.series.len(),
            "loaded history window"
        );
        Ok(window)
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn series(&self) -> &SeriesMap {
        &self.series
    }

    /// Values of one series, if present
    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    /// Number of samples on the timestamp axis
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sample count the device claimed to send
    pub fn reported_count(&self) -> Option<usize> {
        self.reported_count
    }

    /// Device ring buffer size
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Oldest and newest timestamps
    pub fn time_span(&self) -> Option<(i64, i64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    /// Keep only the given sample indices, applied to the axis and every series alike
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        let timestamps = indices.iter().map(|&i| self.timestamps[i]).collect();
        let series = self
            .series
            .iter()
            .map(|(name, values)| (name.clone(), indices.iter().map(|&i| values[i]).collect()))
            .collect();

        Self {
            timestamps,
            series,
            reported_count: self.reported_count,
            capacity: self.capacity,
        }
    }
}
