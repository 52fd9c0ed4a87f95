//! Conversion between parallel (timestamp, value) arrays and point sequences

use crate::error::{DecimateError, Result};
use serde::{Deserialize, Serialize};

/// A single sample: Unix seconds and an optional reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: Option<f64>,
}

impl Point {
    pub fn new(x: i64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Reading as a plain float, NaN when missing
    #[inline]
    pub fn y_or_nan(&self) -> f64 {
        self.y.unwrap_or(f64::NAN)
    }
}

/// Zip a timestamp axis and one series into points
///
/// `name` only labels the error when the lengths disagree.
pub fn to_points(name: &str, timestamps: &[i64], values: &[Option<f64>]) -> Result<Vec<Point>> {
    if timestamps.len() != values.len() {
        return Err(DecimateError::MisalignedSeries {
            series: name.to_string(),
            expected: timestamps.len(),
            actual: values.len(),
        });
    }

    Ok(timestamps
        .iter()
        .zip(values)
        .map(|(&x, &y)| Point { x, y })
        .collect())
}

/// Split points back into a timestamp axis and a value series
pub fn from_points(points: &[Point]) -> (Vec<i64>, Vec<Option<f64>>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}
