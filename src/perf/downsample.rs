//! Largest-Triangle-Three-Buckets downsampling
//!
//! Reduces an ordered point sequence to a fixed number of points while keeping
//! its visual shape. The first and last points always survive; every interior
//! output point is the member of its bucket that spans the largest triangle
//! with the previously selected point and the centroid of the next bucket.
//!
//! Missing readings never win a bucket over a present one. Centroids average
//! only the readings that are present; a next bucket with no readings at all
//! contributes the anchor's value, so the choice falls back to the largest
//! vertical deviation from the anchor. An anchor with a missing reading takes
//! the most recent present reading before it, or the next bucket's centroid
//! when there is none.

use crate::constants::lttb::MIN_THRESHOLD;
use crate::data::Point;
use crate::error::{DecimateError, Result};

/// Downsample `data` to exactly `threshold` points
///
/// `threshold == 0` or `threshold >= data.len()` returns the input unchanged.
/// A threshold of 1 or 2 below the input length is a caller error.
pub fn lttb_downsample(data: &[Point], threshold: usize) -> Result<Vec<Point>> {
    profiling::scope!("lttb_downsample");

    let n = data.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if threshold == 0 || threshold >= n {
        return Ok(data.to_vec());
    }
    if threshold < MIN_THRESHOLD {
        return Err(DecimateError::InvalidThreshold { threshold, len: n });
    }

    let mut result = Vec::with_capacity(threshold);

    // Always include first point
    result.push(data[0]);

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let bucket_edge = |i: usize| (i as f64 * bucket_size).floor() as usize + 1;

    let mut a = 0usize;
    // Most recent present reading at or before `a`
    let mut last_y = present_y(&data[0]);
    for i in 0..(threshold - 2) {
        let bucket_start = bucket_edge(i);
        let bucket_end = bucket_edge(i + 1).min(n - 1);

        let next_start = bucket_edge(i + 1).min(n - 1);
        let next_end = bucket_edge(i + 2).min(n);

        let ax = data[a].x as f64;
        let (cx, cy) = centroid(&data[next_start..next_end], last_y.unwrap_or(f64::NAN));
        let ay = last_y.unwrap_or(cy);

        // Find point with largest triangle area; NaN areas never compare greater
        let mut max_area = -1.0f64;
        let mut max_idx = bucket_start;
        for (j, p) in data.iter().enumerate().take(bucket_end).skip(bucket_start) {
            let (bx, by) = (p.x as f64, p.y_or_nan());
            let area = 0.5 * ((ax - cx) * (by - ay) - (ax - bx) * (cy - ay)).abs();
            if area > max_area {
                max_area = area;
                max_idx = j;
            }
        }

        result.push(data[max_idx]);
        last_y = data[a..=max_idx].iter().rev().find_map(present_y).or(last_y);
        a = max_idx;
    }

    // Always include last point
    result.push(data[n - 1]);
    Ok(result)
}

fn present_y(p: &Point) -> Option<f64> {
    p.y.filter(|y| !y.is_nan())
}

/// Mean position of a bucket; `fallback_y` stands in when no reading is present
fn centroid(bucket: &[Point], fallback_y: f64) -> (f64, f64) {
    if bucket.is_empty() {
        return (f64::NAN, fallback_y);
    }

    let sum_x: f64 = bucket.iter().map(|p| p.x as f64).sum();
    let (sum_y, present) = bucket
        .iter()
        .filter_map(present_y)
        .fold((0.0, 0usize), |(s, c), y| (s + y, c + 1));

    let avg_y = if present > 0 {
        sum_y / present as f64
    } else {
        fallback_y
    };
    (sum_x / bucket.len() as f64, avg_y)
}
