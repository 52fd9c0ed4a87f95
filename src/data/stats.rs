use serde::Serialize;

/// Summary of one series for the legend and tooltips
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeriesStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    /// Most recent present reading
    pub latest: Option<f64>,
    /// Number of present readings
    pub count: usize,
}

/// Calculate min/max/avg/latest over the readings that are present
pub fn calculate_stats(values: &[Option<f64>]) -> SeriesStats {
    let mut stats = SeriesStats::default();
    let mut sum = 0.0;

    for v in values.iter().flatten().copied().filter(|v| !v.is_nan()) {
        stats.min = Some(stats.min.map_or(v, |m| m.min(v)));
        stats.max = Some(stats.max.map_or(v, |m| m.max(v)));
        stats.latest = Some(v);
        sum += v;
        stats.count += 1;
    }

    if stats.count > 0 {
        stats.avg = Some(sum / stats.count as f64);
    }
    stats
}
