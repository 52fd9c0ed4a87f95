//! End-to-end: payload on disk → time filter → budget → LTTB → badge

use history_decimator::display::PointsBadge;
use history_decimator::{
    DecimateError, DecimationPipeline, FixedClock, HistoryView, HistoryWindow, PipelineConfig,
    SeriesMap,
};
use std::io::Write;
use tempfile::Builder;

fn payload_json(n: usize, now: i64, spacing: i64) -> String {
    let timestamps: Vec<i64> = (0..n as i64).map(|i| now - (n as i64 - 1 - i) * spacing).collect();
    let temps: Vec<f64> = (0..n).map(|i| 19.0 + (i as f64 / 40.0).sin() * 2.0).collect();
    let hums: Vec<f64> = (0..n).map(|i| 50.0 + (i as f64 / 15.0).cos() * 6.0).collect();
    let valves: Vec<u8> = (0..n).map(|i| (i % 101) as u8).collect();
    serde_json::json!({
        "timestamps": timestamps,
        "temperatures": temps,
        "humidities": hums,
        "pressures": null,
        "valvePositions": valves,
        "count": n,
        "maxSize": 2880
    })
    .to_string()
}

#[test]
fn test_day_of_history_from_file() {
    let now = 1_700_000_000;
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", payload_json(2880, now, 30)).unwrap();
    file.flush().unwrap();

    let window = HistoryWindow::load(file.path()).unwrap();
    let pipeline = DecimationPipeline::from_config(&PipelineConfig::default());
    let view = pipeline
        .run_with_clock(&window, 24, &FixedClock(now))
        .unwrap();

    let result = view.result().unwrap();
    assert_eq!(result.original_count(), 2880);
    assert_eq!(result.decimated_count(), 350);
    assert_eq!(
        PointsBadge::from(result.as_ref()).to_string(),
        "Showing 350 of 2,880 points [LTTB]"
    );

    // Every series shares the axis length and keeps the endpoints
    for (name, values) in result.series() {
        assert_eq!(values.len(), 350, "series {name}");
        assert_eq!(values[0], window.get(name).unwrap()[0]);
        assert_eq!(values[349], window.get(name).unwrap()[2879]);
    }
}

#[test]
fn test_each_menu_range_respects_its_budget() {
    let now = 1_700_000_000;
    let window = HistoryWindow::from_json_str(&payload_json(2880, now, 30)).unwrap();
    let pipeline = DecimationPipeline::default();

    for (hours, budget) in [(1, 120), (4, 275), (12, 275), (24, 350)] {
        let view = pipeline.run(&window, hours, now).unwrap();
        let result = view.result().unwrap();
        assert!(result.decimated_count() <= budget);
        assert_eq!(result.target(), budget);
        if result.original_count() <= budget {
            assert_eq!(result.decimated_count(), result.original_count());
        }
    }
}

#[test]
fn test_quiet_device_reports_no_data() {
    let window = HistoryWindow::from_json_str(&payload_json(100, 1_000_000, 30)).unwrap();
    let view = DecimationPipeline::default()
        .run(&window, 4, 2_000_000)
        .unwrap();
    assert_eq!(view, HistoryView::NoData { hours: 4 });
    assert_ne!(view, HistoryView::Loading);
}

#[test]
fn test_misaligned_window_fails_loudly() {
    let mut series = SeriesMap::new();
    series.insert("temperature".to_string(), vec![Some(1.0); 5]);
    let err = HistoryWindow::new(vec![1, 2, 3, 4], series).unwrap_err();
    assert!(matches!(err, DecimateError::MisalignedSeries { .. }));
}

#[test]
fn test_timed_macro_from_outside_the_crate() {
    let sum = history_decimator::timed!("sum", (1..=4).sum::<i32>());
    assert_eq!(sum, 10);
}
