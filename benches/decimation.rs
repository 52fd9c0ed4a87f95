//! Benchmarks for the decimation pipeline
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use history_decimator::{DecimationPipeline, HistoryPayload, Point, lttb_downsample};

fn synthetic_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Point::new(i as i64 * 30, Some(20.0 + (t / 50.0).sin() * 3.0 + (t / 7.0).cos() * 0.2))
        })
        .collect()
}

fn bench_lttb(c: &mut Criterion) {
    let mut group = c.benchmark_group("lttb_downsample");

    for size in [2_880, 10_000, 100_000].iter() {
        let data = synthetic_points(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("to_350", size), &data, |b, data| {
            b.iter(|| lttb_downsample(black_box(data), 350).unwrap());
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    // One day of 30s samples, the thermostat's ring buffer size
    let n = 2_880usize;
    let now = 1_700_000_000i64;
    let payload = HistoryPayload {
        timestamps: (0..n as i64).map(|i| now - (n as i64 - 1 - i) * 30).collect(),
        temperatures: (0..n).map(|i| Some(20.0 + (i as f64 / 60.0).sin())).collect(),
        humidities: (0..n).map(|i| Some(45.0 + (i as f64 / 90.0).cos() * 4.0)).collect(),
        pressures: None,
        valve_positions: (0..n).map(|i| Some((i % 100) as f64)).collect(),
        count: Some(n),
        max_size: Some(n),
    };
    let window = payload.into_window().unwrap();
    let pipeline = DecimationPipeline::default();

    let mut group = c.benchmark_group("pipeline");
    for hours in [1u32, 4, 12, 24].iter() {
        group.bench_with_input(BenchmarkId::new("run", hours), hours, |b, &hours| {
            b.iter(|| pipeline.run(black_box(&window), hours, now).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lttb, bench_pipeline);
criterion_main!(benches);
