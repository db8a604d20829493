//! Benchmarks to measure the overhead of the clock bookkeeping itself.
//!
//! The measured operations are empty, so the results reflect only the cost of
//! reading the time source and updating the sample windows.

#![expect(missing_docs, reason = "benchmarks do not require API documentation")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use duration_interval_clock::DurationIntervalClock;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration_interval_clock_overhead");

    for sample_target_count in [1_usize, 10, 1000] {
        let mut clock =
            DurationIntervalClock::with_sample_target_count(sample_target_count).unwrap();

        group.bench_with_input(
            BenchmarkId::new("start_end", sample_target_count),
            &(),
            |b, ()| {
                b.iter(|| {
                    clock.start().unwrap();
                    black_box(clock.end().unwrap());
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("measure_sync", sample_target_count),
            &(),
            |b, ()| {
                b.iter(|| black_box(clock.measure_sync(|| black_box(42)).unwrap()));
            },
        );

        // The window is full after the runs above, so this averages a full window.
        group.bench_with_input(
            BenchmarkId::new("average_duration", sample_target_count),
            &(),
            |b, ()| {
                b.iter(|| black_box(clock.average_duration()));
            },
        );
    }

    group.finish();
}
