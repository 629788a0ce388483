//! Benchmarks for the contour pipeline.
//!
//! Run with: cargo bench --package marching --bench pipeline_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marching::{MarchingConfig, WorkerCoordinator};
use test_utils::{disc_image, noise_image, synthetic_tile_set};

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_pipeline_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_copy");
    let config = MarchingConfig::default();
    let tiles = synthetic_tile_set(config.step);
    let source = disc_image(1024, 1024, 300.0);

    group.throughput(Throughput::Elements((source.width() * source.height()) as u64));

    for workers in [1, 2, 4, 8] {
        let coordinator = WorkerCoordinator::new(workers, config).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| coordinator.run(black_box(&source), &tiles).unwrap());
        });
    }

    group.finish();
}

fn bench_pipeline_bicubic(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_bicubic");
    group.sample_size(10);

    let config = MarchingConfig {
        max_canvas_width: 512,
        max_canvas_height: 512,
        ..Default::default()
    };
    let tiles = synthetic_tile_set(config.step);
    let source = noise_image(1024, 1024, 7);

    for workers in [1, 4, 8] {
        let coordinator = WorkerCoordinator::new(workers, config).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| coordinator.run(black_box(&source), &tiles).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_copy, bench_pipeline_bicubic);
criterion_main!(benches);
