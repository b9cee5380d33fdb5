//! Benchmarks for contour tracing.
//!
//! Run with: cargo bench --package isoline --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grid_common::Grid;
use isoline::{generate_contour_levels, group_polylines, trace, trace_batch, TraceConfig};
use rand::Rng;

/// Generate a smooth temperature-like field with hills and valleys.
fn generate_smooth_field(width: usize, height: usize) -> Grid {
    let mut data = vec![0.0f64; width * height];

    for y in 0..height {
        for x in 0..width {
            let fx = x as f64 / width as f64;
            let fy = y as f64 / height as f64;

            // Create multiple overlapping sine waves for a realistic pattern
            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data[y * width + x] = 50.0 + v1 + v2 + v3;
        }
    }
    Grid::new(width, height, data).unwrap()
}

/// Generate a field with random noise (more contour segments).
fn generate_noisy_field(width: usize, height: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let base = generate_smooth_field(width, height);
    let data = base
        .values()
        .iter()
        .map(|&v| v + rng.gen_range(-5.0..5.0))
        .collect();
    Grid::new(width, height, data).unwrap()
}

/// Smooth field with a rectangular hole of missing data.
fn generate_masked_field(width: usize, height: usize) -> Grid {
    let grid = generate_smooth_field(width, height);
    let mut weights = vec![1.0; width * height];
    for y in height / 3..height / 2 {
        for x in width / 4..width / 2 {
            weights[y * width + x] = 0.0;
        }
    }
    grid.with_weights(weights).unwrap()
}

// =============================================================================
// CONTOUR LEVEL GENERATION BENCHMARKS
// =============================================================================

fn bench_generate_contour_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_contour_levels");

    let ranges = [
        (0.0f64, 100.0, 10.0, "0-100_by_10"),
        (0.0f64, 100.0, 2.0, "0-100_by_2"),
        (-50.0f64, 50.0, 5.0, "neg50-50_by_5"),
        (900.0f64, 1100.0, 4.0, "pressure_4hPa"),
    ];

    for (min, max, interval, name) in ranges {
        group.bench_with_input(
            BenchmarkId::new("levels", name),
            &(min, max, interval),
            |b, &(min, max, interval)| {
                b.iter(|| generate_contour_levels(black_box(min), black_box(max), black_box(interval)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// TRACE BENCHMARKS
// =============================================================================

fn bench_trace_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_grid_sizes");
    let config = TraceConfig::default();
    let levels = generate_contour_levels(0.0, 100.0, 5.0);

    for size in [64, 128, 256, 512] {
        let grid = generate_smooth_field(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("smooth", size), &grid, |b, grid| {
            b.iter(|| trace(black_box(grid), &levels, &config).unwrap());
        });
    }

    group.finish();
}

fn bench_trace_field_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_field_types");
    let config = TraceConfig::default();
    let levels = generate_contour_levels(0.0, 100.0, 5.0);
    let size = 256;

    let fields = [
        ("smooth", generate_smooth_field(size, size)),
        ("noisy", generate_noisy_field(size, size)),
        ("masked", generate_masked_field(size, size)),
    ];

    for (name, grid) in &fields {
        group.bench_with_input(BenchmarkId::new("field", name), grid, |b, grid| {
            b.iter(|| trace(black_box(grid), &levels, &config).unwrap());
        });
    }

    group.finish();
}

fn bench_level_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_level_counts");
    let config = TraceConfig::default();
    let grid = generate_smooth_field(256, 256);

    for interval in [20.0, 10.0, 5.0, 2.0] {
        let levels = generate_contour_levels(0.0, 100.0, interval);
        group.bench_with_input(
            BenchmarkId::new("levels", levels.len()),
            &levels,
            |b, levels| {
                b.iter(|| trace(&grid, black_box(levels), &config).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_group_polylines(c: &mut Criterion) {
    let grid = generate_noisy_field(256, 256);
    let levels = generate_contour_levels(0.0, 100.0, 5.0);
    let bundle = trace(&grid, &levels, &TraceConfig::default()).unwrap();

    c.bench_function("group_polylines_noisy_256", |b| {
        b.iter(|| group_polylines(black_box(&bundle)));
    });
}

fn bench_trace_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_batch");
    let config = TraceConfig::default();
    let levels = generate_contour_levels(0.0, 100.0, 5.0);

    for count in [1, 4, 16] {
        let grids: Vec<Grid> = (0..count).map(|_| generate_smooth_field(128, 128)).collect();
        group.bench_with_input(BenchmarkId::new("grids", count), &grids, |b, grids| {
            b.iter(|| trace_batch(black_box(grids), &levels, &config));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_contour_levels,
    bench_trace_grid_sizes,
    bench_trace_field_types,
    bench_level_counts,
    bench_group_polylines,
    bench_trace_batch,
);
criterion_main!(benches);
