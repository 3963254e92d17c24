//! Benchmarks for obstruction map rendering.
//!
//! Run with: cargo bench --package obstruction-renderer
//! Or: cargo bench --package obstruction-renderer --bench render_benchmarks -- raster

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use obstruction_renderer::color::{interpolate, ColorEndpoints};
use obstruction_renderer::png::encode_png;
use obstruction_renderer::{build_svg, write_raster, PixelFormat, RenderConfig};
use test_utils::{create_dish_grid, create_noisy_grid};

fn bench_interpolate(c: &mut Criterion) {
    let endpoints = ColorEndpoints::default();
    let values: Vec<f64> = create_noisy_grid(256, 1, 5).remove(0);

    c.bench_function("interpolate_256", |b| {
        b.iter(|| {
            for &v in &values {
                black_box(interpolate(black_box(v), &endpoints));
            }
        })
    });
}

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");

    // 123 is the native dish map size
    for size in [62, 123, 246] {
        let grid = create_dish_grid(size);
        group.throughput(Throughput::Elements((size * size) as u64));

        for (name, greyscale, alpha) in [("rgba", false, true), ("grey", true, false)] {
            let config = RenderConfig {
                greyscale,
                alpha,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(name, size), &grid, |b, grid| {
                b.iter(|| {
                    let mut sink = Vec::new();
                    write_raster(black_box(grid), &config, &mut sink).unwrap();
                    sink
                })
            });
        }
    }

    group.finish();
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");

    for size in [128usize, 512] {
        let pixels: Vec<u8> = (0..size * size * 4).map(|i| (i % 251) as u8).collect();
        group.throughput(Throughput::Bytes(pixels.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pixels, |b, pixels| {
            b.iter(|| encode_png(black_box(pixels), size, size, PixelFormat::Rgba).unwrap())
        });
    }

    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg");

    for upscale in [1u32, 4, 8] {
        let grid = create_dish_grid(123);
        let config = RenderConfig {
            upscale_factor: upscale,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("dish_123", upscale), &grid, |b, grid| {
            b.iter(|| build_svg(black_box(grid), &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interpolate, bench_raster, bench_png_encoding, bench_svg);
criterion_main!(benches);
