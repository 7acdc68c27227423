//! Benchmarks for grid colorization and PNG export.
//!
//! Run with: cargo bench --package renderer --bench colorize_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grid_common::{Color, LayerOptions, MapMetaData, OccupancyGrid, PaletteName, Pose};
use rand::Rng;
use renderer::{png, Colorizer, OccupancyGridLayer, Palette};

/// Generate a SLAM-like grid: mostly free, scattered obstacles, unknown border.
fn generate_slam_grid(width: u32, height: u32) -> OccupancyGrid {
    let mut rng = rand::thread_rng();
    let border = (width.min(height) / 8) as usize;
    let (w, h) = (width as usize, height as usize);

    let mut data = Vec::with_capacity(w * h);
    for row in 0..h {
        for col in 0..w {
            let edge = row < border || col < border || row + border >= h || col + border >= w;
            let v: i8 = if edge {
                -1
            } else if rng.gen_bool(0.05) {
                100
            } else if rng.gen_bool(0.1) {
                rng.gen_range(1..100)
            } else {
                0
            };
            data.push(v);
        }
    }

    let info = MapMetaData::new(width, height, 0.05, Pose::default());
    OccupancyGrid::new(info, data).expect("generated grid has matching length")
}

fn bench_palette_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_build");
    for name in PaletteName::ALL {
        group.bench_function(name.as_str(), |b| b.iter(|| Palette::build(black_box(name))));
    }
    group.finish();
}

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");

    for size in [384u32, 1024, 2048] {
        let grid = generate_slam_grid(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        for name in PaletteName::ALL {
            let colorizer = Colorizer::new(LayerOptions::default().with_palette(name));
            group.bench_with_input(
                BenchmarkId::new(name.as_str(), format!("{}x{}", size, size)),
                &grid,
                |b, grid| b.iter(|| colorizer.colorize(black_box(grid))),
            );
        }

        let custom = Colorizer::default().with_color_fn(|value, _, row, _| {
            if value == 255 {
                Color::transparent()
            } else {
                Color::new(value, (row % 256) as u8, 0, 255)
            }
        });
        group.bench_with_input(
            BenchmarkId::new("color_fn", format!("{}x{}", size, size)),
            &grid,
            |b, grid| b.iter(|| custom.colorize(black_box(grid))),
        );
    }

    group.finish();
}

fn bench_layer_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("layer_update");
    let grid = generate_slam_grid(1024, 1024);
    let options = LayerOptions::default().with_palette(PaletteName::Map);
    let mut layer = OccupancyGridLayer::with_options(&grid, options);

    group.throughput(Throughput::Elements(1024 * 1024));
    group.bench_function("map_1024", |b| {
        b.iter(|| {
            layer.update(black_box(&grid)).expect("same geometry");
            layer.take_update().map(|p| p.len())
        })
    });
    group.finish();
}

fn bench_png_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_export");

    for size in [384u32, 1024] {
        let grid = generate_slam_grid(size, size);
        for name in [PaletteName::Map, PaletteName::Costmap] {
            let pixels = Colorizer::new(LayerOptions::default().with_palette(name)).colorize(&grid);
            group.bench_with_input(
                BenchmarkId::new(name.as_str(), format!("{}x{}", size, size)),
                &pixels,
                |b, pixels| b.iter(|| png::encode(black_box(pixels))),
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_palette_build,
    bench_colorize,
    bench_layer_update,
    bench_png_export,
);
criterion_main!(benches);
