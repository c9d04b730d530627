//! Raycast throughput on empty and cluttered grids.
//!
//! Run with: `cargo bench --bench raycast`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridcast::{raycast, Coord2, Grid, Point2};

fn cluttered(size: u32) -> Grid<u8> {
    // Sparse deterministic pattern, roughly one solid cell in 23.
    Grid::from_fn(size, size, |x, y| u8::from((x * 7 + y * 13) % 23 == 0))
}

fn bench_raycast(c: &mut Criterion) {
    let mut group = c.benchmark_group("raycast");

    for size in [16u32, 256, 1024] {
        let empty: Grid<u8> = Grid::square(size);
        let origin = Point2::new(0.5, 0.5);
        let dir = Point2::new(1.0, 0.37);
        group.bench_with_input(BenchmarkId::new("empty", size), &empty, |b, grid| {
            b.iter(|| raycast(black_box(grid), black_box(origin), black_box(dir)))
        });

        let mut grid = cluttered(size);
        grid.set(Coord2::ZERO, 0);
        group.bench_with_input(BenchmarkId::new("cluttered", size), &grid, |b, grid| {
            b.iter(|| raycast(black_box(grid), black_box(origin), black_box(dir)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raycast);
criterion_main!(benches);
