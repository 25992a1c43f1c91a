//! Criterion micro-benchmarks for neighborhood construction and enumeration.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndlife_core::Coord;
use ndlife_space::{NeighborhoodModel, NeighborhoodShape};
use smallvec::smallvec;

/// Benchmark: build the radius-1 Moore offset table for D = 1..=6.
fn bench_build_moore(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_moore_r1");
    for dims in 1..=6usize {
        group.bench_with_input(BenchmarkId::from_parameter(dims), &dims, |b, &dims| {
            b.iter(|| {
                let model = NeighborhoodModel::new(dims, 1, NeighborhoodShape::Moore).unwrap();
                black_box(model.max_neighbors());
            });
        });
    }
    group.finish();
}

/// Benchmark: build a radius-3 von Neumann offset table in 4-D.
fn bench_build_von_neumann(c: &mut Criterion) {
    c.bench_function("build_von_neumann_4d_r3", |b| {
        b.iter(|| {
            let model = NeighborhoodModel::new(4, 3, NeighborhoodShape::VonNeumann).unwrap();
            black_box(model.max_neighbors());
        });
    });
}

/// Benchmark: enumerate neighbors of 1K cells in a 4-D Moore neighborhood (80 each).
fn bench_neighbors_4d(c: &mut Criterion) {
    let model = NeighborhoodModel::new(4, 1, NeighborhoodShape::Moore).unwrap();
    let cells: Vec<Coord> = (0..1000i32)
        .map(|i| smallvec![i % 10, (i / 10) % 10, i / 100, -i])
        .collect();

    c.bench_function("neighbors_moore_4d_1k", |b| {
        b.iter(|| {
            for cell in &cells {
                for n in model.neighbors(cell) {
                    black_box(n.unwrap());
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_moore,
    bench_build_von_neumann,
    bench_neighbors_4d
);
criterion_main!(benches);
