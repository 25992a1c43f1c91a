//! Criterion benchmarks for the step function.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndlife_bench::{dimension_profile, reference_profile, stress_profile};
use ndlife_engine::EngineConfig;

/// Benchmark: one step of 2-D Life on the 64x64 reference soup.
fn bench_step_reference(c: &mut Criterion) {
    let p = reference_profile(42).unwrap();
    c.bench_function("step_life_64x64", |b| {
        b.iter(|| black_box(p.engine.step(&p.seed).unwrap()));
    });
}

/// Benchmark: one step of the 256x256 soup, sequential vs parallel evaluation.
fn bench_step_stress(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_life_256x256");
    group.sample_size(20);
    for (name, config) in [
        ("sequential", EngineConfig::sequential()),
        ("parallel", EngineConfig::default()),
    ] {
        let p = stress_profile(42, config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(p.engine.step(&p.seed).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: one proportional-rule step as D grows (soup side 6).
fn bench_step_by_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_proportional_by_dims");
    group.sample_size(20);
    for dims in 2..=5usize {
        let p = dimension_profile(dims, 6, 42).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(dims), &p, |b, p| {
            b.iter(|| black_box(p.engine.step(&p.seed).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: 100 consecutive steps of the reference soup.
fn bench_hundred_steps(c: &mut Criterion) {
    let p = reference_profile(7).unwrap();
    c.bench_function("life_64x64_100_steps", |b| {
        b.iter(|| {
            let mut state = p.seed.clone();
            for _ in 0..100 {
                state = p.engine.step(&state).unwrap();
            }
            black_box(state.len())
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference,
    bench_step_stress,
    bench_step_by_dimension,
    bench_hundred_steps
);
criterion_main!(benches);
