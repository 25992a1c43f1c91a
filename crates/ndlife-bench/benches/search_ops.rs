//! Criterion benchmarks for structure classification.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ndlife_search::{CanonicalizationMode, SearchConfig, SearchJob, StructureSearch};
use ndlife_space::random_soup;
use ndlife_test_utils::{blinker, glider, life_rules, moore};

fn life_search() -> StructureSearch {
    StructureSearch::new(moore(2), life_rules(), SearchConfig::default()).unwrap()
}

/// Benchmark: detect the blinker's period-2 cycle.
fn bench_classify_blinker(c: &mut Criterion) {
    let search = life_search();
    let seed = blinker();
    c.bench_function("classify_blinker", |b| {
        b.iter(|| black_box(search.classify(&seed, 100, CanonicalizationMode::Raw).unwrap()));
    });
}

/// Benchmark: detect the glider as a translated period-4 cycle.
fn bench_classify_glider(c: &mut Criterion) {
    let search = life_search();
    let seed = glider();
    c.bench_function("classify_glider_translated", |b| {
        b.iter(|| {
            black_box(
                search
                    .classify(&seed, 100, CanonicalizationMode::TranslationNormalized)
                    .unwrap(),
            )
        });
    });
}

/// Benchmark: classify 32 small soups, 4 workers, 200 steps each.
fn bench_batch_soups(c: &mut Criterion) {
    let search = life_search();
    let jobs: Vec<SearchJob> = (0..32u64)
        .map(|seed| SearchJob {
            seed: random_soup(2, 12, 0.35, seed).unwrap(),
            max_iterations: 200,
            mode: CanonicalizationMode::TranslationNormalized,
        })
        .collect();

    let mut group = c.benchmark_group("classify_batch");
    group.sample_size(10);
    group.bench_function("soups_32x4", |b| {
        b.iter(|| black_box(search.classify_batch(jobs.clone(), 4)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_classify_blinker,
    bench_classify_glider,
    bench_batch_soups
);
criterion_main!(benches);
