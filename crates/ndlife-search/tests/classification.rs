//! End-to-end classification of well-known Life patterns.

use ndlife_core::{CancelToken, ConfigError, GenerationId, ResourceError, StepError};
use ndlife_search::{
    classify, CanonicalizationMode, OverflowPolicy, SearchConfig, SearchError, SearchJob,
    SearchResult, StructureSearch,
};
use ndlife_space::{random_soup, SparseState};
use ndlife_test_utils::{
    blinker, block, glider, life_rules, moore, proportional_rules, r_pentomino, single_cell, toad,
};
use proptest::prelude::*;
use smallvec::smallvec;

use CanonicalizationMode::{Raw, TranslationNormalized};

fn life(seed: &SparseState, max_iterations: u64, mode: CanonicalizationMode) -> SearchResult {
    classify(seed, &life_rules(), &moore(2), max_iterations, mode).unwrap()
}

fn search_with(max_seen_states: usize, overflow: OverflowPolicy) -> StructureSearch {
    let config = SearchConfig {
        max_seen_states,
        overflow,
        ..SearchConfig::default()
    };
    StructureSearch::new(moore(2), life_rules(), config).unwrap()
}

// ── Canonical patterns ─────────────────────────────────────────────

#[test]
fn block_is_stable_after_one_step() {
    assert_eq!(
        life(&block(), 10, Raw),
        SearchResult::Stable {
            generation: GenerationId(1)
        }
    );
    assert_eq!(
        life(&block(), 10, TranslationNormalized),
        SearchResult::Stable {
            generation: GenerationId(1)
        }
    );
}

#[test]
fn blinker_has_period_two_in_place() {
    assert_eq!(
        life(&blinker(), 10, Raw),
        SearchResult::Periodic {
            period: 2,
            displacement: smallvec![0, 0],
            onset: GenerationId(0),
        }
    );
}

#[test]
fn toad_has_period_two() {
    match life(&toad(), 10, TranslationNormalized) {
        SearchResult::Periodic {
            period,
            displacement,
            ..
        } => {
            assert_eq!(period, 2);
            assert!(displacement.iter().all(|&d| d == 0));
        }
        other => panic!("expected Periodic, got {other:?}"),
    }
}

#[test]
fn glider_moves_one_diagonal_every_four_steps() {
    let result = life(&glider(), 20, TranslationNormalized);
    assert_eq!(
        result,
        SearchResult::Periodic {
            period: 4,
            displacement: smallvec![1, 1],
            onset: GenerationId(0),
        }
    );
    assert!(result.is_spaceship());
}

#[test]
fn glider_never_repeats_exactly() {
    assert_eq!(
        life(&glider(), 30, Raw),
        SearchResult::Unclassified { iterations_run: 30 }
    );
}

#[test]
fn single_cell_dies_in_one_step() {
    assert_eq!(
        life(&single_cell(2), 10, Raw),
        SearchResult::Extinct {
            generation: GenerationId(1)
        }
    );
}

#[test]
fn empty_seed_is_extinct_immediately() {
    assert_eq!(
        life(&SparseState::empty(2), 10, Raw),
        SearchResult::Extinct {
            generation: GenerationId(0)
        }
    );
}

#[test]
fn zero_budget_only_inspects_seed() {
    assert_eq!(
        life(&block(), 0, Raw),
        SearchResult::Unclassified { iterations_run: 0 }
    );
    assert_eq!(
        life(&block(), 1, Raw),
        SearchResult::Stable {
            generation: GenerationId(1)
        }
    );
}

#[test]
fn r_pentomino_outlasts_small_budget() {
    assert_eq!(
        life(&r_pentomino(), 50, Raw),
        SearchResult::Unclassified { iterations_run: 50 }
    );
}

#[test]
fn three_dimensional_single_cell_dies() {
    let result = classify(&single_cell(3), &proportional_rules(3), &moore(3), 5, Raw).unwrap();
    assert_eq!(
        result,
        SearchResult::Extinct {
            generation: GenerationId(1)
        }
    );
}

// ── Errors and limits ──────────────────────────────────────────────

#[test]
fn mismatched_rule_rejected() {
    match classify(&block(), &life_rules(), &moore(3), 10, Raw) {
        Err(SearchError::Config(ConfigError::RuleNeighborhoodMismatch { .. })) => {}
        other => panic!("expected RuleNeighborhoodMismatch, got {other:?}"),
    }
}

#[test]
fn wrong_dimension_seed_rejected() {
    match life_search().classify(&single_cell(3), 10, Raw) {
        Err(SearchError::Step(StepError::DimensionMismatch {
            expected: 2,
            found: 3,
        })) => {}
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

fn life_search() -> StructureSearch {
    StructureSearch::new(moore(2), life_rules(), SearchConfig::default()).unwrap()
}

#[test]
fn cancelled_search_is_unclassified() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let config = SearchConfig {
        cancel,
        ..SearchConfig::default()
    };
    let search = StructureSearch::new(moore(2), life_rules(), config).unwrap();
    assert_eq!(
        search.classify(&glider(), 100, TranslationNormalized).unwrap(),
        SearchResult::Unclassified { iterations_run: 0 }
    );
}

#[test]
fn overflow_fail_surfaces_resource_error() {
    match search_with(3, OverflowPolicy::Fail).classify(&glider(), 100, Raw) {
        Err(SearchError::Resource(ResourceError::SeenStatesExceeded { limit: 3 })) => {}
        other => panic!("expected SeenStatesExceeded, got {other:?}"),
    }
}

#[test]
fn overflow_unclassified_stops_at_capacity() {
    assert_eq!(
        search_with(3, OverflowPolicy::Unclassified)
            .classify(&glider(), 100, Raw)
            .unwrap(),
        SearchResult::Unclassified { iterations_run: 3 }
    );
}

#[test]
fn eviction_keeps_short_cycles_and_loses_long_ones() {
    let roomy = search_with(2, OverflowPolicy::EvictOldest);
    assert!(matches!(
        roomy.classify(&blinker(), 20, Raw).unwrap(),
        SearchResult::Periodic { period: 2, .. }
    ));

    let cramped = search_with(1, OverflowPolicy::EvictOldest);
    assert_eq!(
        cramped.classify(&blinker(), 20, Raw).unwrap(),
        SearchResult::Unclassified { iterations_run: 20 }
    );
    assert_eq!(
        cramped.classify(&block(), 20, Raw).unwrap(),
        SearchResult::Stable {
            generation: GenerationId(1)
        }
    );
}

#[test]
fn zero_capacity_config_rejected() {
    let config = SearchConfig {
        max_seen_states: 0,
        ..SearchConfig::default()
    };
    match StructureSearch::new(moore(2), life_rules(), config) {
        Err(SearchError::Config(ConfigError::InvalidSearchConfig { .. })) => {}
        other => panic!("expected InvalidSearchConfig, got {other:?}"),
    }
}

// ── Batch ──────────────────────────────────────────────────────────

#[test]
fn batch_results_follow_job_order() {
    let jobs: Vec<SearchJob> = [
        (block(), Raw),
        (blinker(), Raw),
        (glider(), TranslationNormalized),
        (single_cell(2), Raw),
        (r_pentomino(), Raw),
    ]
    .into_iter()
    .map(|(seed, mode)| SearchJob {
        seed,
        max_iterations: 40,
        mode,
    })
    .collect();

    let out = life_search().classify_batch(jobs.clone(), 3);
    assert_eq!(out.len(), jobs.len());
    for (job, result) in jobs.iter().zip(&out) {
        let expected = life_search().classify(&job.seed, job.max_iterations, job.mode);
        assert_eq!(result, &expected);
    }
    assert!(matches!(out[2], Ok(SearchResult::Periodic { period: 4, .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn classification_ignores_position(seed in any::<u64>(), dx in -50i32..50, dy in -50i32..50) {
        let soup = random_soup(2, 8, 0.4, seed).unwrap();
        let shifted = soup.translated(&[dx, dy]).unwrap();
        let search = life_search();
        let a = search.classify(&soup, 60, Raw).unwrap();
        let b = search.classify(&shifted, 60, Raw).unwrap();
        prop_assert_eq!(a, b);
    }
}
