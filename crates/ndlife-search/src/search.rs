//! Cycle detection over an evolving pattern.
//!
//! Each generation is keyed by its raw hash, or by its canonical hash in
//! [`CanonicalizationMode::TranslationNormalized`]. A key hit is confirmed
//! against the stored state before it counts as a repeat, so a hash
//! collision can never produce a false classification.

use std::sync::Arc;

use ndlife_core::{Coord, GenerationId, ResourceError, StepError};
use ndlife_engine::SimulationEngine;
use ndlife_rule::RuleSet;
use ndlife_space::{NeighborhoodModel, SparseState};
use tracing::{debug, trace, warn};

use crate::config::{OverflowPolicy, SearchConfig};
use crate::error::SearchError;
use crate::result::{CanonicalizationMode, SearchResult};
use crate::seen::SeenStates;

/// Classify `seed` with default [`SearchConfig`] settings.
///
/// Runs at most `max_iterations` steps.
///
/// # Examples
///
/// ```
/// use ndlife_rule::RuleSet;
/// use ndlife_search::{classify, CanonicalizationMode, SearchResult};
/// use ndlife_space::{NeighborhoodModel, NeighborhoodShape, SparseState};
/// use smallvec::smallvec;
///
/// let model = NeighborhoodModel::new(2, 1, NeighborhoodShape::Moore).unwrap();
/// let rules = RuleSet::life(&model).unwrap();
/// let block = SparseState::new(
///     2,
///     vec![smallvec![0, 0], smallvec![0, 1], smallvec![1, 0], smallvec![1, 1]],
/// )
/// .unwrap();
///
/// let result = classify(&block, &rules, &model, 10, CanonicalizationMode::Raw).unwrap();
/// assert!(matches!(result, SearchResult::Stable { .. }));
/// ```
pub fn classify(
    seed: &SparseState,
    rules: &RuleSet,
    model: &NeighborhoodModel,
    max_iterations: u64,
    mode: CanonicalizationMode,
) -> Result<SearchResult, SearchError> {
    StructureSearch::new(model.clone(), rules.clone(), SearchConfig::default())?.classify(
        seed,
        max_iterations,
        mode,
    )
}

/// A reusable classifier bound to one neighborhood, rule and config.
///
/// Immutable once built; share it by reference across threads or use
/// [`classify_batch`](Self::classify_batch).
#[derive(Clone, Debug)]
pub struct StructureSearch {
    engine: SimulationEngine,
    config: SearchConfig,
}

impl StructureSearch {
    /// Build a search, validating `config` and the rule/neighborhood pair.
    pub fn new(
        model: NeighborhoodModel,
        rules: RuleSet,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let engine = SimulationEngine::new(model, rules, config.engine.clone())?;
        Ok(Self { engine, config })
    }

    /// The engine driving each search.
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run `seed` forward until it dies out, repeats, or `max_iterations`
    /// steps have been taken.
    ///
    /// Generation `index` is compared against every remembered earlier
    /// generation with the same key. A confirmed repeat of generation `i`
    /// is `Stable` when `i == index - 1` and the alive set is unchanged,
    /// otherwise `Periodic` with `period = index - i` and `onset = i`.
    ///
    /// Returns `Unclassified` when the budget runs out, when the cancel
    /// token trips, or when the seen-state map fills up under
    /// [`OverflowPolicy::Unclassified`].
    ///
    /// # Errors
    ///
    /// - `StepError::DimensionMismatch` if `seed` has the wrong dimension count.
    /// - Any `StepError` raised by the engine, such as a tripped candidate cap.
    /// - `ResourceError::SeenStatesExceeded` under [`OverflowPolicy::Fail`].
    pub fn classify(
        &self,
        seed: &SparseState,
        max_iterations: u64,
        mode: CanonicalizationMode,
    ) -> Result<SearchResult, SearchError> {
        if seed.dims() != self.engine.dims() {
            return Err(StepError::DimensionMismatch {
                expected: self.engine.dims(),
                found: seed.dims(),
            }
            .into());
        }

        let mut seen = SeenStates::new(self.config.max_seen_states);
        let mut evicted = 0u64;
        let mut state = Arc::new(seed.clone());
        let mut index = 0u64;

        let result = loop {
            if state.is_empty() {
                break SearchResult::Extinct {
                    generation: GenerationId(index),
                };
            }

            let key = key_of(&state, mode);
            if let Some((earlier, displacement)) =
                seen.find(key, |prev| confirm(prev, &state, mode))
            {
                // A zero displacement means the alive set itself repeated.
                let unchanged = displacement.iter().all(|&d| d == 0);
                break if earlier + 1 == index && unchanged {
                    SearchResult::Stable {
                        generation: GenerationId(index),
                    }
                } else {
                    SearchResult::Periodic {
                        period: index - earlier,
                        displacement,
                        onset: GenerationId(earlier),
                    }
                };
            }

            if index == max_iterations {
                break SearchResult::Unclassified {
                    iterations_run: max_iterations,
                };
            }
            if self.config.cancel.is_cancelled() {
                break SearchResult::Unclassified {
                    iterations_run: index,
                };
            }

            if seen.is_full() {
                match self.config.overflow {
                    OverflowPolicy::Fail => {
                        return Err(ResourceError::SeenStatesExceeded {
                            limit: self.config.max_seen_states,
                        }
                        .into());
                    }
                    OverflowPolicy::Unclassified => {
                        break SearchResult::Unclassified {
                            iterations_run: index,
                        };
                    }
                    OverflowPolicy::EvictOldest => {
                        if evicted == 0 {
                            warn!(
                                capacity = self.config.max_seen_states,
                                generation = index,
                                "seen-state map full, evicting oldest states"
                            );
                        }
                        seen.evict_oldest();
                        evicted += 1;
                    }
                }
            }
            seen.insert(index, key, Arc::clone(&state));

            let next = self.engine.step(&state)?;
            index += 1;
            trace!(generation = index, population = next.len(), "search step");
            state = Arc::new(next);
        };

        debug!(
            %result,
            remembered = seen.len(),
            evicted,
            "search finished"
        );
        Ok(result)
    }
}

fn key_of(state: &SparseState, mode: CanonicalizationMode) -> u64 {
    match mode {
        CanonicalizationMode::Raw => state.raw_hash(),
        CanonicalizationMode::TranslationNormalized => state.canonical_hash(),
    }
}

/// Displacement from `prev` to `current` if they count as the same
/// state under `mode`.
fn confirm(prev: &SparseState, current: &SparseState, mode: CanonicalizationMode) -> Option<Coord> {
    match mode {
        CanonicalizationMode::Raw => {
            (prev == current).then(|| Coord::from_elem(0, current.dims()))
        }
        CanonicalizationMode::TranslationNormalized => prev.displacement_to(current),
    }
}
