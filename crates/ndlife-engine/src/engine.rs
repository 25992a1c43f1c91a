//! The step function and run loop.
//!
//! A step counts, for every cell adjacent to an alive cell, how many alive
//! neighbors it has. Each alive cell contributes one count to each of its
//! K neighbors, so the work is O(A·K) for A alive cells. The candidate set
//! is the union of those neighbors and the alive cells themselves; every
//! candidate is then passed through [`RuleSet::evaluate`].
//!
//! Candidate evaluation is embarrassingly parallel. Once the candidate set
//! reaches [`EngineConfig::parallel_threshold`] it runs on the rayon pool.
//! The produced state is sorted on construction, so sequential and
//! parallel evaluation yield identical states.

use std::ops::ControlFlow;
use std::time::Instant;

use indexmap::IndexMap;
use ndlife_core::{CancelToken, ConfigError, Coord, ResourceError, StepError};
use ndlife_rule::RuleSet;
use ndlife_space::{NeighborhoodModel, SparseState};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::generation::Generation;
use crate::metrics::StepMetrics;

// The engine is shared read-only across search workers.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SimulationEngine>();
};

// ── RunSummary ─────────────────────────────────────────────────────

/// Why [`SimulationEngine::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStop {
    /// `max_steps` steps were taken.
    Completed,
    /// The cancel token tripped between steps.
    Cancelled,
    /// A generation had no alive cells.
    Extinct,
    /// The visitor returned [`ControlFlow::Break`].
    Halted,
}

/// Outcome of [`SimulationEngine::run`].
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Steps actually taken.
    pub steps: u64,
    /// The last generation produced (the seed if no step ran).
    pub last: Generation,
    /// Why the run ended.
    pub stop: RunStop,
}

// ── SimulationEngine ───────────────────────────────────────────────

/// Advances sparse states under a fixed neighborhood and rule.
///
/// # Examples
///
/// ```
/// use ndlife_engine::{EngineConfig, SimulationEngine};
/// use ndlife_rule::RuleSet;
/// use ndlife_space::{NeighborhoodModel, NeighborhoodShape, SparseState};
/// use smallvec::smallvec;
///
/// let model = NeighborhoodModel::new(2, 1, NeighborhoodShape::Moore).unwrap();
/// let rules = RuleSet::life(&model).unwrap();
/// let engine = SimulationEngine::new(model, rules, EngineConfig::default()).unwrap();
///
/// // Horizontal blinker turns vertical.
/// let blinker = SparseState::new(2, vec![smallvec![0, -1], smallvec![0, 0], smallvec![0, 1]]).unwrap();
/// let next = engine.step(&blinker).unwrap();
/// assert!(next.is_alive(&[-1, 0]) && next.is_alive(&[1, 0]));
/// assert_eq!(engine.step(&next).unwrap(), blinker);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    model: NeighborhoodModel,
    rules: RuleSet,
    config: EngineConfig,
}

impl SimulationEngine {
    /// Build an engine.
    ///
    /// Fails with `ConfigError::RuleNeighborhoodMismatch` if `rules` was
    /// validated against a different neighbor count than `model` has, or
    /// with `ConfigError::InvalidEngineConfig` if `config` is invalid.
    pub fn new(
        model: NeighborhoodModel,
        rules: RuleSet,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if rules.max_neighbors() != model.max_neighbors() {
            return Err(ConfigError::RuleNeighborhoodMismatch {
                rule_max: rules.max_neighbors(),
                neighborhood_max: model.max_neighbors(),
            });
        }
        Ok(Self {
            model,
            rules,
            config,
        })
    }

    /// The neighborhood model.
    pub fn model(&self) -> &NeighborhoodModel {
        &self.model
    }

    /// The rule.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The resource caps.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dimension count of states this engine accepts.
    pub fn dims(&self) -> usize {
        self.model.dims()
    }

    /// Compute the next generation of `state`.
    pub fn step(&self, state: &SparseState) -> Result<SparseState, StepError> {
        self.step_with_metrics(state).map(|(next, _)| next)
    }

    /// Compute the next generation of `state` along with step counters.
    ///
    /// # Errors
    ///
    /// - `StepError::DimensionMismatch` if `state` is not `dims()`-dimensional.
    /// - `ResourceError::CandidateLimitExceeded` or
    ///   `ResourceError::PopulationLimitExceeded` if a cap is exceeded.
    /// - `ResourceError::CoordinateOverflow` if a neighbor leaves the
    ///   `i32` range.
    pub fn step_with_metrics(
        &self,
        state: &SparseState,
    ) -> Result<(SparseState, StepMetrics), StepError> {
        let start = Instant::now();
        let dims = self.dims();
        if state.dims() != dims {
            return Err(StepError::DimensionMismatch {
                expected: dims,
                found: state.dims(),
            });
        }

        let counts = self.neighbor_counts(state)?;
        let isolated: Vec<&Coord> = state.iter().filter(|c| !counts.contains_key(*c)).collect();
        let candidates = counts.len() + isolated.len();
        if candidates > self.config.max_candidates {
            return Err(ResourceError::CandidateLimitExceeded {
                limit: self.config.max_candidates,
            }
            .into());
        }

        let rules = &self.rules;
        let parallel = candidates >= self.config.parallel_threshold;
        let mut next: Vec<Coord> = if parallel {
            counts
                .par_iter()
                .filter(|&(cell, &n)| rules.evaluate(state.is_alive(cell), n as usize))
                .map(|(cell, _)| cell.clone())
                .collect()
        } else {
            counts
                .iter()
                .filter(|&(cell, &n)| rules.evaluate(state.is_alive(cell), n as usize))
                .map(|(cell, _)| cell.clone())
                .collect()
        };
        if rules.evaluate(true, 0) {
            next.extend(isolated.into_iter().cloned());
        }

        if next.len() > self.config.max_population {
            return Err(ResourceError::PopulationLimitExceeded {
                limit: self.config.max_population,
                population: next.len(),
            }
            .into());
        }

        let survivors = next.iter().filter(|c| state.is_alive(c)).count();
        let population = next.len();
        let next = SparseState::from_cells_unchecked(dims, next);

        let metrics = StepMetrics {
            candidates,
            births: population - survivors,
            deaths: state.len() - survivors,
            survivors,
            population,
            parallel,
            elapsed_us: start.elapsed().as_micros() as u64,
        };
        trace!(
            candidates,
            population,
            births = metrics.births,
            deaths = metrics.deaths,
            parallel,
            "step"
        );
        Ok((next, metrics))
    }

    /// Live-neighbor count for every cell adjacent to an alive cell.
    fn neighbor_counts(&self, state: &SparseState) -> Result<IndexMap<Coord, u32>, StepError> {
        let limit = self.config.max_candidates;
        let mut counts: IndexMap<Coord, u32> =
            IndexMap::with_capacity(state.len().saturating_mul(2).min(limit));
        for cell in state {
            for neighbor in self.model.neighbors(cell) {
                *counts.entry(neighbor?).or_insert(0) += 1;
            }
            if counts.len() > limit {
                return Err(ResourceError::CandidateLimitExceeded { limit }.into());
            }
        }
        Ok(counts)
    }

    /// Step from `seed` up to `max_steps` times, handing every generation
    /// (the seed first) to `visit`.
    ///
    /// Stops early when a generation is empty, when `cancel` trips (checked
    /// between steps, never mid-step), or when `visit` breaks. Step errors
    /// abort the run; generations already visited stay with the visitor.
    pub fn run<F>(
        &self,
        seed: &SparseState,
        max_steps: u64,
        cancel: &CancelToken,
        mut visit: F,
    ) -> Result<RunSummary, StepError>
    where
        F: FnMut(&Generation) -> ControlFlow<()>,
    {
        if seed.dims() != self.dims() {
            return Err(StepError::DimensionMismatch {
                expected: self.dims(),
                found: seed.dims(),
            });
        }

        let mut current = Generation::seed(seed.clone());
        let stop = 'run: {
            if visit(&current).is_break() {
                break 'run RunStop::Halted;
            }
            if current.state.is_empty() {
                break 'run RunStop::Extinct;
            }
            for _ in 0..max_steps {
                if cancel.is_cancelled() {
                    break 'run RunStop::Cancelled;
                }
                let next = self.step(&current.state)?;
                current = current.successor(next);
                if visit(&current).is_break() {
                    break 'run RunStop::Halted;
                }
                if current.state.is_empty() {
                    break 'run RunStop::Extinct;
                }
            }
            RunStop::Completed
        };

        debug!(
            steps = current.index.0,
            population = current.state.len(),
            ?stop,
            "run finished"
        );
        Ok(RunSummary {
            steps: current.index.0,
            last: current,
            stop,
        })
    }
}
