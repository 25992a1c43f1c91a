//! The in-memory generation history.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndlife_core::{ConfigError, GenerationId, ResourceError, SequencingError};
use ndlife_engine::{Generation, SimulationEngine};
use ndlife_space::SparseState;
use tracing::debug;

use crate::error::TapeError;
use crate::retention::RetentionPolicy;
use crate::types::TapeHeader;

/// Ordered, append-only record of one lineage.
///
/// Indices start at 0 (the seed) and increase by one with no gaps. The
/// raw hash of every appended generation is kept regardless of
/// retention, so reconstructed generations are checked against what was
/// recorded.
///
/// The tape has a cursor used by [`seek`](Self::seek),
/// [`current`](Self::current), [`rewind`](Self::rewind), and
/// [`advance`](Self::advance). Appending moves the cursor to the new
/// generation.
///
/// # Examples
///
/// ```
/// use ndlife_core::CancelToken;
/// use ndlife_engine::{EngineConfig, SimulationEngine};
/// use ndlife_rule::RuleSet;
/// use ndlife_space::{NeighborhoodModel, NeighborhoodShape, SparseState};
/// use ndlife_tape::{record, RetentionPolicy, Tape};
/// use smallvec::smallvec;
///
/// let model = NeighborhoodModel::new(2, 1, NeighborhoodShape::Moore).unwrap();
/// let rules = RuleSet::life(&model).unwrap();
/// let engine = SimulationEngine::new(model, rules, EngineConfig::default()).unwrap();
///
/// let policy = RetentionPolicy::Checkpointed { recent: 2, interval: 10 };
/// let mut tape = Tape::new(engine, policy).unwrap();
/// let blinker = SparseState::new(2, vec![smallvec![0, 0], smallvec![1, 0], smallvec![2, 0]]).unwrap();
/// record(&mut tape, blinker.clone(), 30, &CancelToken::new()).unwrap();
///
/// assert_eq!(tape.len(), 31);
/// assert!(tape.retained_count() < 31);
/// // Generation 14 was dropped; seek rebuilds it from checkpoint 10.
/// assert_eq!(*tape.seek(14).unwrap().state, blinker);
/// ```
#[derive(Debug)]
pub struct Tape {
    engine: SimulationEngine,
    retention: RetentionPolicy,
    retained: BTreeMap<u64, Arc<SparseState>>,
    hashes: Vec<u64>,
    retained_cells: usize,
    cell_budget: Option<usize>,
    cursor: Option<Generation>,
}

impl Tape {
    /// Create an empty tape for generations produced by `engine`.
    pub fn new(engine: SimulationEngine, retention: RetentionPolicy) -> Result<Self, ConfigError> {
        retention.validate()?;
        Ok(Self {
            engine,
            retention,
            retained: BTreeMap::new(),
            hashes: Vec::new(),
            retained_cells: 0,
            cell_budget: None,
            cursor: None,
        })
    }

    /// Cap the total alive cells held across retained generations.
    ///
    /// An append that would exceed the budget fails with
    /// `ResourceError::TapeMemoryExceeded` and leaves the tape unchanged.
    pub fn with_cell_budget(mut self, max_cells: usize) -> Self {
        self.cell_budget = Some(max_cells);
        self
    }

    /// The engine generations are replayed with.
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// The retention policy.
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Header describing the engine, as written by [`export`](crate::export).
    pub fn header(&self) -> TapeHeader {
        TapeHeader::describe(&self.engine)
    }

    /// Number of generations recorded.
    pub fn len(&self) -> u64 {
        self.hashes.len() as u64
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Number of generations currently held in memory.
    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Total alive cells across retained generations.
    pub fn retained_cells(&self) -> usize {
        self.retained_cells
    }

    /// Recorded raw hash of generation `index`.
    pub fn hash_at(&self, index: u64) -> Option<u64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.hashes.get(i).copied())
    }

    /// The most recently appended generation.
    pub fn latest(&self) -> Option<Generation> {
        self.retained
            .last_key_value()
            .map(|(&i, s)| Generation::new(i, Arc::clone(s)))
    }

    /// Append the next generation.
    ///
    /// # Errors
    ///
    /// - `SequencingError::OutOfOrder` unless `generation.index == len()`.
    /// - `SequencingError::DimensionMismatch` if the state's dimension
    ///   count differs from the engine's.
    /// - `ResourceError::TapeMemoryExceeded` if the cell budget would be
    ///   exceeded.
    ///
    /// On error the tape is unchanged.
    pub fn append(&mut self, generation: Generation) -> Result<(), TapeError> {
        let expected = self.len();
        if generation.index.0 != expected {
            return Err(SequencingError::OutOfOrder {
                expected: GenerationId(expected),
                found: generation.index,
            }
            .into());
        }
        if generation.state.dims() != self.engine.dims() {
            return Err(SequencingError::DimensionMismatch {
                expected: self.engine.dims(),
                found: generation.state.dims(),
            }
            .into());
        }

        let evicted = self
            .retention
            .evicted_by(expected)
            .filter(|k| self.retained.contains_key(k));
        let freed = evicted
            .and_then(|k| self.retained.get(&k))
            .map_or(0, |s| s.len());
        let required = self.retained_cells - freed + generation.state.len();
        if let Some(limit) = self.cell_budget {
            if required > limit {
                return Err(ResourceError::TapeMemoryExceeded { limit, required }.into());
            }
        }

        if let Some(k) = evicted {
            self.retained.remove(&k);
            debug!(index = k, "dropped generation from tape");
        }
        self.retained_cells = required;
        self.hashes.push(generation.state.raw_hash());
        self.retained.insert(expected, Arc::clone(&generation.state));
        self.cursor = Some(generation);
        Ok(())
    }

    /// Move the cursor to `index` and return that generation.
    ///
    /// Generations that are not retained are rebuilt by stepping forward
    /// from the nearest earlier retained one.
    pub fn seek(&mut self, index: u64) -> Result<Generation, TapeError> {
        let generation = self.materialize(index)?;
        self.cursor = Some(generation.clone());
        Ok(generation)
    }

    /// The generation under the cursor, if anything has been recorded.
    pub fn current(&self) -> Option<&Generation> {
        self.cursor.as_ref()
    }

    /// Move the cursor to the seed and return it.
    pub fn rewind(&mut self) -> Option<Generation> {
        let seed = self
            .retained
            .get(&0)
            .map(|s| Generation::seed(Arc::clone(s)))?;
        self.cursor = Some(seed.clone());
        Some(seed)
    }

    /// Move the cursor forward one generation.
    ///
    /// Returns `Ok(None)` and leaves the cursor in place at the end of the
    /// tape.
    pub fn advance(&mut self) -> Result<Option<Generation>, TapeError> {
        let Some(current) = self.cursor.as_ref() else {
            return Ok(None);
        };
        let next = current.index.0 + 1;
        if next >= self.len() {
            return Ok(None);
        }
        let generation = match self.retained.get(&next) {
            Some(s) => Generation::new(next, Arc::clone(s)),
            None => self.rebuild(current, next)?,
        };
        self.cursor = Some(generation.clone());
        Ok(Some(generation))
    }

    /// Iterate every recorded generation in order.
    ///
    /// Unretained generations are stepped from their predecessor, so a
    /// full playback costs one step per dropped generation.
    pub fn playback(&self) -> Playback<'_> {
        Playback {
            tape: self,
            next: 0,
            prev: None,
        }
    }

    fn materialize(&self, index: u64) -> Result<Generation, TapeError> {
        if index >= self.len() {
            return Err(SequencingError::OutOfRange {
                requested: GenerationId(index),
                recorded: self.len(),
            }
            .into());
        }
        let (&start, state) = self
            .retained
            .range(..=index)
            .next_back()
            .ok_or(SequencingError::OutOfRange {
                requested: GenerationId(index),
                recorded: self.len(),
            })?;
        let checkpoint = Generation::new(start, Arc::clone(state));
        if start == index {
            return Ok(checkpoint);
        }
        self.rebuild(&checkpoint, index)
    }

    /// Step from `from` up to `target`, checking each rebuilt hash.
    fn rebuild(&self, from: &Generation, target: u64) -> Result<Generation, TapeError> {
        let mut current = from.clone();
        while current.index.0 < target {
            let next = self.engine.step(&current.state)?;
            current = current.successor(next);
            self.check_hash(&current)?;
        }
        Ok(current)
    }

    pub(crate) fn check_hash(&self, generation: &Generation) -> Result<(), TapeError> {
        let replayed = generation.state.raw_hash();
        match self.hash_at(generation.index.0) {
            Some(recorded) if recorded != replayed => Err(TapeError::ReplayDivergence {
                index: generation.index,
                recorded,
                replayed,
            }),
            _ => Ok(()),
        }
    }
}

/// Sequential iterator over a tape's generations.
///
/// Fused after the first error.
pub struct Playback<'a> {
    tape: &'a Tape,
    next: u64,
    prev: Option<Generation>,
}

impl Iterator for Playback<'_> {
    type Item = Result<Generation, TapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        if index >= self.tape.len() {
            return None;
        }
        let result = match (self.tape.retained.get(&index), self.prev.as_ref()) {
            (Some(s), _) => Ok(Generation::new(index, Arc::clone(s))),
            (None, Some(prev)) => self.tape.rebuild(prev, index),
            (None, None) => self.tape.materialize(index),
        };
        match result {
            Ok(generation) => {
                self.next += 1;
                self.prev = Some(generation.clone());
                Some(Ok(generation))
            }
            Err(e) => {
                self.next = u64::MAX;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tape.len().saturating_sub(self.next);
        let n = usize::try_from(remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
