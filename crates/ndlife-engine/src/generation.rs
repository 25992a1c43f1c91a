//! A state tagged with its position in a lineage.

use std::sync::Arc;

use ndlife_core::GenerationId;
use ndlife_space::SparseState;

/// One generation: an immutable state and its index.
///
/// The state sits behind an `Arc`, so cloning a generation (into a tape,
/// a search map, or a visitor) never copies cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// Position in the lineage; `0` is the seed.
    pub index: GenerationId,
    /// The alive cells at this index.
    pub state: Arc<SparseState>,
}

impl Generation {
    /// Tag `state` with `index`.
    pub fn new(index: impl Into<GenerationId>, state: impl Into<Arc<SparseState>>) -> Self {
        Self {
            index: index.into(),
            state: state.into(),
        }
    }

    /// The seed generation of a lineage.
    pub fn seed(state: impl Into<Arc<SparseState>>) -> Self {
        Self::new(GenerationId::SEED, state)
    }

    /// Wrap the successor `state` as the next index.
    pub fn successor(&self, state: SparseState) -> Self {
        Self::new(self.index.next(), state)
    }
}
