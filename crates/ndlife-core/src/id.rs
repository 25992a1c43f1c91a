//! Strongly-typed identifiers and the [`Coord`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Index of a generation within a lineage.
///
/// `GenerationId(0)` is the seed. Each call to the step function
/// produces the next index; there are never gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GenerationId(pub u64);

impl GenerationId {
    /// The seed generation.
    pub const SEED: GenerationId = GenerationId(0);

    /// The index that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GenerationId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A cell coordinate on the unbounded lattice.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for lattices
/// up to 4 dimensions. Higher-dimensional lattices spill to the heap
/// transparently.
pub type Coord = SmallVec<[i32; 4]>;
