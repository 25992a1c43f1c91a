//! Immutable sparse snapshots of alive cells.

use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use ndlife_core::{ConfigError, Coord, ResourceError};

use crate::hash::CellHasher;
use crate::neighborhood::offset_coord;

/// An immutable set of alive cells on an unbounded `D`-dimensional lattice.
///
/// A coordinate is present iff the cell is alive. Cells are stored in
/// lexicographic order, so iteration order is stable and identical for
/// equal states. The per-axis minimum corner and both content hashes are
/// computed once at construction.
///
/// Two states are equal iff they have the same dimension count and the
/// same alive set.
///
/// # Examples
///
/// ```
/// use ndlife_space::SparseState;
/// use smallvec::smallvec;
///
/// let a = SparseState::new(2, vec![smallvec![0, 0], smallvec![0, 1]]).unwrap();
/// let b = SparseState::new(2, vec![smallvec![5, 5], smallvec![5, 6]]).unwrap();
///
/// assert!(a.is_alive(&[0, 1]));
/// assert_ne!(a, b);
/// assert_ne!(a.raw_hash(), b.raw_hash());
/// assert_eq!(a.canonical_hash(), b.canonical_hash());
/// ```
#[derive(Clone, Debug)]
pub struct SparseState {
    dims: usize,
    cells: IndexSet<Coord>,
    min_corner: Option<Coord>,
    raw_hash: u64,
    canonical_hash: u64,
}

impl SparseState {
    /// Build a state from any collection of cells.
    ///
    /// Duplicates are merged. Returns `Err(ConfigError::InvalidDimensions)`
    /// if `dims == 0` and `Err(ConfigError::CoordinateArity)` if any cell
    /// does not have exactly `dims` components.
    pub fn new(dims: usize, cells: impl IntoIterator<Item = Coord>) -> Result<Self, ConfigError> {
        if dims == 0 {
            return Err(ConfigError::InvalidDimensions { value: 0 });
        }
        let cells: Vec<Coord> = cells.into_iter().collect();
        if let Some(bad) = cells.iter().find(|c| c.len() != dims) {
            return Err(ConfigError::CoordinateArity {
                expected: dims,
                found: bad.len(),
            });
        }
        Ok(Self::from_cells_unchecked(dims, cells))
    }

    /// The empty state of `dims` dimensions.
    pub fn empty(dims: usize) -> Self {
        Self::from_cells_unchecked(dims, Vec::new())
    }

    /// Build a state from cells already known to have `dims` components.
    ///
    /// Used by the step function, whose output is arity-correct by
    /// construction. Arity is only checked in debug builds.
    pub fn from_cells_unchecked(dims: usize, mut cells: Vec<Coord>) -> Self {
        debug_assert!(cells.iter().all(|c| c.len() == dims));
        cells.sort_unstable();
        cells.dedup();

        let min_corner = min_corner(dims, &cells);
        let mut hasher = CellHasher::new(dims, cells.len(), min_corner.as_deref());
        for cell in &cells {
            hasher.feed(cell);
        }
        let (raw_hash, canonical_hash) = hasher.finish();

        Self {
            dims,
            cells: cells.into_iter().collect(),
            min_corner,
            raw_hash,
            canonical_hash,
        }
    }

    /// Dimension count D.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of alive cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell at `coord` is alive. O(1) amortized.
    pub fn is_alive(&self, coord: &[i32]) -> bool {
        self.cells.contains(coord)
    }

    /// Iterate the alive cells in lexicographic order.
    ///
    /// The iterator is lazy and finite; call again to restart.
    pub fn iter(&self) -> indexmap::set::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// FNV-1a hash of the exact alive set.
    pub fn raw_hash(&self) -> u64 {
        self.raw_hash
    }

    /// FNV-1a hash of the alive set translated so that its per-axis
    /// minimum sits at the origin. Equal for any two translates.
    pub fn canonical_hash(&self) -> u64 {
        self.canonical_hash
    }

    /// Per-axis minimum over all alive cells, or `None` if empty.
    pub fn min_corner(&self) -> Option<&Coord> {
        self.min_corner.as_ref()
    }

    /// Inclusive `(min, max)` corners of the alive cells, or `None` if empty.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        let min = self.min_corner.clone()?;
        let mut max = min.clone();
        for cell in &self.cells {
            for (m, &v) in max.iter_mut().zip(cell.iter()) {
                *m = (*m).max(v);
            }
        }
        Some((min, max))
    }

    /// A new state with every cell shifted by `offset`.
    pub fn translated(&self, offset: &[i32]) -> Result<SparseState, ResourceError> {
        let cells = self
            .cells
            .iter()
            .map(|c| offset_coord(c, offset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_cells_unchecked(self.dims, cells))
    }

    /// If `later` is a translate of `self`, the displacement `d` such that
    /// `later == self + d`.
    ///
    /// Two empty states are translates with zero displacement.
    pub fn displacement_to(&self, later: &SparseState) -> Option<Coord> {
        if self.dims != later.dims || self.len() != later.len() {
            return None;
        }
        if self.canonical_hash != later.canonical_hash {
            return None;
        }
        let (from, to) = match (&self.min_corner, &later.min_corner) {
            (Some(a), Some(b)) => (a, b),
            (None, None) => return Some(Coord::from_elem(0, self.dims)),
            _ => return None,
        };
        let delta: Coord = from
            .iter()
            .zip(to.iter())
            .map(|(&a, &b)| b.checked_sub(a))
            .collect::<Option<_>>()?;
        // Both lists are sorted and translation preserves lexicographic
        // order, so the cells must match pairwise.
        let matches = self.cells.iter().zip(later.cells.iter()).all(|(a, b)| {
            a.iter()
                .zip(b.iter())
                .zip(delta.iter())
                .all(|((&x, &y), &d)| x.checked_add(d) == Some(y))
        });
        matches.then_some(delta)
    }
}

fn min_corner(dims: usize, cells: &[Coord]) -> Option<Coord> {
    let mut iter = cells.iter();
    let mut min = iter.next()?.clone();
    debug_assert_eq!(min.len(), dims);
    for cell in iter {
        for (m, &v) in min.iter_mut().zip(cell.iter()) {
            *m = (*m).min(v);
        }
    }
    Some(min)
}

impl PartialEq for SparseState {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims
            && self.raw_hash == other.raw_hash
            && self.cells.len() == other.cells.len()
            && self.cells.iter().eq(other.cells.iter())
    }
}

impl Eq for SparseState {}

impl Hash for SparseState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.raw_hash);
    }
}

impl<'a> IntoIterator for &'a SparseState {
    type Item = &'a Coord;
    type IntoIter = indexmap::set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
