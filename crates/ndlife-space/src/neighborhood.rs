//! Neighborhood models: the cached offset set that defines "neighbor".

use std::fmt;
use std::sync::Arc;

use ndlife_core::{ConfigError, Coord, ResourceError};
use smallvec::{smallvec, SmallVec};

/// Which cells within `radius` count as neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborhoodShape {
    /// Chebyshev ball: every axis displacement in `[-radius, radius]`.
    Moore,
    /// Manhattan ball: sum of absolute axis displacements at most `radius`.
    VonNeumann,
}

impl NeighborhoodShape {
    /// Stable one-byte tag used by the tape format.
    pub fn tag(self) -> u8 {
        match self {
            Self::Moore => 0,
            Self::VonNeumann => 1,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Moore),
            1 => Some(Self::VonNeumann),
            _ => None,
        }
    }
}

impl fmt::Display for NeighborhoodShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moore => write!(f, "moore"),
            Self::VonNeumann => write!(f, "von-neumann"),
        }
    }
}

/// The parameters a [`NeighborhoodModel`] was built from.
///
/// This is what tape headers record; [`build`](Self::build) rebuilds an
/// identical model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborhoodDescriptor {
    /// Dimension count D.
    pub dims: usize,
    /// Neighborhood radius.
    pub radius: u32,
    /// Neighborhood shape.
    pub shape: NeighborhoodShape,
}

impl NeighborhoodDescriptor {
    /// Build the model this descriptor describes.
    pub fn build(&self) -> Result<NeighborhoodModel, ConfigError> {
        let radius = i32::try_from(self.radius).map_err(|_| ConfigError::NegativeRadius {
            radius: self.radius as i64,
        })?;
        NeighborhoodModel::new(self.dims, radius, self.shape)
    }
}

/// The fixed set of nonzero offsets defining a cell's neighbors.
///
/// Offsets are enumerated once, in lexicographic order, at construction
/// and shared behind an `Arc`; cloning a model never re-enumerates. The
/// offset count grows as `(2r+1)^D` for Moore neighborhoods, so use
/// [`offset_count`](Self::offset_count) to check the cost of a
/// configuration before building it.
///
/// # Examples
///
/// ```
/// use ndlife_space::{NeighborhoodModel, NeighborhoodShape};
///
/// let moore = NeighborhoodModel::new(3, 1, NeighborhoodShape::Moore).unwrap();
/// assert_eq!(moore.max_neighbors(), 26);
///
/// let vn = NeighborhoodModel::new(3, 1, NeighborhoodShape::VonNeumann).unwrap();
/// assert_eq!(vn.max_neighbors(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct NeighborhoodModel {
    descriptor: NeighborhoodDescriptor,
    offsets: Arc<[Coord]>,
}

impl NeighborhoodModel {
    /// Default upper bound on the number of offsets a model may hold.
    pub const MAX_OFFSETS: u64 = 1 << 20;

    /// Largest supported dimension count.
    pub const MAX_DIMS: usize = 1 << 16;

    /// Upper bound on offsets times dimension count, the number of
    /// coordinate components the offset table would store.
    pub const MAX_OFFSET_COMPONENTS: u64 = 1 << 26;

    /// Build a model with the default offset limit.
    ///
    /// Returns `Err(ConfigError::InvalidDimensions)` if `dims` is outside
    /// `1..=MAX_DIMS`, `Err(ConfigError::NegativeRadius)` if `radius < 0`,
    /// and `Err(ConfigError::NeighborhoodTooLarge)` if the offset count
    /// exceeds [`MAX_OFFSETS`](Self::MAX_OFFSETS).
    pub fn new(dims: usize, radius: i32, shape: NeighborhoodShape) -> Result<Self, ConfigError> {
        Self::with_limit(dims, radius, shape, Self::MAX_OFFSETS)
    }

    /// Build a model, refusing neighborhoods with more than `max_offsets`
    /// offsets.
    ///
    /// The limit is further lowered so that the table never stores more
    /// than [`MAX_OFFSET_COMPONENTS`](Self::MAX_OFFSET_COMPONENTS)
    /// coordinate components. Nothing is allocated before both checks pass.
    pub fn with_limit(
        dims: usize,
        radius: i32,
        shape: NeighborhoodShape,
        max_offsets: u64,
    ) -> Result<Self, ConfigError> {
        if dims == 0 || dims > Self::MAX_DIMS {
            return Err(ConfigError::InvalidDimensions {
                value: i64::try_from(dims).unwrap_or(i64::MAX),
            });
        }
        if radius < 0 {
            return Err(ConfigError::NegativeRadius {
                radius: radius as i64,
            });
        }
        let radius = radius as u32;
        let max = max_offsets.min(Self::MAX_OFFSET_COMPONENTS / dims as u64);
        let count = match Self::offset_count(dims, radius, shape) {
            Some(n) if n <= max => n,
            count => return Err(ConfigError::NeighborhoodTooLarge { count, max }),
        };

        let offsets = enumerate_offsets(dims, radius as i32, shape, count as usize);
        debug_assert_eq!(offsets.len() as u64, count);

        Ok(Self {
            descriptor: NeighborhoodDescriptor {
                dims,
                radius,
                shape,
            },
            offsets: offsets.into(),
        })
    }

    /// Exact number of offsets for a configuration, without enumerating.
    ///
    /// Returns `None` if the count does not fit in a `u64`.
    pub fn offset_count(dims: usize, radius: u32, shape: NeighborhoodShape) -> Option<u64> {
        let d = u32::try_from(dims).ok()?;
        match shape {
            NeighborhoodShape::Moore => {
                let side = 2 * radius as u64 + 1;
                side.checked_pow(d).map(|n| n - 1)
            }
            NeighborhoodShape::VonNeumann => {
                // |{x in Z^D : |x|_1 <= r}| = sum_k 2^k C(D,k) C(r,k)
                let (dims, radius) = (dims as u128, radius as u128);
                let mut total: u128 = 0;
                let mut c_dims: u128 = 1;
                let mut c_radius: u128 = 1;
                let mut pow2: u128 = 1;
                let mut k: u128 = 0;
                loop {
                    let term = pow2.checked_mul(c_dims)?.checked_mul(c_radius)?;
                    total = total.checked_add(term)?;
                    if k == dims.min(radius) {
                        break;
                    }
                    k += 1;
                    c_dims = c_dims.checked_mul(dims - k + 1)? / k;
                    c_radius = c_radius.checked_mul(radius - k + 1)? / k;
                    pow2 = pow2.checked_mul(2)?;
                }
                u64::try_from(total - 1).ok()
            }
        }
    }

    /// Dimension count D.
    pub fn dims(&self) -> usize {
        self.descriptor.dims
    }

    /// Neighborhood radius.
    pub fn radius(&self) -> u32 {
        self.descriptor.radius
    }

    /// Neighborhood shape.
    pub fn shape(&self) -> NeighborhoodShape {
        self.descriptor.shape
    }

    /// The parameters this model was built from.
    pub fn descriptor(&self) -> NeighborhoodDescriptor {
        self.descriptor
    }

    /// Number of neighbors of every cell (the offset count).
    pub fn max_neighbors(&self) -> usize {
        self.offsets.len()
    }

    /// The cached offsets, in lexicographic order.
    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    /// Iterate the neighbor coordinates of `cell`.
    ///
    /// Yields `Err(ResourceError::CoordinateOverflow)` for any neighbor
    /// that would leave the `i32` coordinate range.
    pub fn neighbors<'a>(
        &'a self,
        cell: &'a [i32],
    ) -> impl Iterator<Item = Result<Coord, ResourceError>> + 'a {
        self.offsets.iter().map(move |o| offset_coord(cell, o))
    }
}

impl PartialEq for NeighborhoodModel {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for NeighborhoodModel {}

/// `base + offset`, component-wise, failing on `i32` overflow.
pub fn offset_coord(base: &[i32], offset: &[i32]) -> Result<Coord, ResourceError> {
    debug_assert_eq!(base.len(), offset.len());
    base.iter()
        .zip(offset)
        .enumerate()
        .map(|(axis, (&b, &o))| {
            b.checked_add(o)
                .ok_or(ResourceError::CoordinateOverflow { axis })
        })
        .collect()
}

/// Enumerate every nonzero offset satisfying the shape predicate, in
/// lexicographic order.
///
/// Walks the offsets as an odometer, rightmost axis fastest. Von Neumann
/// axes are narrowed to the Manhattan budget left by the axes before
/// them, so the surrounding Moore box is never visited.
fn enumerate_offsets(
    dims: usize,
    radius: i32,
    shape: NeighborhoodShape,
    capacity: usize,
) -> Vec<Coord> {
    let span = |budget: i32| match shape {
        NeighborhoodShape::Moore => radius,
        NeighborhoodShape::VonNeumann => budget,
    };
    let spend = |budget: i32, v: i32| match shape {
        NeighborhoodShape::Moore => budget,
        NeighborhoodShape::VonNeumann => budget - v.abs(),
    };

    // budgets[i]: Manhattan budget left before axis i.
    let mut budgets = vec![radius; dims + 1];
    let mut current: Coord = SmallVec::from_elem(0, dims);
    let reset_tail = |from: usize, current: &mut Coord, budgets: &mut [i32]| {
        for axis in from..dims {
            current[axis] = -span(budgets[axis]);
            budgets[axis + 1] = spend(budgets[axis], current[axis]);
        }
    };
    reset_tail(0, &mut current, budgets.as_mut_slice());

    let mut out = Vec::with_capacity(capacity);
    loop {
        if current.iter().any(|&v| v != 0) {
            out.push(current.clone());
        }
        let Some(axis) = (0..dims)
            .rev()
            .find(|&axis| current[axis] < span(budgets[axis]))
        else {
            break;
        };
        current[axis] += 1;
        budgets[axis + 1] = spend(budgets[axis], current[axis]);
        reset_tail(axis + 1, &mut current, budgets.as_mut_slice());
    }
    out
}

/// The zero vector of `dims` components.
pub fn zero_coord(dims: usize) -> Coord {
    smallvec![0; dims]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn moore_radius1_counts_match_3_pow_d_minus_1() {
        for d in 1..=5usize {
            let m = NeighborhoodModel::new(d, 1, NeighborhoodShape::Moore).unwrap();
            assert_eq!(m.max_neighbors(), 3usize.pow(d as u32) - 1, "D={d}");
        }
    }

    #[test]
    fn von_neumann_radius1_is_two_per_axis() {
        for d in 1..=6usize {
            let m = NeighborhoodModel::new(d, 1, NeighborhoodShape::VonNeumann).unwrap();
            assert_eq!(m.max_neighbors(), 2 * d);
        }
    }

    #[test]
    fn von_neumann_radius2_in_3d() {
        let m = NeighborhoodModel::new(3, 2, NeighborhoodShape::VonNeumann).unwrap();
        assert_eq!(m.max_neighbors(), 24);
        assert!(m
            .offsets()
            .iter()
            .all(|o| o.iter().map(|v| v.abs()).sum::<i32>() <= 2));
    }

    #[test]
    fn radius_zero_has_no_neighbors() {
        let m = NeighborhoodModel::new(4, 0, NeighborhoodShape::Moore).unwrap();
        assert_eq!(m.max_neighbors(), 0);
    }

    #[test]
    fn zero_dims_rejected() {
        match NeighborhoodModel::new(0, 1, NeighborhoodShape::Moore) {
            Err(ConfigError::InvalidDimensions { value: 0 }) => {}
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn negative_radius_rejected() {
        match NeighborhoodModel::new(2, -1, NeighborhoodShape::VonNeumann) {
            Err(ConfigError::NegativeRadius { radius: -1 }) => {}
            other => panic!("expected NegativeRadius, got {other:?}"),
        }
    }

    #[test]
    fn oversized_neighborhood_rejected_before_enumeration() {
        // 3^40 - 1 does not fit in the default limit and must not be built.
        match NeighborhoodModel::new(40, 1, NeighborhoodShape::Moore) {
            Err(ConfigError::NeighborhoodTooLarge { count: Some(_), .. }) => {}
            other => panic!("expected NeighborhoodTooLarge, got {other:?}"),
        }
        assert_eq!(
            NeighborhoodModel::offset_count(200, 1, NeighborhoodShape::Moore),
            None
        );
    }

    #[test]
    fn radius_zero_in_thousands_of_dimensions() {
        let m = NeighborhoodModel::new(20_000, 0, NeighborhoodShape::Moore).unwrap();
        assert_eq!(m.max_neighbors(), 0);
        let vn = NeighborhoodModel::new(20_000, 0, NeighborhoodShape::VonNeumann).unwrap();
        assert_eq!(vn.max_neighbors(), 0);
    }

    #[test]
    fn dimension_count_above_limit_rejected() {
        match NeighborhoodModel::new(1_000_000, 0, NeighborhoodShape::Moore) {
            Err(ConfigError::InvalidDimensions { value: 1_000_000 }) => {}
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn wide_offsets_rejected_before_allocation() {
        // 2 * 60_000 offsets fits MAX_OFFSETS, but not at 60_000 components each.
        match NeighborhoodModel::new(60_000, 1, NeighborhoodShape::VonNeumann) {
            Err(ConfigError::NeighborhoodTooLarge {
                count: Some(120_000),
                max,
            }) => assert_eq!(max, NeighborhoodModel::MAX_OFFSET_COMPONENTS / 60_000),
            other => panic!("expected NeighborhoodTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn von_neumann_radius3_matches_brute_force_filter() {
        let vn = NeighborhoodModel::new(3, 3, NeighborhoodShape::VonNeumann).unwrap();
        let moore = NeighborhoodModel::new(3, 3, NeighborhoodShape::Moore).unwrap();
        let filtered: Vec<Coord> = moore
            .offsets()
            .iter()
            .filter(|o| o.iter().map(|v| v.abs()).sum::<i32>() <= 3)
            .cloned()
            .collect();
        assert_eq!(vn.offsets(), filtered.as_slice());
    }

    #[test]
    fn high_dimension_von_neumann_is_cheap() {
        let m = NeighborhoodModel::new(30, 1, NeighborhoodShape::VonNeumann).unwrap();
        assert_eq!(m.max_neighbors(), 60);
    }

    #[test]
    fn offsets_are_lexicographic_and_exclude_origin() {
        let m = NeighborhoodModel::new(2, 1, NeighborhoodShape::Moore).unwrap();
        let offsets = m.offsets();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert!(!offsets.iter().any(|o| o.iter().all(|&v| v == 0)));
        assert_eq!(offsets[0].as_slice(), &[-1, -1]);
    }

    #[test]
    fn clones_share_the_offset_cache() {
        let m = NeighborhoodModel::new(3, 1, NeighborhoodShape::Moore).unwrap();
        let c = m.clone();
        assert!(std::ptr::eq(m.offsets().as_ptr(), c.offsets().as_ptr()));
    }

    #[test]
    fn descriptor_rebuilds_equal_model() {
        let m = NeighborhoodModel::new(3, 2, NeighborhoodShape::VonNeumann).unwrap();
        let rebuilt = m.descriptor().build().unwrap();
        assert_eq!(m, rebuilt);
        assert_eq!(m.offsets(), rebuilt.offsets());
    }

    #[test]
    fn neighbors_report_overflow() {
        let m = NeighborhoodModel::new(1, 1, NeighborhoodShape::Moore).unwrap();
        let results: Vec<_> = m.neighbors(&[i32::MAX]).collect();
        assert_eq!(results[0], Ok(smallvec![i32::MAX - 1]));
        assert_eq!(
            results[1],
            Err(ResourceError::CoordinateOverflow { axis: 0 })
        );
    }

    #[test]
    fn shape_tag_roundtrip() {
        for shape in [NeighborhoodShape::Moore, NeighborhoodShape::VonNeumann] {
            assert_eq!(NeighborhoodShape::from_tag(shape.tag()), Some(shape));
        }
        assert_eq!(NeighborhoodShape::from_tag(9), None);
    }

    proptest! {
        #[test]
        fn offset_count_matches_enumeration(
            dims in 1usize..5,
            radius in 0i32..4,
            vn in any::<bool>(),
        ) {
            let shape = if vn { NeighborhoodShape::VonNeumann } else { NeighborhoodShape::Moore };
            let m = NeighborhoodModel::new(dims, radius, shape).unwrap();
            prop_assert_eq!(
                Some(m.max_neighbors() as u64),
                NeighborhoodModel::offset_count(dims, radius as u32, shape)
            );
        }

        #[test]
        fn offsets_are_symmetric(dims in 1usize..4, radius in 1i32..3, vn in any::<bool>()) {
            let shape = if vn { NeighborhoodShape::VonNeumann } else { NeighborhoodShape::Moore };
            let m = NeighborhoodModel::new(dims, radius, shape).unwrap();
            for o in m.offsets() {
                let neg: Coord = o.iter().map(|v| -v).collect();
                prop_assert!(m.offsets().contains(&neg));
            }
        }
    }
}
