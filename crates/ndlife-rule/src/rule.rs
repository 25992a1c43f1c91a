//! The [`RuleSet`] lookup tables and their constructors.

use ndlife_core::ConfigError;
use ndlife_space::NeighborhoodModel;

/// An immutable birth/survival rule over neighbor counts `0..=max_neighbors`.
///
/// # Examples
///
/// ```
/// use ndlife_rule::RuleSet;
///
/// // Conway's Life: B3/S23 over the 8-cell Moore neighborhood.
/// let life = RuleSet::new([3], [2, 3], 8).unwrap();
/// assert!(life.evaluate(false, 3));
/// assert!(life.evaluate(true, 2));
/// assert!(!life.evaluate(true, 4));
/// assert_eq!(life.to_string(), "B3/S23");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleSet {
    birth: Box<[bool]>,
    survival: Box<[bool]>,
}

impl RuleSet {
    /// Largest neighborhood size a rule table may cover. No neighborhood
    /// model can hold more offsets than this.
    pub const MAX_NEIGHBORS: usize = 1 << 26;

    /// Build a rule from birth and survival thresholds.
    ///
    /// Every threshold must lie in `[0, max_neighbors]`; otherwise returns
    /// `Err(ConfigError::ThresholdOutOfRange)`. Duplicates are ignored.
    /// A `max_neighbors` above [`MAX_NEIGHBORS`](Self::MAX_NEIGHBORS) is
    /// reported as `ThresholdOutOfRange` against that bound.
    pub fn new(
        birth: impl IntoIterator<Item = i64>,
        survival: impl IntoIterator<Item = i64>,
        max_neighbors: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            birth: table(birth, max_neighbors)?,
            survival: table(survival, max_neighbors)?,
        })
    }

    /// Build a rule validated against `model`'s neighbor count.
    pub fn for_neighborhood(
        birth: impl IntoIterator<Item = i64>,
        survival: impl IntoIterator<Item = i64>,
        model: &NeighborhoodModel,
    ) -> Result<Self, ConfigError> {
        Self::new(birth, survival, model.max_neighbors())
    }

    /// Conway's B3/S23 for `model`.
    ///
    /// Fails if the neighborhood has fewer than 3 neighbors.
    pub fn life(model: &NeighborhoodModel) -> Result<Self, ConfigError> {
        Self::for_neighborhood([3], [2, 3], model)
    }

    /// Scale Conway's proportions to a neighborhood of `max_neighbors` cells.
    ///
    /// With `K = max_neighbors`, a live cell survives with between `⌈K/4⌉`
    /// and `⌊3K/8⌋` live neighbors, and a dead cell is born with between
    /// `⌊3K/8⌋` and `⌈K/2⌉ - 1`. Either range may be empty for very small
    /// neighborhoods. For `K = 8` this is exactly B3/S23.
    ///
    /// Fails only if `K` exceeds [`MAX_NEIGHBORS`](Self::MAX_NEIGHBORS).
    pub fn proportional(max_neighbors: usize) -> Result<Self, ConfigError> {
        check_size(max_neighbors)?;
        let k = max_neighbors;
        // floor(3k/8) without forming 3k.
        let three_eighths = 3 * (k / 8) + 3 * (k % 8) / 8;
        let survival = k.div_ceil(4)..=three_eighths;
        let birth = three_eighths..k.div_ceil(2);
        let as_i64 = |n: usize| n as i64;
        Self::new(birth.map(as_i64), survival.map(as_i64), k)
    }

    /// Next alive state of a cell. Counts above
    /// [`max_neighbors`](Self::max_neighbors) evaluate to dead.
    #[inline]
    pub fn evaluate(&self, currently_alive: bool, live_neighbor_count: usize) -> bool {
        let table = if currently_alive {
            &self.survival
        } else {
            &self.birth
        };
        table.get(live_neighbor_count).copied().unwrap_or(false)
    }

    /// Largest neighbor count the rule was validated against.
    pub fn max_neighbors(&self) -> usize {
        self.birth.len() - 1
    }

    /// Birth thresholds, ascending.
    pub fn birth(&self) -> Vec<usize> {
        members(&self.birth)
    }

    /// Survival thresholds, ascending.
    pub fn survival(&self) -> Vec<usize> {
        members(&self.survival)
    }
}

fn table(
    thresholds: impl IntoIterator<Item = i64>,
    max_neighbors: usize,
) -> Result<Box<[bool]>, ConfigError> {
    check_size(max_neighbors)?;
    let mut t = vec![false; max_neighbors + 1];
    for value in thresholds {
        let idx = usize::try_from(value)
            .ok()
            .filter(|&i| i <= max_neighbors)
            .ok_or(ConfigError::ThresholdOutOfRange {
                value,
                max_neighbors,
            })?;
        t[idx] = true;
    }
    Ok(t.into())
}

fn check_size(max_neighbors: usize) -> Result<(), ConfigError> {
    if max_neighbors > RuleSet::MAX_NEIGHBORS {
        return Err(ConfigError::ThresholdOutOfRange {
            value: i64::try_from(max_neighbors).unwrap_or(i64::MAX),
            max_neighbors: RuleSet::MAX_NEIGHBORS,
        });
    }
    Ok(())
}

fn members(table: &[bool]) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter_map(|(n, &on)| on.then_some(n))
        .collect()
}
