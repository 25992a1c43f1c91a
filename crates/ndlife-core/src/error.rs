//! Error types for the ndlife engine.
//!
//! Organized by subsystem: configuration (construction-time validation),
//! sequencing (tape ordering), resources (caller-supplied caps), and
//! stepping (the simulation hot path).

use std::error::Error;
use std::fmt;

use crate::id::GenerationId;

/// Construction-time validation failures.
///
/// Always local to the constructor that raised it and never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Dimension count is zero or above the supported maximum.
    InvalidDimensions {
        /// The rejected dimension count.
        value: i64,
    },
    /// Neighborhood radius is negative or does not fit the coordinate type.
    NegativeRadius {
        /// The rejected radius.
        radius: i64,
    },
    /// The neighborhood would contain more offsets than the configured limit.
    NeighborhoodTooLarge {
        /// Exact offset count, or `None` if it overflows `u64`.
        count: Option<u64>,
        /// The limit that was exceeded.
        max: u64,
    },
    /// A birth or survival threshold lies outside `[0, max_neighbors]`.
    ThresholdOutOfRange {
        /// The rejected threshold.
        value: i64,
        /// Largest valid neighbor count for the neighborhood.
        max_neighbors: usize,
    },
    /// A rule string could not be parsed.
    InvalidRuleString {
        /// What went wrong.
        reason: String,
    },
    /// A rule set was built for a different neighborhood size.
    RuleNeighborhoodMismatch {
        /// `max_neighbors` the rule set was validated against.
        rule_max: usize,
        /// `max_neighbors` of the neighborhood it was paired with.
        neighborhood_max: usize,
    },
    /// A seed contains no alive cells.
    EmptySeed,
    /// A coordinate has the wrong number of components.
    CoordinateArity {
        /// Expected component count (the dimension count).
        expected: usize,
        /// Actual component count.
        found: usize,
    },
    /// A coordinate component does not fit the coordinate type.
    CoordinateOutOfRange {
        /// The rejected component.
        value: i64,
    },
    /// Tape retention policy is invalid.
    InvalidRetention {
        /// Description of which invariant was violated.
        reason: String,
    },
    /// Engine configuration is invalid.
    InvalidEngineConfig {
        /// Description of which invariant was violated.
        reason: String,
    },
    /// Search configuration is invalid.
    InvalidSearchConfig {
        /// Description of which invariant was violated.
        reason: String,
    },
    /// Random soup parameters are invalid.
    InvalidSoup {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { value } => {
                write!(f, "dimension count {value} is zero or too large")
            }
            Self::NegativeRadius { radius } => {
                write!(f, "radius must be a non-negative i32, got {radius}")
            }
            Self::NeighborhoodTooLarge { count, max } => match count {
                Some(n) => write!(f, "neighborhood has {n} offsets, limit is {max}"),
                None => write!(f, "neighborhood offset count overflows u64, limit is {max}"),
            },
            Self::ThresholdOutOfRange {
                value,
                max_neighbors,
            } => write!(
                f,
                "threshold {value} outside valid range [0, {max_neighbors}]"
            ),
            Self::InvalidRuleString { reason } => write!(f, "invalid rule string: {reason}"),
            Self::RuleNeighborhoodMismatch {
                rule_max,
                neighborhood_max,
            } => write!(
                f,
                "rule built for {rule_max} neighbors, neighborhood has {neighborhood_max}"
            ),
            Self::EmptySeed => write!(f, "seed has no alive cells"),
            Self::CoordinateArity { expected, found } => {
                write!(f, "coordinate has {found} components, expected {expected}")
            }
            Self::CoordinateOutOfRange { value } => {
                write!(f, "coordinate component {value} does not fit in i32")
            }
            Self::InvalidRetention { reason } => write!(f, "invalid retention policy: {reason}"),
            Self::InvalidEngineConfig { reason } => write!(f, "invalid engine config: {reason}"),
            Self::InvalidSearchConfig { reason } => write!(f, "invalid search config: {reason}"),
            Self::InvalidSoup { reason } => write!(f, "invalid soup: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Tape ordering violations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequencingError {
    /// An appended generation is not the next sequential index.
    OutOfOrder {
        /// The only index the tape would accept.
        expected: GenerationId,
        /// The index that was offered.
        found: GenerationId,
    },
    /// A seek targeted an index that has not been recorded.
    OutOfRange {
        /// The requested index.
        requested: GenerationId,
        /// Number of generations recorded so far.
        recorded: u64,
    },
    /// An appended generation has a different dimension count than the tape.
    DimensionMismatch {
        /// Dimension count of the tape.
        expected: usize,
        /// Dimension count of the offered state.
        found: usize,
    },
}

impl fmt::Display for SequencingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { expected, found } => {
                write!(f, "expected generation {expected}, got {found}")
            }
            Self::OutOfRange {
                requested,
                recorded,
            } => write!(
                f,
                "generation {requested} not recorded ({recorded} generations on tape)"
            ),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "tape is {expected}-dimensional, generation is {found}-dimensional")
            }
        }
    }
}

impl Error for SequencingError {}

/// A caller-supplied resource cap was exceeded.
///
/// The engine never truncates state to stay under a cap; the caller
/// decides whether to abort, checkpoint, or widen the cap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceError {
    /// The step candidate set (alive cells plus halo) grew past the cap.
    CandidateLimitExceeded {
        /// The configured cap.
        limit: usize,
    },
    /// The next generation has more alive cells than allowed.
    PopulationLimitExceeded {
        /// The configured cap.
        limit: usize,
        /// Alive cells in the rejected generation.
        population: usize,
    },
    /// Retaining another generation would exceed the tape's cell budget.
    TapeMemoryExceeded {
        /// The configured budget, in alive cells.
        limit: usize,
        /// Cells that would be retained after the append.
        required: usize,
    },
    /// The search's seen-state map reached its capacity.
    SeenStatesExceeded {
        /// The configured capacity.
        limit: usize,
    },
    /// A neighbor coordinate fell outside the `i32` range.
    CoordinateOverflow {
        /// The axis that overflowed.
        axis: usize,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CandidateLimitExceeded { limit } => {
                write!(f, "candidate set exceeds limit of {limit} cells")
            }
            Self::PopulationLimitExceeded { limit, population } => {
                write!(f, "population {population} exceeds limit of {limit}")
            }
            Self::TapeMemoryExceeded { limit, required } => {
                write!(f, "tape would retain {required} cells, budget is {limit}")
            }
            Self::SeenStatesExceeded { limit } => {
                write!(f, "seen-state map reached capacity of {limit}")
            }
            Self::CoordinateOverflow { axis } => {
                write!(f, "coordinate overflow on axis {axis}")
            }
        }
    }
}

impl Error for ResourceError {}

/// Errors from advancing a state by one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The state's dimension count does not match the engine's neighborhood.
    DimensionMismatch {
        /// Dimension count of the neighborhood.
        expected: usize,
        /// Dimension count of the state.
        found: usize,
    },
    /// A resource cap tripped during the step.
    Resource(ResourceError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "engine is {expected}-dimensional, state is {found}-dimensional"
            ),
            Self::Resource(e) => write!(f, "resource exceeded: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for StepError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_chains_resource_source() {
        let err = StepError::from(ResourceError::CandidateLimitExceeded { limit: 10 });
        assert!(err.source().is_some());
        assert!(err.to_string().contains("limit of 10"));
    }

    #[test]
    fn sequencing_error_display_names_indices() {
        let err = SequencingError::OutOfOrder {
            expected: GenerationId(3),
            found: GenerationId(5),
        };
        assert_eq!(err.to_string(), "expected generation 3, got 5");
    }

    #[test]
    fn neighborhood_overflow_display() {
        let err = ConfigError::NeighborhoodTooLarge {
            count: None,
            max: 1 << 20,
        };
        assert!(err.to_string().contains("overflows"));
    }
}
