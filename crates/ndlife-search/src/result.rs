//! Classification outcomes.

use std::fmt;

use ndlife_core::{Coord, GenerationId};

/// How states are compared when looking for a repeat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanonicalizationMode {
    /// States repeat only if their alive sets are identical.
    #[default]
    Raw,
    /// States repeat if one is a translate of the other, so moving
    /// patterns are detected as periodic with a displacement.
    TranslationNormalized,
}

/// What a search concluded about a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// The state did not change across one step.
    Stable {
        /// Index at which the repeat was detected.
        generation: GenerationId,
    },
    /// A state recurred `period` steps after it first appeared.
    Periodic {
        /// Steps per cycle.
        period: u64,
        /// Net translation per cycle; all zeros for oscillators and
        /// always all zeros in [`CanonicalizationMode::Raw`].
        displacement: Coord,
        /// First index of the cycle.
        onset: GenerationId,
    },
    /// The alive set became empty.
    Extinct {
        /// First empty generation.
        generation: GenerationId,
    },
    /// No conclusion within the budget, or the search was cancelled or
    /// ran out of seen-state capacity.
    Unclassified {
        /// Steps executed before stopping.
        iterations_run: u64,
    },
}

impl SearchResult {
    /// Whether the pattern moves: periodic with a nonzero displacement.
    pub fn is_spaceship(&self) -> bool {
        matches!(self, Self::Periodic { displacement, .. } if displacement.iter().any(|&d| d != 0))
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable { generation } => write!(f, "stable at generation {generation}"),
            Self::Periodic {
                period,
                displacement,
                onset,
            } => {
                write!(f, "period {period} from generation {onset}")?;
                if displacement.iter().any(|&d| d != 0) {
                    write!(f, ", moving {:?}", displacement.as_slice())?;
                }
                Ok(())
            }
            Self::Extinct { generation } => write!(f, "extinct at generation {generation}"),
            Self::Unclassified { iterations_run } => {
                write!(f, "unclassified after {iterations_run} steps")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn display_mentions_motion_only_for_spaceships() {
        let blinker = SearchResult::Periodic {
            period: 2,
            displacement: smallvec![0, 0],
            onset: GenerationId(0),
        };
        let glider = SearchResult::Periodic {
            period: 4,
            displacement: smallvec![1, 1],
            onset: GenerationId(0),
        };
        assert_eq!(blinker.to_string(), "period 2 from generation 0");
        assert_eq!(glider.to_string(), "period 4 from generation 0, moving [1, 1]");
        assert!(!blinker.is_spaceship());
        assert!(glider.is_spaceship());
    }
}
