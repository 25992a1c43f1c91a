//! Which generations a tape keeps in memory.

use ndlife_core::ConfigError;

/// How much history a [`Tape`](crate::Tape) keeps materialized.
///
/// Generations that are not retained are rebuilt on demand by replaying
/// the engine from the nearest retained one. Generation 0 is always
/// retained, so every index stays reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Keep every generation.
    #[default]
    Full,
    /// Keep the last `recent` generations plus every generation whose
    /// index is a multiple of `interval`.
    Checkpointed {
        /// Size of the trailing window. At least 1.
        recent: u64,
        /// Checkpoint spacing. At least 1.
        interval: u64,
    },
}

impl RetentionPolicy {
    /// Check that both window and spacing are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Self::Checkpointed { recent, interval } = *self {
            if recent == 0 {
                return Err(ConfigError::InvalidRetention {
                    reason: "recent window must be at least 1".to_string(),
                });
            }
            if interval == 0 {
                return Err(ConfigError::InvalidRetention {
                    reason: "checkpoint interval must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether `index` is a permanent checkpoint.
    pub fn is_checkpoint(&self, index: u64) -> bool {
        match *self {
            Self::Full => true,
            Self::Checkpointed { interval, .. } => index % interval == 0,
        }
    }

    /// The generation that leaves the recent window when `latest` is
    /// appended and must be dropped, if any.
    pub(crate) fn evicted_by(&self, latest: u64) -> Option<u64> {
        match *self {
            Self::Full => None,
            Self::Checkpointed { recent, .. } => latest
                .checked_sub(recent)
                .filter(|&old| !self.is_checkpoint(old)),
        }
    }
}
