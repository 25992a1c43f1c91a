//! Search configuration.

use ndlife_core::{CancelToken, ConfigError};
use ndlife_engine::EngineConfig;

/// What to do when the seen-state map is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail with `ResourceError::SeenStatesExceeded`.
    Fail,
    /// Stop and report `SearchResult::Unclassified`.
    #[default]
    Unclassified,
    /// Forget the oldest state and continue. Cycles longer than the map
    /// capacity can then go undetected.
    EvictOldest,
}

/// Tuning for a [`StructureSearch`](crate::StructureSearch).
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Caps applied to every step.
    pub engine: EngineConfig,
    /// Maximum states remembered for repeat detection. Default: 65 536.
    pub max_seen_states: usize,
    /// Behavior when `max_seen_states` is reached.
    pub overflow: OverflowPolicy,
    /// Checked between steps; a tripped token ends the search as
    /// `Unclassified`.
    pub cancel: CancelToken,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            max_seen_states: 1 << 16,
            overflow: OverflowPolicy::default(),
            cancel: CancelToken::new(),
        }
    }
}

impl SearchConfig {
    /// Check structural invariants, including the engine caps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.max_seen_states == 0 {
            return Err(ConfigError::InvalidSearchConfig {
                reason: "max_seen_states must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
