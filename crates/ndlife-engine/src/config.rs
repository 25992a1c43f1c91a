//! Engine configuration and validation.
//!
//! [`EngineConfig`] bounds the work a single step may do. The caps are
//! hard limits: a step that would exceed one fails with a
//! [`ResourceError`](ndlife_core::ResourceError) instead of truncating the
//! lattice.

use ndlife_core::ConfigError;

// ── EngineConfig ───────────────────────────────────────────────────

/// Per-step resource caps and parallelism tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum size of the candidate set (alive cells plus their
    /// neighbors) in one step. Default: 2^24.
    pub max_candidates: usize,
    /// Maximum alive cells in any produced generation. Default: 2^22.
    pub max_population: usize,
    /// Candidate-set size at which evaluation moves to the rayon pool.
    /// Default: 4096.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_candidates: 1 << 24,
            max_population: 1 << 22,
            parallel_threshold: 4096,
        }
    }
}

impl EngineConfig {
    /// A config that never switches to parallel evaluation.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 {
            return Err(ConfigError::InvalidEngineConfig {
                reason: "max_candidates must be at least 1".to_string(),
            });
        }
        if self.max_population == 0 {
            return Err(ConfigError::InvalidEngineConfig {
                reason: "max_population must be at least 1".to_string(),
            });
        }
        if self.parallel_threshold == 0 {
            return Err(ConfigError::InvalidEngineConfig {
                reason: "parallel_threshold must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::sequential().validate().is_ok());
    }

    #[test]
    fn zero_caps_rejected() {
        for cfg in [
            EngineConfig {
                max_candidates: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                max_population: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                parallel_threshold: 0,
                ..EngineConfig::default()
            },
        ] {
            match cfg.validate() {
                Err(ConfigError::InvalidEngineConfig { .. }) => {}
                other => panic!("expected InvalidEngineConfig, got {other:?}"),
            }
        }
    }
}
