//! Benchmark profiles for the ndlife engine.
//!
//! - [`reference_profile`]: 2-D Life on a 64x64 random soup
//! - [`dimension_profile`]: proportional rule on a Moore soup in any dimension
//! - [`stress_profile`]: 2-D Life on a 256x256 soup, large enough to take the parallel path

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ndlife_core::ConfigError;
use ndlife_engine::{EngineConfig, SimulationEngine};
use ndlife_rule::RuleSet;
use ndlife_space::{random_soup, NeighborhoodModel, NeighborhoodShape, SparseState};

/// An engine paired with the seed it is benchmarked on.
pub struct Profile {
    /// Engine under test.
    pub engine: SimulationEngine,
    /// Starting pattern.
    pub seed: SparseState,
}

/// B3/S23 on a 64x64 soup at 35% density.
pub fn reference_profile(seed: u64) -> Result<Profile, ConfigError> {
    life_profile(64, seed, EngineConfig::default())
}

/// B3/S23 on a 256x256 soup at 35% density.
///
/// The candidate set is well above the default parallel threshold.
pub fn stress_profile(seed: u64, config: EngineConfig) -> Result<Profile, ConfigError> {
    life_profile(256, seed, config)
}

/// Proportional rule over the radius-1 Moore neighborhood in `dims`
/// dimensions, seeded with a soup of side `extent`.
pub fn dimension_profile(dims: usize, extent: u32, seed: u64) -> Result<Profile, ConfigError> {
    let model = NeighborhoodModel::new(dims, 1, NeighborhoodShape::Moore)?;
    let rules = RuleSet::proportional(model.max_neighbors())?;
    let engine = SimulationEngine::new(model, rules, EngineConfig::default())?;
    Ok(Profile {
        engine,
        seed: random_soup(dims, extent, 0.3, seed)?,
    })
}

fn life_profile(extent: u32, seed: u64, config: EngineConfig) -> Result<Profile, ConfigError> {
    let model = NeighborhoodModel::new(2, 1, NeighborhoodShape::Moore)?;
    let rules = RuleSet::life(&model)?;
    Ok(Profile {
        engine: SimulationEngine::new(model, rules, config)?,
        seed: random_soup(2, extent, 0.35, seed)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_build_and_step() {
        let p = reference_profile(42).unwrap();
        assert!(!p.seed.is_empty());
        p.engine.step(&p.seed).unwrap();

        let p = dimension_profile(4, 5, 7).unwrap();
        assert_eq!(p.engine.dims(), 4);
        p.engine.step(&p.seed).unwrap();
    }

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(
            reference_profile(9).unwrap().seed,
            reference_profile(9).unwrap().seed
        );
    }
}
