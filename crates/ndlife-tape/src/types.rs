//! Data types for the binary tape format.

use ndlife_core::{ConfigError, Coord};
use ndlife_engine::{EngineConfig, SimulationEngine};
use ndlife_rule::RuleSet;
use ndlife_space::NeighborhoodDescriptor;

/// Everything needed to rebuild the engine that produced a tape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TapeHeader {
    /// Dimension count, radius, and shape of the neighborhood.
    pub neighborhood: NeighborhoodDescriptor,
    /// Birth thresholds, ascending.
    pub birth: Vec<u32>,
    /// Survival thresholds, ascending.
    pub survival: Vec<u32>,
}

impl TapeHeader {
    /// Describe `engine`'s neighborhood and rule.
    pub fn describe(engine: &SimulationEngine) -> Self {
        let to_u32 = |v: Vec<usize>| v.into_iter().map(|n| n as u32).collect();
        Self {
            neighborhood: engine.model().descriptor(),
            birth: to_u32(engine.rules().birth()),
            survival: to_u32(engine.rules().survival()),
        }
    }

    /// Rebuild and validate the engine this header describes.
    pub fn build_engine(&self, config: EngineConfig) -> Result<SimulationEngine, ConfigError> {
        let model = self.neighborhood.build()?;
        let rules = RuleSet::for_neighborhood(
            self.birth.iter().map(|&n| i64::from(n)),
            self.survival.iter().map(|&n| i64::from(n)),
            &model,
        )?;
        SimulationEngine::new(model, rules, config)
    }
}

/// One decoded generation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Generation index.
    pub index: u64,
    /// [`raw_hash`](ndlife_space::SparseState::raw_hash) of the generation.
    pub raw_hash: u64,
    /// Alive cells, in the order they were written.
    pub cells: Vec<Coord>,
}
