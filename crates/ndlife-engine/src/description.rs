//! Plain-data simulation input and its validation.

use ndlife_core::{ConfigError, Coord};
use ndlife_rule::RuleSet;
use ndlife_space::{NeighborhoodModel, NeighborhoodShape, SparseState};

use crate::config::EngineConfig;
use crate::engine::SimulationEngine;

/// Everything needed to start a simulation, as untrusted plain data.
///
/// Integer fields are wide and signed so that front ends can pass through
/// whatever the user typed; [`build`](Self::build) does all range checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationDescription {
    /// Dimension count D. Must be in `1..=NeighborhoodModel::MAX_DIMS`.
    pub dimensions: i64,
    /// Neighborhood radius. Must be non-negative.
    pub radius: i64,
    /// Neighborhood shape.
    pub neighborhood_shape: NeighborhoodShape,
    /// Neighbor counts at which a dead cell becomes alive.
    pub birth_thresholds: Vec<i64>,
    /// Neighbor counts at which an alive cell stays alive.
    pub survival_thresholds: Vec<i64>,
    /// Alive cells of the seed, each with exactly D components.
    pub seed_cells: Vec<Vec<i64>>,
}

/// A validated simulation: engine plus seed.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Engine built from the description's neighborhood and rule.
    pub engine: SimulationEngine,
    /// Generation 0.
    pub seed: SparseState,
}

impl SimulationDescription {
    /// Validate with the default [`EngineConfig`].
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        self.build_with_config(EngineConfig::default())
    }

    /// Validate into a ready [`Simulation`].
    ///
    /// # Errors
    ///
    /// `InvalidDimensions`, `NegativeRadius`, `NeighborhoodTooLarge`,
    /// `ThresholdOutOfRange`, `EmptySeed`, `CoordinateArity` or
    /// `CoordinateOutOfRange`, checked in that order.
    pub fn build_with_config(&self, config: EngineConfig) -> Result<Simulation, ConfigError> {
        let dims = usize::try_from(self.dimensions)
            .ok()
            .filter(|&d| d >= 1)
            .ok_or(ConfigError::InvalidDimensions {
                value: self.dimensions,
            })?;
        let radius = i32::try_from(self.radius)
            .ok()
            .filter(|&r| r >= 0)
            .ok_or(ConfigError::NegativeRadius {
                radius: self.radius,
            })?;
        let model = NeighborhoodModel::new(dims, radius, self.neighborhood_shape)?;
        let rules = RuleSet::for_neighborhood(
            self.birth_thresholds.iter().copied(),
            self.survival_thresholds.iter().copied(),
            &model,
        )?;

        if self.seed_cells.is_empty() {
            return Err(ConfigError::EmptySeed);
        }
        let cells = self
            .seed_cells
            .iter()
            .map(|cell| to_coord(cell, dims))
            .collect::<Result<Vec<_>, _>>()?;
        let seed = SparseState::new(dims, cells)?;

        let engine = SimulationEngine::new(model, rules, config)?;
        Ok(Simulation { engine, seed })
    }
}

fn to_coord(cell: &[i64], dims: usize) -> Result<Coord, ConfigError> {
    if cell.len() != dims {
        return Err(ConfigError::CoordinateArity {
            expected: dims,
            found: cell.len(),
        });
    }
    cell.iter()
        .map(|&v| i32::try_from(v).map_err(|_| ConfigError::CoordinateOutOfRange { value: v }))
        .collect()
}
