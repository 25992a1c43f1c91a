//! Simulation engine for ndlife lattices.
//!
//! [`SimulationEngine`] owns a validated [`NeighborhoodModel`] and
//! [`RuleSet`] and advances immutable [`SparseState`]s one generation at a
//! time. Each step is pure: the same input always yields the same output,
//! whether candidates are evaluated sequentially or on the rayon pool.
//!
//! [`SimulationDescription`] is the plain-data input record that callers
//! fill from their own front end; [`build`](SimulationDescription::build)
//! validates it into a ready [`Simulation`].
//!
//! [`NeighborhoodModel`]: ndlife_space::NeighborhoodModel
//! [`RuleSet`]: ndlife_rule::RuleSet
//! [`SparseState`]: ndlife_space::SparseState

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod description;
pub mod engine;
pub mod generation;
pub mod metrics;

pub use config::EngineConfig;
pub use description::{Simulation, SimulationDescription};
pub use engine::{RunStop, RunSummary, SimulationEngine};
pub use generation::Generation;
pub use metrics::StepMetrics;
