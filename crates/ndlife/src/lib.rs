//! ndlife: Conway's Game of Life generalized to any number of dimensions.
//!
//! This is the facade crate that re-exports the public API of every ndlife
//! sub-crate. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use ndlife::prelude::*;
//!
//! // Classic Life: 2-D, radius-1 Moore, B3/S23.
//! let description = SimulationDescription {
//!     dimensions: 2,
//!     radius: 1,
//!     neighborhood_shape: NeighborhoodShape::Moore,
//!     birth_thresholds: vec![3],
//!     survival_thresholds: vec![2, 3],
//!     seed_cells: vec![vec![1, 0], vec![2, 1], vec![0, 2], vec![1, 2], vec![2, 2]],
//! };
//! let Simulation { engine, seed } = description.build().unwrap();
//!
//! // Record 8 generations and replay them from the tape.
//! let mut tape = Tape::new(engine.clone(), RetentionPolicy::Full).unwrap();
//! record(&mut tape, seed.clone(), 8, &CancelToken::new()).unwrap();
//! assert_eq!(tape.len(), 9);
//! verify_replay(&tape).unwrap();
//!
//! // The glider is a spaceship.
//! let result = classify(
//!     &seed,
//!     engine.rules(),
//!     engine.model(),
//!     20,
//!     CanonicalizationMode::TranslationNormalized,
//! )
//! .unwrap();
//! assert!(result.is_spaceship());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ndlife-core` | Coordinates, generation IDs, cancellation, errors |
//! | [`space`] | `ndlife-space` | Neighborhoods, sparse states, hashing, soups |
//! | [`rule`] | `ndlife-rule` | Birth/survival rule sets and rule notation |
//! | [`engine`] | `ndlife-engine` | Step function, run loop, simulation descriptions |
//! | [`tape`] | `ndlife-tape` | Replayable history and binary export |
//! | [`search`] | `ndlife-search` | Still life, oscillator and spaceship detection |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`ndlife-core`).
pub use ndlife_core as types;

/// Neighborhoods and sparse lattice states (`ndlife-space`).
///
/// [`space::NeighborhoodModel`] caches the offset table for a dimension
/// count, radius and shape; [`space::SparseState`] is an immutable set of
/// alive cells with raw and translation-invariant hashes.
pub use ndlife_space as space;

/// Birth/survival rule sets (`ndlife-rule`).
pub use ndlife_rule as rule;

/// The simulation engine (`ndlife-engine`).
///
/// [`engine::SimulationEngine::step`] advances one generation and
/// [`engine::SimulationEngine::run`] drives a lineage under a cancel token.
pub use ndlife_engine as engine;

/// Generation history (`ndlife-tape`).
///
/// Record runs into a [`tape::Tape`], seek and replay them, and move them
/// in and out of the binary format with [`tape::export`] and
/// [`tape::import`].
pub use ndlife_tape as tape;

/// Structural classification (`ndlife-search`).
pub use ndlife_search as search;

/// Common imports for typical ndlife usage.
///
/// ```rust
/// use ndlife::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ndlife_core::{CancelToken, Coord, GenerationId};

    // Errors
    pub use ndlife_core::{ConfigError, ResourceError, SequencingError, StepError};
    pub use ndlife_search::SearchError;
    pub use ndlife_tape::TapeError;

    // Space and rules
    pub use ndlife_rule::RuleSet;
    pub use ndlife_space::{random_soup, NeighborhoodModel, NeighborhoodShape, SparseState};

    // Engine
    pub use ndlife_engine::{
        EngineConfig, Generation, Simulation, SimulationDescription, SimulationEngine,
        StepMetrics,
    };

    // Tape
    pub use ndlife_tape::{
        export, import, import_with_config, record, verify_replay, RetentionPolicy, Tape,
    };

    // Search
    pub use ndlife_search::{
        classify, CanonicalizationMode, SearchConfig, SearchResult, StructureSearch,
    };
}
