//! Test fixtures for ndlife development.
//!
//! Well-known Life patterns as [`SparseState`]s plus helpers that build the
//! classic 2-D Moore neighborhood and B3/S23 rule. Patterns are placed with
//! their bounding box at the origin.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod patterns;

use ndlife_core::Coord;
use ndlife_rule::RuleSet;
use ndlife_space::{NeighborhoodModel, NeighborhoodShape, SparseState};

pub use patterns::*;

/// Build a state from literal cells.
///
/// # Panics
///
/// Panics if any cell does not have `dims` components.
pub fn cells(dims: usize, cells: &[&[i32]]) -> SparseState {
    SparseState::new(dims, cells.iter().map(|c| Coord::from_slice(c)))
        .expect("fixture cells must match dims")
}

/// Radius-1 Moore neighborhood in `dims` dimensions.
pub fn moore(dims: usize) -> NeighborhoodModel {
    NeighborhoodModel::new(dims, 1, NeighborhoodShape::Moore).expect("small Moore neighborhood")
}

/// Radius-1 von Neumann neighborhood in `dims` dimensions.
pub fn von_neumann(dims: usize) -> NeighborhoodModel {
    NeighborhoodModel::new(dims, 1, NeighborhoodShape::VonNeumann)
        .expect("small von Neumann neighborhood")
}

/// Conway's B3/S23 over the 8-cell Moore neighborhood.
pub fn life_rules() -> RuleSet {
    RuleSet::new([3], [2, 3], 8).expect("B3/S23 fits 8 neighbors")
}

/// The proportional rule for the radius-1 Moore neighborhood in `dims`
/// dimensions.
pub fn proportional_rules(dims: usize) -> RuleSet {
    RuleSet::proportional(moore(dims).max_neighbors()).expect("small proportional rule")
}
