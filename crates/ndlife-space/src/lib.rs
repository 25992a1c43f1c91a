//! Lattice geometry for ndlife simulations.
//!
//! This crate defines the two structures every other subsystem reads:
//!
//! - [`NeighborhoodModel`]: the cached set of relative offsets that make up
//!   a cell's neighborhood for a given dimension count, radius, and
//!   [`NeighborhoodShape`].
//! - [`SparseState`]: an immutable snapshot of the alive cells on an
//!   unbounded lattice, with precomputed raw and translation-invariant
//!   content hashes.
//!
//! [`soup::random_soup`] builds reproducible random seeds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod hash;
pub mod neighborhood;
pub mod soup;
pub mod state;

pub use neighborhood::{NeighborhoodDescriptor, NeighborhoodModel, NeighborhoodShape};
pub use soup::random_soup;
pub use state::SparseState;
