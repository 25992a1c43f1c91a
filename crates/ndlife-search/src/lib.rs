//! Structural classification of ndlife patterns.
//!
//! [`classify`] runs a seed forward and reports whether it dies out,
//! settles into a still life, or enters a cycle, optionally recognizing
//! cycles that come back translated (spaceships). Only hashes and a
//! bounded window of states are kept, never the full history.
//!
//! [`StructureSearch`] exposes the memory bound and cancellation, and
//! [`StructureSearch::classify_batch`] spreads independent searches over
//! a pool of worker threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod error;
pub mod result;
pub mod search;
mod seen;

pub use batch::SearchJob;
pub use config::{OverflowPolicy, SearchConfig};
pub use error::SearchError;
pub use result::{CanonicalizationMode, SearchResult};
pub use search::{classify, StructureSearch};
