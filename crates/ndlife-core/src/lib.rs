//! Core types for the ndlife N-dimensional cellular automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the coordinate type, generation identifiers, the cooperative
//! cancellation token, and the error types shared by every subsystem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod error;
pub mod id;

pub use cancel::CancelToken;
pub use error::{ConfigError, ResourceError, SequencingError, StepError};
pub use id::{Coord, GenerationId};
