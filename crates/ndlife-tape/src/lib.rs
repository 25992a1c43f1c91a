//! Generation history for ndlife simulations.
//!
//! A [`Tape`] is the ordered, append-only record of a lineage. Depending
//! on its [`RetentionPolicy`] it keeps every generation or only periodic
//! checkpoints plus a recent window, reconstructing the rest on demand by
//! replaying the engine from the nearest checkpoint.
//!
//! # Architecture
//!
//! - [`Tape`] stores generations and serves `seek` / `playback`
//! - [`record`] drives an engine into a tape until done or interrupted
//! - [`TapeWriter`] / [`TapeReader`] stream the binary format
//! - [`export`] / [`import`] move a whole tape through that format
//! - [`verify_replay`] re-steps the lineage and checks every hash
//!
//! # Format
//!
//! ```text
//! [MAGIC "NDLF"] [VERSION u8]
//! [dims u32] [radius u32] [shape u8] [birth: u32 count + u32*] [survival: u32 count + u32*]
//! [Frame 0] [Frame 1] ... [Frame N]
//! Frame = [index u64] [raw_hash u64] [cell_count u64] [cells: i32 * dims * cell_count]
//! ```
//!
//! All integers are little-endian.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod export;
pub mod reader;
pub mod record;
pub mod retention;
pub mod tape;
pub mod types;
pub mod writer;

pub use compare::verify_replay;
pub use error::TapeError;
pub use export::{export, import, import_with_config};
pub use reader::{FrameIter, TapeReader};
pub use record::{record, RecordSummary, StopReason};
pub use retention::RetentionPolicy;
pub use tape::{Playback, Tape};
pub use types::{Frame, TapeHeader};
pub use writer::TapeWriter;

/// Magic bytes at the start of every exported tape.
pub const MAGIC: [u8; 4] = *b"NDLF";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
