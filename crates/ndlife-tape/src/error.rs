//! Error types for tape recording, playback, and transfer.

use std::fmt;
use std::io;

use ndlife_core::{ConfigError, GenerationId, ResourceError, SequencingError, StepError};

/// Errors from building, reading, writing, or replaying a tape.
#[derive(Debug)]
pub enum TapeError {
    /// Tape construction or an imported header failed validation.
    Config(ConfigError),
    /// An append or seek violated tape ordering.
    Sequencing(SequencingError),
    /// The engine failed while reconstructing a generation.
    Step(StepError),
    /// Retaining a generation would exceed the tape's cell budget.
    Resource(ResourceError),
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with `b"NDLF"`.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// The stream is truncated or structurally corrupt.
    Malformed {
        /// What went wrong.
        detail: String,
    },
    /// An imported frame's cells do not hash to its recorded hash.
    HashMismatch {
        /// Index of the frame.
        index: GenerationId,
        /// Hash stored in the frame.
        recorded: u64,
        /// Hash of the decoded cells.
        computed: u64,
    },
    /// Replaying the engine produced a different generation than recorded.
    ReplayDivergence {
        /// First generation that diverged.
        index: GenerationId,
        /// Hash on the tape.
        recorded: u64,
        /// Hash produced by replay.
        replayed: u64,
    },
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Sequencing(e) => write!(f, "sequencing: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
            Self::Resource(e) => write!(f, "resource: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"NDLF\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed tape: {detail}"),
            Self::HashMismatch {
                index,
                recorded,
                computed,
            } => write!(
                f,
                "frame {index} hash mismatch: recorded={recorded:#018x}, computed={computed:#018x}"
            ),
            Self::ReplayDivergence {
                index,
                recorded,
                replayed,
            } => write!(
                f,
                "replay diverged at generation {index}: \
                 recorded={recorded:#018x}, replayed={replayed:#018x}"
            ),
        }
    }
}

impl std::error::Error for TapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Sequencing(e) => Some(e),
            Self::Step(e) => Some(e),
            Self::Resource(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for TapeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SequencingError> for TapeError {
    fn from(e: SequencingError) -> Self {
        Self::Sequencing(e)
    }
}

impl From<StepError> for TapeError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

impl From<ResourceError> for TapeError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

impl From<io::Error> for TapeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
