//! Driving an engine into a tape.

use std::ops::ControlFlow;

use ndlife_core::{CancelToken, GenerationId, ResourceError, StepError};
use ndlife_engine::{Generation, RunStop};
use ndlife_space::SparseState;
use tracing::debug;

use crate::error::TapeError;
use crate::tape::Tape;

/// Why [`record`] stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// All requested steps were recorded.
    Completed,
    /// The cancel token tripped between steps.
    Cancelled,
    /// A generation had no alive cells; it is the last one on the tape.
    Extinct,
    /// A step or the tape's cell budget hit a resource cap. The tape holds
    /// everything recorded before the cap tripped.
    ResourceExceeded(ResourceError),
}

/// Outcome of [`record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSummary {
    /// Generations appended by this call, including the seed.
    pub recorded: u64,
    /// Index of the last generation on the tape, if any.
    pub last: Option<GenerationId>,
    /// Why recording ended.
    pub stop: StopReason,
}

/// Record `seed` and up to `max_steps` successors into an empty `tape`.
///
/// Cancellation, extinction and resource caps end the recording early
/// with a partially filled tape and the matching [`StopReason`]; they are
/// not errors.
///
/// # Errors
///
/// - `SequencingError::OutOfOrder` if `tape` already holds generations.
/// - `SequencingError::DimensionMismatch` / `StepError::DimensionMismatch`
///   if `seed` does not match the tape's engine.
pub fn record(
    tape: &mut Tape,
    seed: SparseState,
    max_steps: u64,
    cancel: &CancelToken,
) -> Result<RecordSummary, TapeError> {
    let engine = tape.engine().clone();
    let start_len = tape.len();
    let mut append_error = None;

    let run = engine.run(&seed, max_steps, cancel, |generation: &Generation| {
        match tape.append(generation.clone()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                append_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    let stop = match (run, append_error) {
        (_, Some(TapeError::Resource(e))) => StopReason::ResourceExceeded(e),
        (_, Some(e)) => return Err(e),
        (Err(StepError::Resource(e)), None) => StopReason::ResourceExceeded(e),
        (Err(e), None) => return Err(e.into()),
        (Ok(summary), None) => match summary.stop {
            RunStop::Completed | RunStop::Halted => StopReason::Completed,
            RunStop::Cancelled => StopReason::Cancelled,
            RunStop::Extinct => StopReason::Extinct,
        },
    };

    let summary = RecordSummary {
        recorded: tape.len() - start_len,
        last: tape.latest().map(|g| g.index),
        stop,
    };
    debug!(
        recorded = summary.recorded,
        retained = tape.retained_count(),
        stop = ?summary.stop,
        "recording finished"
    );
    Ok(summary)
}
