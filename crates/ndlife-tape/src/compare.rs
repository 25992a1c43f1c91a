//! Replay verification.

use ndlife_engine::Generation;
use tracing::debug;

use crate::error::TapeError;
use crate::tape::Tape;

/// Re-step the whole lineage from the seed and compare every generation's
/// hash with the one recorded on the tape.
///
/// Also compares full cell sets wherever the tape retained the
/// generation. Returns `TapeError::ReplayDivergence` at the first
/// mismatch. An empty tape verifies trivially.
pub fn verify_replay(tape: &Tape) -> Result<(), TapeError> {
    let mut playback = tape.playback();
    let Some(seed) = playback.next().transpose()? else {
        return Ok(());
    };
    let engine = tape.engine();

    let mut replayed: Generation = seed;
    for recorded in playback {
        let recorded = recorded?;
        replayed = replayed.successor(engine.step(&replayed.state)?);
        tape.check_hash(&replayed)?;
        if replayed.state != recorded.state {
            return Err(TapeError::ReplayDivergence {
                index: replayed.index,
                recorded: recorded.state.raw_hash(),
                replayed: replayed.state.raw_hash(),
            });
        }
    }
    debug!(generations = tape.len(), "replay verified");
    Ok(())
}
