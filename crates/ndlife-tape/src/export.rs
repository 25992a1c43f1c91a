//! Whole-tape transfer through the binary format.

use std::io::{Read, Write};

use ndlife_core::GenerationId;
use ndlife_engine::{EngineConfig, Generation};
use ndlife_space::SparseState;
use tracing::debug;

use crate::error::TapeError;
use crate::reader::TapeReader;
use crate::retention::RetentionPolicy;
use crate::tape::Tape;
use crate::writer::TapeWriter;

/// Write every generation on `tape` to `writer`.
///
/// Unretained generations are replayed on the way out, so the stream
/// always holds the full lineage. Returns the number of frames written.
pub fn export<W: Write>(tape: &Tape, writer: W) -> Result<u64, TapeError> {
    let mut out = TapeWriter::new(writer, &tape.header())?;
    for generation in tape.playback() {
        let generation = generation?;
        out.write_generation(generation.index.0, &generation.state)?;
    }
    out.flush()?;
    debug!(frames = out.frames_written(), "tape exported");
    Ok(out.frames_written())
}

/// Rebuild a tape from a stream written by [`export`], with the default
/// [`EngineConfig`].
///
/// The header goes through the normal engine constructors, each frame's
/// cells must hash to the frame's recorded hash, and frames must be in
/// sequence.
pub fn import<R: Read>(reader: R, retention: RetentionPolicy) -> Result<Tape, TapeError> {
    import_with_config(reader, retention, EngineConfig::default())
}

/// [`import`] with explicit engine caps.
///
/// Caps are not part of the stream. A tape recorded under widened caps
/// needs the same caps here to rebuild unretained generations.
pub fn import_with_config<R: Read>(
    reader: R,
    retention: RetentionPolicy,
    config: EngineConfig,
) -> Result<Tape, TapeError> {
    let reader = TapeReader::open(reader)?;
    let engine = reader.header().build_engine(config)?;
    let dims = engine.dims();
    let mut tape = Tape::new(engine, retention)?;

    for frame in reader.frames() {
        let frame = frame?;
        let state = SparseState::new(dims, frame.cells)?;
        if state.raw_hash() != frame.raw_hash {
            return Err(TapeError::HashMismatch {
                index: GenerationId(frame.index),
                recorded: frame.raw_hash,
                computed: state.raw_hash(),
            });
        }
        tape.append(Generation::new(frame.index, state))?;
    }
    debug!(generations = tape.len(), "tape imported");
    Ok(tape)
}
