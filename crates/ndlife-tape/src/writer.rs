//! Streaming tape writer.
//!
//! [`TapeWriter`] encodes generations to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use ndlife_space::SparseState;

use crate::codec::{encode_frame, encode_header};
use crate::error::TapeError;
use crate::types::TapeHeader;

/// Writes the binary tape format to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use ndlife_space::{NeighborhoodDescriptor, NeighborhoodShape, SparseState};
/// use ndlife_tape::{TapeHeader, TapeReader, TapeWriter};
///
/// let header = TapeHeader {
///     neighborhood: NeighborhoodDescriptor { dims: 1, radius: 1, shape: NeighborhoodShape::Moore },
///     birth: vec![1],
///     survival: vec![],
/// };
///
/// let mut buf = Vec::new();
/// let mut writer = TapeWriter::new(&mut buf, &header).unwrap();
/// writer.write_generation(0, &SparseState::empty(1)).unwrap();
/// assert_eq!(writer.frames_written(), 1);
/// drop(writer);
///
/// let mut reader = TapeReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// assert_eq!(reader.next_frame().unwrap().unwrap().index, 0);
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct TapeWriter<W: Write> {
    writer: W,
    dims: usize,
    frames_written: u64,
}

impl<W: Write> TapeWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(mut writer: W, header: &TapeHeader) -> Result<Self, TapeError> {
        encode_header(&mut writer, header)?;
        Ok(Self {
            writer,
            dims: header.neighborhood.dims,
            frames_written: 0,
        })
    }

    /// Append one generation as a frame.
    ///
    /// Fails with `TapeError::Malformed` if `state` does not have the
    /// header's dimension count; nothing is written in that case.
    pub fn write_generation(&mut self, index: u64, state: &SparseState) -> Result<(), TapeError> {
        if state.dims() != self.dims {
            return Err(TapeError::Malformed {
                detail: format!(
                    "generation {index} is {}-dimensional, header says {}",
                    state.dims(),
                    self.dims
                ),
            });
        }
        encode_frame(&mut self.writer, index, state)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), TapeError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
