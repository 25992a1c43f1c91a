//! Streaming tape reader.
//!
//! [`TapeReader`] decodes frames from any `Read` source. The header is
//! decoded on construction.

use std::io::Read;

use crate::codec::{decode_frame, decode_header};
use crate::error::TapeError;
use crate::types::{Frame, TapeHeader};

/// Reads the binary tape format from a byte stream.
pub struct TapeReader<R: Read> {
    reader: R,
    header: TapeHeader,
    frames_read: u64,
}

impl<R: Read> TapeReader<R> {
    /// Open a stream, reading the magic, version, and header.
    pub fn open(mut reader: R) -> Result<Self, TapeError> {
        let header = decode_header(&mut reader)?;
        Ok(Self {
            reader,
            header,
            frames_read: 0,
        })
    }

    /// The decoded header.
    pub fn header(&self) -> &TapeHeader {
        &self.header
    }

    /// Read the next frame, or `None` at clean end of stream.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, TapeError> {
        let frame = decode_frame(&mut self.reader, self.header.neighborhood.dims)?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator adapter over tape frames. Fused after the first error.
pub struct FrameIter<R: Read> {
    reader: TapeReader<R>,
    done: bool,
}

impl<R: Read> FrameIter<R> {
    /// The stream header.
    pub fn header(&self) -> &TapeHeader {
        self.reader.header()
    }
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, TapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
