//! Binary encode/decode for the tape format.
//!
//! All integers are little-endian. Threshold lists are prefixed with a
//! `u32` count and frames with a `u64` cell count. There is no
//! compression and no padding.

use std::io::{ErrorKind, Read, Write};

use ndlife_core::Coord;
use ndlife_space::{NeighborhoodDescriptor, NeighborhoodShape, SparseState};

use crate::error::TapeError;
use crate::types::{Frame, TapeHeader};
use crate::{FORMAT_VERSION, MAGIC};

/// Upper bound on speculative preallocation while decoding.
const PREALLOC_LIMIT: usize = 1 << 16;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), TapeError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), TapeError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), TapeError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), TapeError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, TapeError> {
    let mut buf = [0u8; 1];
    read_exact(r, &mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, TapeError> {
    let mut buf = [0u8; 4];
    read_exact(r, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, TapeError> {
    let mut buf = [0u8; 8];
    read_exact(r, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, TapeError> {
    let mut buf = [0u8; 4];
    read_exact(r, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// `read_exact` that reports a short read as a malformed stream.
fn read_exact(r: &mut dyn Read, buf: &mut [u8]) -> Result<(), TapeError> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => TapeError::Malformed {
            detail: format!("unexpected end of stream reading {} bytes", buf.len()),
        },
        _ => TapeError::Io(e),
    })
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the stream header (magic, version, neighborhood, rule).
pub fn encode_header(w: &mut dyn Write, header: &TapeHeader) -> Result<(), TapeError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    let n = &header.neighborhood;
    write_u32_le(w, len_u32(n.dims, "dimension count")?)?;
    write_u32_le(w, n.radius)?;
    write_u8(w, n.shape.tag())?;
    write_thresholds(w, &header.birth)?;
    write_thresholds(w, &header.survival)?;
    Ok(())
}

fn write_thresholds(w: &mut dyn Write, values: &[u32]) -> Result<(), TapeError> {
    write_u32_le(w, len_u32(values.len(), "threshold count")?)?;
    for &v in values {
        write_u32_le(w, v)?;
    }
    Ok(())
}

fn len_u32(n: usize, what: &str) -> Result<u32, TapeError> {
    u32::try_from(n).map_err(|_| TapeError::Malformed {
        detail: format!("{what} {n} does not fit in u32"),
    })
}

/// Decode and structurally check the stream header.
///
/// Only the encoding is checked here; whether the neighborhood and rule
/// are valid is up to [`TapeHeader::build_engine`].
pub fn decode_header(r: &mut dyn Read) -> Result<TapeHeader, TapeError> {
    let mut magic = [0u8; 4];
    read_exact(r, &mut magic)?;
    if magic != MAGIC {
        return Err(TapeError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(TapeError::UnsupportedVersion { found: version });
    }

    let dims = read_u32_le(r)? as usize;
    let radius = read_u32_le(r)?;
    let tag = read_u8(r)?;
    let shape = NeighborhoodShape::from_tag(tag).ok_or_else(|| TapeError::Malformed {
        detail: format!("unknown neighborhood shape tag {tag}"),
    })?;
    let birth = read_thresholds(r)?;
    let survival = read_thresholds(r)?;

    Ok(TapeHeader {
        neighborhood: NeighborhoodDescriptor {
            dims,
            radius,
            shape,
        },
        birth,
        survival,
    })
}

fn read_thresholds(r: &mut dyn Read) -> Result<Vec<u32>, TapeError> {
    let count = read_u32_le(r)? as usize;
    let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        values.push(read_u32_le(r)?);
    }
    Ok(values)
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode one generation as a frame.
pub fn encode_frame(w: &mut dyn Write, index: u64, state: &SparseState) -> Result<(), TapeError> {
    write_u64_le(w, index)?;
    write_u64_le(w, state.raw_hash())?;
    write_u64_le(w, state.len() as u64)?;
    for cell in state {
        for &v in cell {
            write_i32_le(w, v)?;
        }
    }
    Ok(())
}

/// Decode one frame of `dims`-dimensional cells.
///
/// Returns `Ok(None)` on clean EOF (no bytes before the next frame) and
/// `Err(TapeError::Malformed)` if the stream ends mid-frame.
pub fn decode_frame(r: &mut dyn Read, dims: usize) -> Result<Option<Frame>, TapeError> {
    // Read the index byte-by-byte to tell clean EOF from truncation.
    let mut index_buf = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        match r.read(&mut index_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(TapeError::Malformed {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for index"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TapeError::Io(e)),
        }
    }
    let index = u64::from_le_bytes(index_buf);
    let raw_hash = read_u64_le(r)?;
    let cell_count = usize::try_from(read_u64_le(r)?).map_err(|_| TapeError::Malformed {
        detail: format!("frame {index} cell count does not fit in memory"),
    })?;

    let mut cells = Vec::with_capacity(cell_count.min(PREALLOC_LIMIT));
    for _ in 0..cell_count {
        let mut cell = Coord::with_capacity(dims.min(PREALLOC_LIMIT));
        for _ in 0..dims {
            cell.push(read_i32_le(r)?);
        }
        cells.push(cell);
    }

    Ok(Some(Frame {
        index,
        raw_hash,
        cells,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndlife_test_utils::{cells, glider};

    fn header() -> TapeHeader {
        TapeHeader {
            neighborhood: NeighborhoodDescriptor {
                dims: 2,
                radius: 1,
                shape: NeighborhoodShape::Moore,
            },
            birth: vec![3],
            survival: vec![2, 3],
        }
    }

    #[test]
    fn header_roundtrip() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        assert_eq!(&buf[..4], b"NDLF");
        assert_eq!(buf[4], FORMAT_VERSION);
        assert_eq!(decode_header(&mut buf.as_slice()).unwrap(), header());
    }

    #[test]
    fn header_layout_is_little_endian() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        // magic(4) version(1) dims(4) radius(4) shape(1)
        assert_eq!(&buf[5..9], &[2, 0, 0, 0]);
        assert_eq!(&buf[9..13], &[1, 0, 0, 0]);
        assert_eq!(buf[13], 0);
        // birth: count 1, value 3
        assert_eq!(&buf[14..22], &[1, 0, 0, 0, 3, 0, 0, 0]);
        assert_eq!(buf.len(), 14 + 8 + 12);
    }

    #[test]
    fn frame_roundtrip_preserves_cells_and_hash() {
        let g = glider();
        let mut buf = Vec::new();
        encode_frame(&mut buf, 7, &g).unwrap();
        assert_eq!(buf.len(), 24 + g.len() * 2 * 4);

        let mut r = buf.as_slice();
        let frame = decode_frame(&mut r, 2).unwrap().unwrap();
        assert_eq!(frame.index, 7);
        assert_eq!(frame.raw_hash, g.raw_hash());
        assert_eq!(SparseState::new(2, frame.cells).unwrap(), g);
        assert!(decode_frame(&mut r, 2).unwrap().is_none());
    }

    #[test]
    fn empty_frame_roundtrip() {
        let mut buf = Vec::new();
        encode_frame(&mut buf, 0, &SparseState::empty(3)).unwrap();
        let frame = decode_frame(&mut buf.as_slice(), 3).unwrap().unwrap();
        assert!(frame.cells.is_empty());
    }

    #[test]
    fn truncated_frame_is_malformed() {
        let mut buf = Vec::new();
        encode_frame(&mut buf, 1, &cells(2, &[&[0, 0], &[5, 5]])).unwrap();
        for cut in [3, 12, buf.len() - 2] {
            let short = &buf[..cut];
            match decode_frame(&mut &short[..], 2) {
                Err(TapeError::Malformed { .. }) => {}
                other => panic!("cut at {cut}: expected Malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn bad_magic_rejected() {
        let data = b"NOPE\x01";
        assert!(matches!(
            decode_header(&mut data.as_slice()),
            Err(TapeError::InvalidMagic)
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        buf[4] = FORMAT_VERSION + 1;
        match decode_header(&mut buf.as_slice()) {
            Err(TapeError::UnsupportedVersion { found }) => assert_eq!(found, FORMAT_VERSION + 1),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn unknown_shape_tag_rejected() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        buf[13] = 9;
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(TapeError::Malformed { .. })
        ));
    }
}
