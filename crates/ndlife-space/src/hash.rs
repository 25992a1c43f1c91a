//! FNV-1a hashing of lattice states.
//!
//! These hashes are deterministic across processes and platforms, which
//! lets tape files carry them for verification. They are not
//! cryptographically secure and are only ever used as a candidate
//! filter: equality of the underlying cell sets stays authoritative.

/// FNV-1a offset basis for 64-bit.
pub const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
pub fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed an i32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
pub fn fnv1a_i32(mut hash: u64, v: i32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
pub fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Running pair of hashes over an ordered cell list.
///
/// `raw` covers the exact coordinates; `canonical` covers the coordinates
/// after subtracting `origin` per axis. Both fold in the dimension count
/// and cell count first, so the empty state of each dimension hashes
/// differently.
pub(crate) struct CellHasher<'a> {
    origin: Option<&'a [i32]>,
    raw: u64,
    canonical: u64,
}

impl<'a> CellHasher<'a> {
    pub(crate) fn new(dims: usize, cell_count: usize, origin: Option<&'a [i32]>) -> Self {
        let mut seed = fnv1a_u64(FNV_OFFSET, dims as u64);
        seed = fnv1a_u64(seed, cell_count as u64);
        Self {
            origin,
            raw: seed,
            canonical: seed,
        }
    }

    pub(crate) fn feed(&mut self, cell: &[i32]) {
        for (axis, &v) in cell.iter().enumerate() {
            self.raw = fnv1a_i32(self.raw, v);
            let base = self.origin.map_or(0, |o| o[axis]);
            // Differences of in-range coordinates fit in i64; hash the
            // low and high halves so no information is lost.
            let rel = v as i64 - base as i64;
            self.canonical = fnv1a_u64(self.canonical, rel as u64);
        }
    }

    pub(crate) fn finish(self) -> (u64, u64) {
        (self.raw, self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_raw_equals_canonical() {
        let (raw, canon) = CellHasher::new(2, 0, None).finish();
        assert_eq!(raw, canon);
    }

    #[test]
    fn canonical_ignores_origin_shift() {
        let mut a = CellHasher::new(1, 2, Some(&[0]));
        a.feed(&[0]);
        a.feed(&[3]);
        let mut b = CellHasher::new(1, 2, Some(&[10]));
        b.feed(&[10]);
        b.feed(&[13]);
        let (raw_a, canon_a) = a.finish();
        let (raw_b, canon_b) = b.finish();
        assert_eq!(canon_a, canon_b);
        assert_ne!(raw_a, raw_b);
    }

    #[test]
    fn dimension_count_is_folded_in() {
        let (a, _) = CellHasher::new(2, 0, None).finish();
        let (b, _) = CellHasher::new(3, 0, None).finish();
        assert_ne!(a, b);
    }
}
