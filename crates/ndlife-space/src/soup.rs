//! Reproducible random seed patterns ("soups").

use ndlife_core::{ConfigError, Coord};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::state::SparseState;

/// Largest box a soup may fill, in cells.
pub const MAX_SOUP_CELLS: u64 = 1 << 24;

/// Fill the box `[0, extent)^dims` at random, each cell alive with
/// probability `density`.
///
/// The same `(dims, extent, density, seed)` always yields the same state.
///
/// # Errors
///
/// Returns `Err(ConfigError::InvalidDimensions)` if `dims == 0` and
/// `Err(ConfigError::InvalidSoup)` if `density` is not in `[0, 1]` or the
/// box holds more than [`MAX_SOUP_CELLS`] cells.
pub fn random_soup(
    dims: usize,
    extent: u32,
    density: f64,
    seed: u64,
) -> Result<SparseState, ConfigError> {
    if dims == 0 {
        return Err(ConfigError::InvalidDimensions { value: 0 });
    }
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::InvalidSoup {
            reason: format!("density must be in [0.0, 1.0], got {density}"),
        });
    }
    if extent > i32::MAX as u32 {
        return Err(ConfigError::InvalidSoup {
            reason: format!("extent {extent} exceeds i32::MAX"),
        });
    }
    let volume = u32::try_from(dims)
        .ok()
        .and_then(|d| (extent as u64).checked_pow(d));
    match volume {
        Some(v) if v <= MAX_SOUP_CELLS => {}
        _ => {
            return Err(ConfigError::InvalidSoup {
                reason: format!("{extent}^{dims} cells exceeds limit of {MAX_SOUP_CELLS}"),
            })
        }
    }

    if extent == 0 {
        return Ok(SparseState::empty(dims));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells = Vec::new();

    // Odometer over the box, last axis fastest.
    let mut cursor: Coord = SmallVec::from_elem(0, dims);
    let last = extent as i32 - 1;
    'fill: loop {
        if rng.random::<f64>() < density {
            cells.push(cursor.clone());
        }
        for axis in (0..dims).rev() {
            if cursor[axis] < last {
                cursor[axis] += 1;
                continue 'fill;
            }
            cursor[axis] = 0;
        }
        break;
    }

    Ok(SparseState::from_cells_unchecked(dims, cells))
}
