//! Classic 2-D Life patterns, `(x, y)` with `y` growing downward.

use ndlife_space::SparseState;

use crate::cells;

/// 2x2 still life.
pub fn block() -> SparseState {
    cells(2, &[&[0, 0], &[1, 0], &[0, 1], &[1, 1]])
}

/// 6-cell still life.
pub fn beehive() -> SparseState {
    cells(2, &[&[1, 0], &[2, 0], &[0, 1], &[3, 1], &[1, 2], &[2, 2]])
}

/// Period-2 oscillator, horizontal phase.
pub fn blinker() -> SparseState {
    cells(2, &[&[0, 1], &[1, 1], &[2, 1]])
}

/// Period-2 oscillator.
pub fn toad() -> SparseState {
    cells(2, &[&[1, 0], &[2, 0], &[3, 0], &[0, 1], &[1, 1], &[2, 1]])
}

/// Period-4 spaceship travelling `(+1, +1)` per period.
pub fn glider() -> SparseState {
    cells(2, &[&[1, 0], &[2, 1], &[0, 2], &[1, 2], &[2, 2]])
}

/// A lone cell; dies in one step under B3/S23.
pub fn single_cell(dims: usize) -> SparseState {
    let origin = vec![0; dims];
    cells(dims, &[&origin])
}

/// A pentomino that evolves for over a thousand generations before
/// settling.
pub fn r_pentomino() -> SparseState {
    cells(2, &[&[1, 0], &[2, 0], &[0, 1], &[1, 1], &[1, 2]])
}
