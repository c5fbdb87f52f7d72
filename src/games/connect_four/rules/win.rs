//! Win detection for Connect Four.

use super::super::types::{Board, Cell, Color, WIN_COUNT};
use tracing::instrument;

/// The four axis families, each as one unit step; the opposite
/// direction is the negation.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal /
    (1, -1), // diagonal \
];

/// Checks whether the piece just placed at `(row, col)` completes a
/// run of [`WIN_COUNT`] in any axis family.
///
/// Pure and bounded: each family walks at most `WIN_COUNT - 1` cells
/// away from the placed piece in each direction, stopping at the first
/// off-board or non-matching cell. Returns `false` if the cell is
/// empty or off the board.
#[instrument(skip(board))]
pub fn check_win(board: &Board, row: usize, col: usize) -> bool {
    let color = match board.get(row, col) {
        Some(Cell::Occupied(color)) => color,
        _ => return false,
    };

    AXES.iter().any(|&(dr, dc)| {
        let run = 1
            + run_length(board, row, col, color, dr, dc)
            + run_length(board, row, col, color, -dr, -dc);
        run >= WIN_COUNT
    })
}

/// Counts contiguous same-color cells from `(row, col)` exclusive,
/// stepping by `(dr, dc)`, up to `WIN_COUNT - 1`.
fn run_length(
    board: &Board,
    row: usize,
    col: usize,
    color: Color,
    dr: isize,
    dc: isize,
) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while count < WIN_COUNT - 1 {
        if r < 0 || c < 0 {
            break;
        }
        match board.get(r as usize, c as usize) {
            Some(Cell::Occupied(other)) if other == color => {
                count += 1;
                r += dr;
                c += dc;
            }
            _ => break,
        }
    }
    count
}
