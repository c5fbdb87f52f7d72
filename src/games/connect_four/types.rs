//! Core domain types for Connect Four.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 6;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 7;

/// Contiguous run length required to win.
pub const WIN_COUNT: usize = 4;

/// Piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Red moves first in every game.
    Red,
    /// Yellow moves second.
    Yellow,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Yellow,
            Color::Yellow => Color::Red,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// No piece has reached this cell.
    Empty,
    /// Cell holds a piece of the given color.
    Occupied(Color),
}

/// Errors from dropping a piece into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DropError {
    /// Column index is outside the board.
    #[display("column is out of range")]
    ColumnOutOfRange,
    /// Every row in the column is occupied.
    #[display("column is full")]
    ColumnFull,
}

/// 6x7 Connect Four board.
///
/// Rows are indexed bottom-up (row 0 is the floor), columns
/// left-to-right. Gravity is structural: each column carries a fill
/// counter, so a dropped piece always lands at `next_free[col]` and a
/// cell can only be occupied if the cell below it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in `[row][col]` order, row 0 at the bottom.
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    /// Pieces dropped into each column so far.
    next_free: [usize; BOARD_WIDTH],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
            next_free: [0; BOARD_WIDTH],
        }
    }

    /// Gets the cell at the given coordinates, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Number of pieces dropped into the column so far.
    ///
    /// Out-of-range columns read as fully stacked, matching
    /// [`Board::is_column_full`].
    pub fn column_fill(&self, col: usize) -> usize {
        self.next_free.get(col).copied().unwrap_or(BOARD_HEIGHT)
    }

    /// Checks if a column can take no further pieces.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.column_fill(col) >= BOARD_HEIGHT
    }

    /// Checks if every column is full.
    pub fn is_full(&self) -> bool {
        (0..BOARD_WIDTH).all(|col| self.is_column_full(col))
    }

    /// Drops a piece into a column and returns the row it landed in.
    ///
    /// # Errors
    ///
    /// Returns [`DropError::ColumnOutOfRange`] for columns outside
    /// `[0, BOARD_WIDTH)` and [`DropError::ColumnFull`] when the column
    /// holds `BOARD_HEIGHT` pieces. The board is unchanged on error.
    pub fn drop_piece(&mut self, col: usize, color: Color) -> Result<usize, DropError> {
        if col >= BOARD_WIDTH {
            return Err(DropError::ColumnOutOfRange);
        }
        let row = self.next_free[col];
        if row >= BOARD_HEIGHT {
            return Err(DropError::ColumnFull);
        }
        self.cells[row][col] = Cell::Occupied(color);
        self.next_free[col] = row + 1;
        Ok(row)
    }

    /// Formats the board as a human-readable string, top row first,
    /// with a 1-indexed column footer matching the user-facing view.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in (0..BOARD_HEIGHT).rev() {
            for col in 0..BOARD_WIDTH {
                let symbol = match self.cells[row][col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Color::Red) => 'R',
                    Cell::Occupied(Color::Yellow) => 'Y',
                };
                result.push(symbol);
                if col < BOARD_WIDTH - 1 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        let footer: Vec<String> = (1..=BOARD_WIDTH).map(|c| c.to_string()).collect();
        result.push_str(&footer.join(" "));
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
