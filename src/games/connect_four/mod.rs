//! Connect Four game model and rules.

mod game;
mod rules;
mod types;

pub use game::{GameState, MoveError, MoveSummary, PlayerId};
pub use rules::check_win;
pub use types::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Color, DropError, WIN_COUNT};
