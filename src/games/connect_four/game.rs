//! Match state for a single Connect Four game.

use super::rules;
use super::types::{Board, Color, DropError};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Unique identifier for a participant (a chat-platform user id).
pub type PlayerId = u64;

/// Errors that can occur when making a move.
///
/// All variants are expected, recoverable user-input conditions; the
/// state is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The mover has no game in progress.
    #[display("no active game for this player")]
    NoActiveGame,
    /// It is the other participant's turn.
    #[display("not this player's turn")]
    NotYourTurn,
    /// Column index is outside the board.
    #[display("column is out of range")]
    ColumnOutOfRange,
    /// Every row in the column is occupied.
    #[display("column is full")]
    ColumnFull,
}

impl From<DropError> for MoveError {
    fn from(err: DropError) -> Self {
        match err {
            DropError::ColumnOutOfRange => MoveError::ColumnOutOfRange,
            DropError::ColumnFull => MoveError::ColumnFull,
        }
    }
}

/// Outcome of one accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSummary {
    /// Row the piece landed in (0 = floor).
    pub row: usize,
    /// Color that was placed.
    pub color: Color,
    /// Whether this move completed a winning run.
    pub win: bool,
}

/// One active match between two participants.
///
/// Turn color and turn player are tracked independently: the color
/// alternation drives the board, the player alternation drives move
/// eligibility, and both flip on every accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    /// First participant, fixed at creation.
    player_one: PlayerId,
    /// Second participant, fixed at creation.
    player_two: PlayerId,
    /// The board.
    board: Board,
    /// Color that moves next.
    turn_color: Color,
    /// Participant that moves next.
    turn_player: PlayerId,
}

impl GameState {
    /// Creates a new game with an empty board.
    ///
    /// `first_mover` must be one of the two participants and receives
    /// the first color.
    #[instrument]
    pub fn new(player_one: PlayerId, player_two: PlayerId, first_mover: PlayerId) -> Self {
        debug_assert!(first_mover == player_one || first_mover == player_two);
        Self {
            player_one,
            player_two,
            board: Board::new(),
            turn_color: Color::Red,
            turn_player: first_mover,
        }
    }

    /// Applies a move by `player` into `column` (0-indexed).
    ///
    /// On success the turn flips to the other participant and color,
    /// even when the move wins (the caller tears the game down
    /// immediately, so the flip is harmless).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NotYourTurn`], [`MoveError::ColumnOutOfRange`],
    /// or [`MoveError::ColumnFull`] without mutating any state.
    #[instrument(skip(self), fields(player_one = self.player_one, player_two = self.player_two))]
    pub fn play(&mut self, player: PlayerId, column: usize) -> Result<MoveSummary, MoveError> {
        if player != self.turn_player {
            return Err(MoveError::NotYourTurn);
        }

        let color = self.turn_color;
        let row = self.board.drop_piece(column, color)?;
        let win = rules::check_win(&self.board, row, column);

        self.turn_color = self.turn_color.opponent();
        self.turn_player = if self.turn_player == self.player_one {
            self.player_two
        } else {
            self.player_one
        };

        if !win && self.board.is_full() {
            // No draw rule exists yet: the board is stuck until an
            // administrative reset frees both players.
            warn!(
                player_one = self.player_one,
                player_two = self.player_two,
                "board full with no winner; all further moves will be rejected"
            );
        }

        Ok(MoveSummary { row, color, win })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_alternates_every_accepted_move() {
        let mut game = GameState::new(1, 2, 1);
        assert_eq!(*game.turn_player(), 1);
        assert_eq!(*game.turn_color(), Color::Red);

        game.play(1, 0).unwrap();
        assert_eq!(*game.turn_player(), 2);
        assert_eq!(*game.turn_color(), Color::Yellow);

        game.play(2, 1).unwrap();
        assert_eq!(*game.turn_player(), 1);
        assert_eq!(*game.turn_color(), Color::Red);
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut game = GameState::new(1, 2, 1);
        game.play(1, 0).unwrap();
        let before = game.clone();

        assert_eq!(game.play(1, 0), Err(MoveError::NotYourTurn));
        assert_eq!(game.play(2, 99), Err(MoveError::ColumnOutOfRange));
        assert_eq!(game, before);
    }

    #[test]
    fn test_turn_flips_even_on_winning_move() {
        let mut game = GameState::new(1, 2, 1);
        for _ in 0..3 {
            game.play(1, 0).unwrap();
            game.play(2, 1).unwrap();
        }
        let summary = game.play(1, 0).unwrap();
        assert!(summary.win);
        assert_eq!(*game.turn_player(), 2);
    }

    #[test]
    fn test_summary_reports_landing_row_and_color() {
        let mut game = GameState::new(7, 9, 9);
        let first = game.play(9, 4).unwrap();
        assert_eq!(first, MoveSummary { row: 0, color: Color::Red, win: false });
        let second = game.play(7, 4).unwrap();
        assert_eq!(second, MoveSummary { row: 1, color: Color::Yellow, win: false });
    }
}
