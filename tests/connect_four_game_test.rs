//! Tests for the Connect Four match state.

use fourstack::{BOARD_HEIGHT, BOARD_WIDTH, Color, GameState, MoveError, MoveSummary};

#[test]
fn test_first_move_lands_on_floor() {
    let mut game = GameState::new(1, 2, 1);
    let summary = game.play(1, 0).unwrap();
    assert_eq!(
        summary,
        MoveSummary {
            row: 0,
            color: Color::Red,
            win: false
        }
    );
}

#[test]
fn test_moving_twice_in_a_row_rejected() {
    let mut game = GameState::new(1, 2, 1);
    game.play(1, 0).unwrap();
    assert_eq!(game.play(1, 0), Err(MoveError::NotYourTurn));
}

#[test]
fn test_out_of_range_columns_rejected_without_mutation() {
    let mut game = GameState::new(1, 2, 1);
    let before = game.clone();
    assert_eq!(game.play(1, BOARD_WIDTH), Err(MoveError::ColumnOutOfRange));
    assert_eq!(game.play(1, usize::MAX), Err(MoveError::ColumnOutOfRange));
    assert_eq!(game, before);
    // Still player 1's turn after the rejections.
    let summary = game.play(1, 0).unwrap();
    assert_eq!(summary.row, 0);
}

#[test]
fn test_column_fill_is_monotone_and_capped() {
    let mut game = GameState::new(1, 2, 1);
    let mut last_fill = 0;
    let players = [1, 2];
    for i in 0..BOARD_HEIGHT {
        game.play(players[i % 2], 0).unwrap();
        let fill = game.board().column_fill(0);
        assert!(fill > last_fill);
        assert!(fill <= BOARD_HEIGHT);
        last_fill = fill;
    }
    assert_eq!(last_fill, BOARD_HEIGHT);
}

#[test]
fn test_seventh_drop_into_full_column_rejected() {
    let mut game = GameState::new(1, 2, 1);
    let players = [1, 2];
    for i in 0..BOARD_HEIGHT {
        let summary = game.play(players[i % 2], 0).unwrap();
        assert!(!summary.win);
    }
    assert_eq!(game.play(1, 0), Err(MoveError::ColumnFull));
    // The other player hits the same wall on their turn.
    game.play(1, 1).unwrap();
    assert_eq!(game.play(2, 0), Err(MoveError::ColumnFull));
}

#[test]
fn test_vertical_win_on_fourth_drop() {
    let mut game = GameState::new(1, 2, 1);
    for _ in 0..3 {
        assert!(!game.play(1, 0).unwrap().win);
        assert!(!game.play(2, 1).unwrap().win);
    }
    let summary = game.play(1, 0).unwrap();
    assert_eq!(summary.row, 3);
    assert_eq!(summary.color, Color::Red);
    assert!(summary.win);
}

#[test]
fn test_horizontal_win_along_the_floor() {
    let mut game = GameState::new(1, 2, 1);
    for col in 0..3 {
        assert!(!game.play(1, col).unwrap().win);
        assert!(!game.play(2, 6).unwrap().win);
    }
    let summary = game.play(1, 3).unwrap();
    assert_eq!(summary.row, 0);
    assert!(summary.win);
}

#[test]
fn test_second_mover_plays_yellow() {
    let mut game = GameState::new(1, 2, 2);
    let summary = game.play(2, 3).unwrap();
    assert_eq!(summary.color, Color::Red);
    let summary = game.play(1, 3).unwrap();
    assert_eq!(summary.color, Color::Yellow);
    assert_eq!(summary.row, 1);
}
