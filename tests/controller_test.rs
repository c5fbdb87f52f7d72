//! Tests for the game registry.

use fourstack::{GameManager, Matchmaker, MoveError, NewGameError};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_new_game_returns_one_of_the_players() {
    let mut games = GameManager::new();
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    assert!(first_mover == 1 || first_mover == 2);
}

#[test]
fn test_coin_flip_is_seed_deterministic_but_fair() {
    let mut movers = std::collections::HashSet::new();
    for seed in 0..32 {
        let mut games = GameManager::new();
        let a = games.new_game(1, 2, &mut rng(seed)).unwrap();
        let mut games = GameManager::new();
        let b = games.new_game(1, 2, &mut rng(seed)).unwrap();
        assert_eq!(a, b);
        movers.insert(a);
    }
    // Across seeds the flip must pick both players.
    assert_eq!(movers.len(), 2);
}

#[test]
fn test_double_booking_rejected() {
    let mut games = GameManager::new();
    games.new_game(1, 2, &mut rng(0)).unwrap();

    assert_eq!(games.new_game(1, 3, &mut rng(1)), Err(NewGameError::PlayerBusy));
    assert_eq!(games.new_game(3, 2, &mut rng(1)), Err(NewGameError::PlayerBusy));
    assert!(games.active_game(3).is_none());
}

#[test]
fn test_move_without_game_rejected() {
    let mut games = GameManager::new();
    assert_eq!(games.make_move(1, 0), Err(MoveError::NoActiveGame));
}

#[test]
fn test_both_players_share_one_game() {
    let mut games = GameManager::new();
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    let second = if first_mover == 1 { 2 } else { 1 };

    games.make_move(first_mover, 3).unwrap();
    // The opponent sees the piece through their own registry entry.
    let game = games.active_game(second).unwrap();
    assert_eq!(game.board().column_fill(3), 1);
    assert_eq!(*game.turn_player(), second);
}

#[test]
fn test_winning_move_releases_both_seats() {
    let mut games = GameManager::new();
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    let second = if first_mover == 1 { 2 } else { 1 };

    for _ in 0..3 {
        assert!(!games.make_move(first_mover, 0).unwrap().win);
        assert!(!games.make_move(second, 1).unwrap().win);
    }
    let summary = games.make_move(first_mover, 0).unwrap();
    assert!(summary.win);

    assert!(games.is_empty());
    assert!(games.active_game(first_mover).is_none());
    assert!(games.active_game(second).is_none());
    assert_eq!(games.make_move(first_mover, 0), Err(MoveError::NoActiveGame));

    // Both players are free to start fresh games.
    games.new_game(first_mover, 3, &mut rng(1)).unwrap();
}

#[test]
fn test_failed_move_changes_nothing() {
    let mut games = GameManager::new();
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    let second = if first_mover == 1 { 2 } else { 1 };

    assert_eq!(games.make_move(second, 0), Err(MoveError::NotYourTurn));
    assert_eq!(games.make_move(first_mover, 99), Err(MoveError::ColumnOutOfRange));

    let game = games.active_game(first_mover).unwrap();
    assert_eq!(*game.turn_player(), first_mover);
    assert_eq!(game.board().column_fill(0), 0);
}

#[test]
fn test_turn_alternates_through_the_registry() {
    let mut games = GameManager::new();
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    let second = if first_mover == 1 { 2 } else { 1 };

    let mut expected = first_mover;
    for col in [0, 1, 2, 3, 4, 5] {
        let before = *games.active_game(1).unwrap().turn_player();
        assert_eq!(before, expected);
        games.make_move(expected, col).unwrap();
        let after = *games.active_game(1).unwrap().turn_player();
        assert_ne!(after, before);
        expected = after;
    }
}

#[test]
fn test_reset_empties_registry_regardless_of_state() {
    let mut games = GameManager::new();
    games.reset();
    assert!(games.is_empty());

    games.new_game(1, 2, &mut rng(0)).unwrap();
    games.reset();
    assert!(games.is_empty());
    assert_eq!(games.make_move(1, 0), Err(MoveError::NoActiveGame));
    games.new_game(1, 2, &mut rng(1)).unwrap();
}

#[test]
fn test_win_then_reopen_clears_matchmaker_lock() {
    // The dispatcher's end-of-game flow: win tears down the game, then
    // challenges reopen.
    let mut matchmaker = Matchmaker::new();
    let mut games = GameManager::new();

    matchmaker.challenge(1, 2);
    assert_eq!(
        matchmaker.challenge(2, 1),
        fourstack::ChallengeOutcome::Matched
    );
    let first_mover = games.new_game(1, 2, &mut rng(0)).unwrap();
    let second = if first_mover == 1 { 2 } else { 1 };

    for _ in 0..3 {
        games.make_move(first_mover, 0).unwrap();
        games.make_move(second, 1).unwrap();
    }
    let summary = games.make_move(first_mover, 0).unwrap();
    assert!(summary.win);
    matchmaker.reopen_challenges();

    assert!(!matchmaker.is_active_player(1));
    assert!(!matchmaker.is_active_player(2));
    assert!(matchmaker.accepting_challenges());
    assert!(games.is_empty());
}
