//! Registry of in-progress games.
//!
//! Both participants of a game must observe the same mutating state,
//! so games live in an arena of slots and the per-player registry maps
//! each id to its slot index. Freed slots are reused.

use crate::games::connect_four::{GameState, MoveError, MoveSummary, PlayerId};
use derive_more::{Display, Error};
use rand::Rng;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Errors that can occur when creating a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum NewGameError {
    /// One or both participants already have a game in progress.
    #[display("a player already has an active game")]
    PlayerBusy,
}

/// Owns all in-progress games: creates them with a randomized first
/// mover, routes moves to the right game, and tears games down when a
/// move wins.
///
/// Invariant: a participant id is seated in at most one game at a time.
#[derive(Debug, Clone, Default)]
pub struct GameManager {
    /// Arena of game slots; `None` marks a freed slot.
    slots: Vec<Option<GameState>>,
    /// Participant id to arena slot; both participants of a game map
    /// to the same slot.
    seats: HashMap<PlayerId, usize>,
    /// Freed slot indices available for reuse.
    free: Vec<usize>,
}

impl GameManager {
    /// Creates an empty game registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game between two participants.
    ///
    /// The first mover is chosen by a fair coin flip on `rng` (injected
    /// so callers can seed it) and receives the first color. Returns
    /// the first mover's id.
    ///
    /// # Errors
    ///
    /// Returns [`NewGameError::PlayerBusy`] if either participant is
    /// already seated; nothing changes in that case.
    #[instrument(skip(self, rng))]
    pub fn new_game(
        &mut self,
        player_one: PlayerId,
        player_two: PlayerId,
        rng: &mut impl Rng,
    ) -> Result<PlayerId, NewGameError> {
        debug_assert_ne!(player_one, player_two);
        if self.seats.contains_key(&player_one) || self.seats.contains_key(&player_two) {
            warn!(player_one, player_two, "game creation rejected: player already seated");
            return Err(NewGameError::PlayerBusy);
        }

        let first_mover = if rng.random_bool(0.5) {
            player_one
        } else {
            player_two
        };
        let state = GameState::new(player_one, player_two, first_mover);

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(state);
                slot
            }
            None => {
                self.slots.push(Some(state));
                self.slots.len() - 1
            }
        };
        self.seats.insert(player_one, slot);
        self.seats.insert(player_two, slot);

        info!(player_one, player_two, first_mover, "game created");
        Ok(first_mover)
    }

    /// Applies a move by `player` into `column` (0-indexed).
    ///
    /// A winning move evicts the game from the registry under both
    /// participant ids before returning.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] without mutating any state when the
    /// player has no game, it is not their turn, or the column is out
    /// of range or full.
    #[instrument(skip(self))]
    pub fn make_move(
        &mut self,
        player: PlayerId,
        column: usize,
    ) -> Result<MoveSummary, MoveError> {
        let slot = *self.seats.get(&player).ok_or(MoveError::NoActiveGame)?;
        let game = self.slots[slot]
            .as_mut()
            .expect("seat must point at a live game slot");

        let summary = game.play(player, column)?;

        if summary.win {
            let (one, two) = (*game.player_one(), *game.player_two());
            self.seats.remove(&one);
            self.seats.remove(&two);
            self.slots[slot] = None;
            self.free.push(slot);
            info!(winner = player, "game won, seats released");
        }

        Ok(summary)
    }

    /// The game `player` is seated in, if any.
    pub fn active_game(&self, player: PlayerId) -> Option<&GameState> {
        let slot = *self.seats.get(&player)?;
        self.slots[slot].as_ref()
    }

    /// True iff no games are in progress.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Clears the entire registry (administrative reset).
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(games = self.seats.len() / 2, "resetting all games");
        self.slots.clear();
        self.seats.clear();
        self.free.clear();
    }
}
