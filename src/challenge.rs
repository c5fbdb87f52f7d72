//! Challenge matchmaking with a single-active-game lock.
//!
//! Games start through a mutual double-opt-in handshake: both
//! participants must independently challenge each other before a match
//! is made, so neither side can force a game. At most one game runs at
//! a time; while it does, no challenges are accepted.

use crate::games::connect_four::PlayerId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Result of issuing a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// Mutual match found: both ids are now locked into a game and
    /// challenges are closed. Only this outcome starts a game.
    Matched,
    /// Challenge stored, awaiting reciprocation from the opponent.
    Recorded,
    /// Self-challenge, or a game is already running.
    Rejected,
}

/// Serializes game creation through mutual consent.
///
/// Two states, derived from the active-players set: idle (set empty,
/// accepting challenges) and active (set non-empty, one game running
/// server-wide). The set doubles as the move-eligibility gate for the
/// command layer.
#[derive(Debug, Clone, Default)]
pub struct Matchmaker {
    /// Outgoing challenge per challenger; at most one each.
    ledger: HashMap<PlayerId, PlayerId>,
    /// Participants locked into the currently tracked game.
    active_players: HashSet<PlayerId>,
}

impl Matchmaker {
    /// Creates a new matchmaker, idle and accepting challenges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a challenge from `challenger` to `opponent`.
    ///
    /// If the opponent has already challenged the challenger (in either
    /// call order), the whole ledger is cleared, both ids become the
    /// active players, and challenges close until
    /// [`Matchmaker::reopen_challenges`]. Otherwise the challenge is
    /// recorded, replacing any prior outgoing challenge from the same
    /// challenger. No state changes on rejection.
    #[instrument(skip(self))]
    pub fn challenge(&mut self, challenger: PlayerId, opponent: PlayerId) -> ChallengeOutcome {
        if !self.accepting_challenges() {
            debug!(challenger, opponent, "challenge rejected: a game is running");
            return ChallengeOutcome::Rejected;
        }
        if challenger == opponent {
            debug!(challenger, "challenge rejected: cannot challenge yourself");
            return ChallengeOutcome::Rejected;
        }

        if self.ledger.get(&opponent) == Some(&challenger) {
            info!(challenger, opponent, "mutual challenge matched");
            self.ledger.clear();
            self.active_players.insert(challenger);
            self.active_players.insert(opponent);
            return ChallengeOutcome::Matched;
        }

        self.ledger.insert(challenger, opponent);
        debug!(challenger, opponent, "challenge recorded, awaiting reciprocation");
        ChallengeOutcome::Recorded
    }

    /// True iff no game is running and new challenges may be issued.
    pub fn accepting_challenges(&self) -> bool {
        self.active_players.is_empty()
    }

    /// True iff `id` is locked into the currently tracked game.
    pub fn is_active_player(&self, id: PlayerId) -> bool {
        self.active_players.contains(&id)
    }

    /// Participants locked into the currently tracked game.
    pub fn active_players(&self) -> &HashSet<PlayerId> {
        &self.active_players
    }

    /// Unconditionally returns to idle, clearing the ledger and the
    /// active-players set. Idempotent; called after a game ends by win
    /// or is forcibly reset.
    #[instrument(skip(self))]
    pub fn reopen_challenges(&mut self) {
        info!("reopening challenges");
        self.ledger.clear();
        self.active_players.clear();
    }
}
