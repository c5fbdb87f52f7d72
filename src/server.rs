//! HTTP dispatcher surface.
//!
//! Translates command requests into calls on the matchmaker and the
//! game registry, owns the user-facing reply text, and forwards
//! accepted actions to the overlay relay. Column numbers cross this
//! boundary 1-indexed (the user's view); the core is 0-indexed.

use crate::challenge::{ChallengeOutcome, Matchmaker};
use crate::controller::GameManager;
use crate::games::connect_four::{MoveError, PlayerId};
use crate::relay::{OverlayEvent, RelayClient};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{error, info, instrument, warn};

/// All mutable bot state, guarded by one mutex.
///
/// The matchmaker and the registry share the "at most one game"
/// invariant, so every mutating request locks them together.
#[derive(Debug)]
struct GameHub {
    matchmaker: Matchmaker,
    games: GameManager,
    rng: StdRng,
}

impl GameHub {
    fn new() -> Self {
        Self {
            matchmaker: Matchmaker::new(),
            games: GameManager::new(),
            rng: StdRng::from_os_rng(),
        }
    }
}

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    core: Arc<Mutex<GameHub>>,
    relay: Option<RelayClient>,
}

impl AppState {
    /// Creates fresh bot state with an optional overlay relay.
    #[instrument(skip(relay))]
    pub fn new(relay: Option<RelayClient>) -> Self {
        info!(relay = relay.is_some(), "Creating dispatcher state");
        Self {
            core: Arc::new(Mutex::new(GameHub::new())),
            relay,
        }
    }
}

/// Request to challenge another participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// The challenger's id.
    pub challenger_id: PlayerId,
    /// The id of the participant being challenged.
    pub opponent_id: PlayerId,
}

/// Request to drop a piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// The mover's id.
    pub player_id: PlayerId,
    /// Column as the user sees it (1-indexed).
    pub column: i64,
}

/// Reply to a challenge request.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeReply {
    /// Whether the challenge was accepted (recorded or matched).
    pub ok: bool,
    /// Whether this challenge completed a mutual match and started a game.
    pub started: bool,
    /// First mover of the new game, when one started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_mover: Option<PlayerId>,
    /// User-facing reply text.
    pub message: String,
}

/// Reply to a move request.
#[derive(Debug, Clone, Serialize)]
pub struct MoveReply {
    /// Whether the move was accepted.
    pub ok: bool,
    /// Row the piece landed in, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Whether the move won the game, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win: Option<bool>,
    /// User-facing reply text.
    pub message: String,
}

impl MoveReply {
    fn rejected(err: MoveError) -> Self {
        Self {
            ok: false,
            row: None,
            win: None,
            message: err.to_string(),
        }
    }
}

/// Snapshot of the dispatcher state.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReply {
    /// Whether new challenges are currently accepted.
    pub accepting_challenges: bool,
    /// Participants locked into the running game, if any.
    pub active_players: Vec<PlayerId>,
    /// Text rendering of the running game's board, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
}

/// Reply to a reset request.
#[derive(Debug, Clone, Serialize)]
pub struct ResetReply {
    /// Always true; reset is unconditional.
    pub ok: bool,
    /// User-facing reply text.
    pub message: String,
}

/// Builds the dispatcher router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/challenge", post(challenge))
        .route("/move", post(make_move))
        .route("/reset", post(reset))
        .route("/status", get(status))
        .with_state(state)
}

#[instrument(skip(state, req), fields(challenger = req.challenger_id, opponent = req.opponent_id))]
async fn challenge(
    State(state): State<AppState>,
    Json(req): Json<ChallengeRequest>,
) -> Json<ChallengeReply> {
    let (reply, event) = {
        let mut guard = state.core.lock().unwrap();
        let hub = &mut *guard;
        match hub.matchmaker.challenge(req.challenger_id, req.opponent_id) {
            ChallengeOutcome::Rejected => (
                ChallengeReply {
                    ok: false,
                    started: false,
                    first_mover: None,
                    message:
                        "Challenge rejected: a game is already running, or you challenged yourself."
                            .to_string(),
                },
                None,
            ),
            ChallengeOutcome::Recorded => (
                ChallengeReply {
                    ok: true,
                    started: false,
                    first_mover: None,
                    message: format!(
                        "Challenge sent. The game starts when {} challenges you back.",
                        req.opponent_id
                    ),
                },
                None,
            ),
            ChallengeOutcome::Matched => {
                match hub
                    .games
                    .new_game(req.challenger_id, req.opponent_id, &mut hub.rng)
                {
                    Ok(first_mover) => (
                        ChallengeReply {
                            ok: true,
                            started: true,
                            first_mover: Some(first_mover),
                            message: format!("Game on! {} moves first.", first_mover),
                        },
                        Some(OverlayEvent::GameStarted {
                            player_one: req.challenger_id,
                            player_two: req.opponent_id,
                            first_mover,
                        }),
                    ),
                    Err(e) => {
                        // Unreachable for documented inputs: the matchmaker
                        // gate guarantees both seats are free. A hit means
                        // the two state machines disagree.
                        error!(error = %e, "matched challenge but game creation failed");
                        hub.matchmaker.reopen_challenges();
                        (
                            ChallengeReply {
                                ok: false,
                                started: false,
                                first_mover: None,
                                message: "Internal error starting the game; challenges reopened."
                                    .to_string(),
                            },
                            None,
                        )
                    }
                }
            }
        }
    };

    publish(&state, event).await;
    Json(reply)
}

#[instrument(skip(state, req), fields(player = req.player_id, column = req.column))]
async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Json<MoveReply> {
    // 1-indexed user input; the core is 0-indexed.
    let column = match req.column.checked_sub(1).and_then(|c| usize::try_from(c).ok()) {
        Some(column) => column,
        None => return Json(MoveReply::rejected(MoveError::ColumnOutOfRange)),
    };

    let (reply, event) = {
        let mut guard = state.core.lock().unwrap();
        let hub = &mut *guard;

        if !hub.matchmaker.is_active_player(req.player_id) {
            return Json(MoveReply::rejected(MoveError::NoActiveGame));
        }

        match hub.games.make_move(req.player_id, column) {
            Ok(summary) => {
                if summary.win {
                    hub.matchmaker.reopen_challenges();
                }
                let message = if summary.win {
                    format!("{} wins!", req.player_id)
                } else {
                    "Move accepted.".to_string()
                };
                (
                    MoveReply {
                        ok: true,
                        row: Some(summary.row),
                        win: Some(summary.win),
                        message,
                    },
                    Some(OverlayEvent::MoveMade {
                        player_id: req.player_id,
                        column: req.column,
                        row: summary.row,
                        win: summary.win,
                    }),
                )
            }
            Err(e) => (MoveReply::rejected(e), None),
        }
    };

    publish(&state, event).await;
    Json(reply)
}

#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Json<ResetReply> {
    let mut guard = state.core.lock().unwrap();
    guard.games.reset();
    guard.matchmaker.reopen_challenges();
    Json(ResetReply {
        ok: true,
        message: "All games cleared; challenges reopened.".to_string(),
    })
}

#[instrument(skip(state))]
async fn status(State(state): State<AppState>) -> Json<StatusReply> {
    let guard = state.core.lock().unwrap();
    let mut active_players: Vec<PlayerId> =
        guard.matchmaker.active_players().iter().copied().collect();
    active_players.sort_unstable();
    let board = active_players
        .first()
        .and_then(|id| guard.games.active_game(*id))
        .map(|game| game.board().display());
    Json(StatusReply {
        accepting_challenges: guard.matchmaker.accepting_challenges(),
        active_players,
        board,
    })
}

/// Forwards an event to the overlay relay, if one is configured.
/// Failures are logged and swallowed: relaying is pure notification.
async fn publish(state: &AppState, event: Option<OverlayEvent>) {
    let Some(event) = event else { return };
    let Some(relay) = &state.relay else { return };
    if let Err(e) = relay.publish(&event).await {
        warn!(error = %e, "overlay relay publish failed");
    }
}
