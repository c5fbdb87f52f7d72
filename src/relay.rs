//! Overlay event relay client.
//!
//! After every accepted move or game start, the dispatcher publishes a
//! JSON event to the browser-overlay relay endpoint. Delivery is pure
//! notification: the game core never depends on it succeeding, so
//! callers log failures and move on.

use crate::games::connect_four::PlayerId;
use derive_more::{Display, Error};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{debug, instrument};

/// Event payload forwarded to the browser overlay.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// A new game started between two participants.
    GameStarted {
        /// First participant id.
        player_one: PlayerId,
        /// Second participant id.
        player_two: PlayerId,
        /// Participant chosen to move first.
        first_mover: PlayerId,
    },
    /// A move was accepted.
    MoveMade {
        /// The mover's id.
        player_id: PlayerId,
        /// Column as the user sees it (1-indexed).
        column: i64,
        /// Row the piece landed in (0 = floor).
        row: usize,
        /// Whether the move won the game.
        win: bool,
    },
}

/// Relay error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Relay error: {} at {}:{}", message, file, line)]
pub struct RelayError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl RelayError {
    /// Creates a new relay error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for RelayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

/// Client for the overlay relay endpoint, authenticated by a static
/// bearer token.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl RelayClient {
    /// Creates a new relay client for the given endpoint and token.
    #[instrument(skip(token))]
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }

    /// Posts an event to the relay endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] if the request fails or the endpoint
    /// replies with a non-success status.
    #[instrument(skip(self, event), fields(endpoint = %self.endpoint))]
    pub async fn publish(&self, event: &OverlayEvent) -> Result<(), RelayError> {
        debug!(?event, "publishing overlay event");

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelayError::new(format!(
                "relay endpoint returned {}",
                response.status()
            )));
        }

        debug!("overlay event delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_action_tag() {
        let event = OverlayEvent::MoveMade {
            player_id: 42,
            column: 3,
            row: 0,
            win: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "move_made");
        assert_eq!(json["player_id"], 42);
        assert_eq!(json["column"], 3);
        assert_eq!(json["win"], true);

        let event = OverlayEvent::GameStarted {
            player_one: 1,
            player_two: 2,
            first_mover: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "game_started");
        assert_eq!(json["first_mover"], 2);
    }
}
