//! Fourstack library - Connect Four core for a livestream community bot
//!
//! This library provides the board-game subsystem of a community
//! chat-bot: challenge matchmaking, a game registry, win detection,
//! and the HTTP dispatcher that relays accepted actions to a browser
//! overlay.
//!
//! # Architecture
//!
//! - **Matchmaker**: mutual double-opt-in challenges, one game at a time
//! - **GameManager**: registry of in-progress games, move validation
//! - **Rules**: pure, bounded win detection on the just-placed piece
//! - **Server**: axum dispatcher surface plus overlay relay client
//!
//! # Example
//!
//! ```
//! use fourstack::{ChallengeOutcome, GameManager, Matchmaker};
//! use rand::SeedableRng;
//!
//! let mut matchmaker = Matchmaker::new();
//! assert_eq!(matchmaker.challenge(1, 2), ChallengeOutcome::Recorded);
//! assert_eq!(matchmaker.challenge(2, 1), ChallengeOutcome::Matched);
//!
//! let mut games = GameManager::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let first_mover = games.new_game(1, 2, &mut rng).unwrap();
//! assert!(first_mover == 1 || first_mover == 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod challenge;
mod config;
mod controller;
mod games;
mod relay;
mod server;

// Crate-level exports - Challenge matchmaking
pub use challenge::{ChallengeOutcome, Matchmaker};

// Crate-level exports - Configuration
pub use config::{BotConfig, ConfigError, RelayConfig};

// Crate-level exports - Game registry
pub use controller::{GameManager, NewGameError};

// Crate-level exports - Overlay relay
pub use relay::{OverlayEvent, RelayClient, RelayError};

// Crate-level exports - Dispatcher server
pub use server::{
    AppState, ChallengeReply, ChallengeRequest, MoveReply, MoveRequest, ResetReply, StatusReply,
    router,
};

// Crate-level exports - Game types (Connect Four)
pub use games::connect_four::{
    BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Color, DropError, GameState, MoveError, MoveSummary,
    PlayerId, WIN_COUNT, check_win,
};
