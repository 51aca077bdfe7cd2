//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of 2048 and the session state machine around
//! them. It has **no dependencies** on the terminal or the filesystem:
//!
//! - **Deterministic**: the random source is injected, so a seed replays a game
//! - **Testable**: every rule is a plain function over a [`Board`]
//! - **Allocation-free moves**: boards live in fixed-capacity arrays
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 board of identified tiles, validation, grid views
//! - [`engine`]: move/merge computation and the game-over check
//! - [`spawn`]: random tile placement and the opening deal
//! - [`victory`]: win detection and the keep-playing decision
//! - [`session`]: score, undo, and timed two-phase move playback
//! - [`save`]: JSON save format
//! - [`snapshot`]: render-ready copy of a session
//!
//! # Game Rules
//!
//! - **Slide**: every tile moves as far as it can toward the swipe edge
//! - **Merge**: two equal tiles meeting become one of double value; a tile
//!   merges at most once per move, and pairs closest to the edge merge first
//! - **Score**: each merge adds the merged value
//! - **Spawn**: after each move one tile (2 at 90%, 4 at 10%) appears on a
//!   random empty cell
//! - **Game over**: the board is full and no two neighbors are equal
//! - **Victory**: the first 2048 tile wins; the player may keep playing
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameSession, SessionTiming};
//! use tui_2048_types::{Direction, GameAction};
//!
//! let mut game = GameSession::new(12345).with_timing(SessionTiming::INSTANT);
//!
//! // Try every direction; at least one moves on an opening board.
//! let moved = Direction::ALL
//!     .into_iter()
//!     .any(|d| game.apply_action(GameAction::Swipe(d)));
//! assert!(moved);
//!
//! game.finish_move();
//! assert_eq!(game.move_count(), 1);
//! assert!(!game.is_busy());
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod save;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod victory;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid, Tile, TileId, TileList};
pub use engine::{can_move, compute_move, has_any_move, is_terminal, MoveResult};
pub use error::BoardError;
pub use save::{SavedGame, SavedTile};
pub use session::{GameSession, MovePhase, SessionEvent, SessionTiming, SwipeOutcome};
pub use snapshot::SessionSnapshot;
pub use spawn::{deal_new_game, entropy_seed, seeded_rng, spawn_tiles, spawn_value};
pub use victory::{reaches_target, VictoryState};
