//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 4x4 grid:
//!
//! - **Columns**: `x` in 0..=3, left to right
//! - **Rows**: `y` in 0..=3, top to bottom
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SLIDE_MS` | 100 | Intermediate (sliding) board shown before merges resolve |
//! | `SPAWN_DELAY_MS` | 50 | Pause between the merged board and the next spawn |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, BOARD_SIZE, CELL_COUNT};
//!
//! let dir = Direction::Left;
//! assert!(dir.is_horizontal());
//! assert!(dir.toward_origin());
//! assert_eq!(dir.as_str(), "left");
//!
//! assert_eq!(BOARD_SIZE, 4);
//! assert_eq!(CELL_COUNT, 16);
//! ```

/// Board side length in cells
pub const BOARD_SIZE: u8 = 4;

/// Number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Tile value that counts as a win
pub const WIN_TILE: u64 = 2048;

/// Largest tile value a board accepts as input
///
/// Sixteen tiles of this value sum to 2^63, so no sequence of merges can
/// double past `u64`.
pub const MAX_TILE: u64 = 1 << 59;

/// Value of an ordinary spawned tile
pub const SPAWN_LOW: u64 = 2;

/// Value of a rare spawned tile
pub const SPAWN_HIGH: u64 = 4;

/// Probability that a spawned tile is [`SPAWN_HIGH`]
pub const SPAWN_HIGH_PROBABILITY: f64 = 0.1;

/// Tiles dealt at the start of a game
pub const INITIAL_TILES: usize = 2;

/// Tiles dealt after every accepted move
pub const TILES_PER_MOVE: usize = 1;

/// Number of previous positions kept for undo
pub const UNDO_DEPTH: usize = 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long the intermediate (pre-merge) board stays on screen
pub const SLIDE_MS: u32 = 100;

/// Pause after the merged board is shown and before the next tile spawns
pub const SPAWN_DELAY_MS: u32 = 50;

/// Swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for Left/Right (lines are rows)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles slide toward index 0 (Left/Up)
    pub fn toward_origin(&self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }

    /// Lowercase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Player actions accepted by a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Swipe(Direction),
    Undo,
    KeepPlaying,
    Restart,
}
