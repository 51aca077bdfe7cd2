//! Boundary errors for board construction.

use thiserror::Error;

use crate::board::TileId;

/// A tile collection that violates the board invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("tile at ({x}, {y}) lies outside the 4x4 grid")]
    OutOfBounds { x: u8, y: u8 },

    #[error("two tiles occupy ({x}, {y})")]
    DuplicateCell { x: u8, y: u8 },

    #[error("tile id {0:?} appears more than once")]
    DuplicateId(TileId),

    #[error("tile value {value} is not a power of two in 2..=2^59")]
    InvalidValue { value: u64 },
}
