//! Save format - JSON representation of a game in progress
//!
//! ```json
//! {"grid":[{"value":2,"x":0,"y":3,"isNew":false}],"score":1204,"highScore":5120}
//! ```
//!
//! Tile ids are not persisted; a loaded board gets sequential ids. Unknown
//! keys are ignored so older and newer files load alike.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Tile, TileId};
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTile {
    pub value: u64,
    pub x: u8,
    pub y: u8,
    #[serde(default)]
    pub is_new: bool,
}

impl From<&Tile> for SavedTile {
    fn from(tile: &Tile) -> Self {
        Self {
            value: tile.value,
            x: tile.x,
            y: tile.y,
            is_new: tile.is_new,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    #[serde(default)]
    pub grid: Vec<SavedTile>,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub high_score: u64,
}

impl SavedGame {
    pub fn from_board(board: &Board, score: u64, high_score: u64) -> Self {
        Self {
            grid: board.tiles().iter().map(SavedTile::from).collect(),
            score,
            high_score,
        }
    }

    /// Rebuild the board, assigning ids 1..=n in file order
    pub fn to_board(&self) -> Result<Board, BoardError> {
        Board::from_tiles(self.grid.iter().enumerate().map(|(i, t)| Tile {
            id: TileId(i as u64 + 1),
            value: t.value,
            x: t.x,
            y: t.y,
            is_new: t.is_new,
        }))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
