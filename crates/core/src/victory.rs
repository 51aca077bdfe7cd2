//! Victory policy - reaching the target tile
//!
//! Winning is a session rule layered on top of the board: it never changes how
//! tiles move. The first time a tile of at least [`WIN_TILE`] appears the
//! session is won and waits for the player to decide; choosing to keep playing
//! silences the check for the rest of the session.

use crate::board::Board;
use crate::types::WIN_TILE;

/// True if any tile is worth at least `target`
pub fn reaches_target(board: &Board, target: u64) -> bool {
    board.tiles().iter().any(|t| t.value >= target)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VictoryState {
    #[default]
    NotWon,
    /// Target reached; waiting for the player to continue
    Won,
    /// Target reached and the player chose to continue
    KeepPlaying,
}

impl VictoryState {
    /// State for a board loaded from a save
    ///
    /// A saved game that already holds the target tile resumes in
    /// `KeepPlaying`, so the win is not announced twice.
    pub fn for_resumed(board: &Board) -> Self {
        if reaches_target(board, WIN_TILE) {
            VictoryState::KeepPlaying
        } else {
            VictoryState::NotWon
        }
    }

    /// Evaluate a freshly merged board. Returns true when this call is the win.
    pub fn observe(&mut self, board: &Board) -> bool {
        if *self == VictoryState::NotWon && reaches_target(board, WIN_TILE) {
            *self = VictoryState::Won;
            return true;
        }
        false
    }

    /// Acknowledge the win and continue. Returns false outside `Won`.
    pub fn keep_playing(&mut self) -> bool {
        if *self == VictoryState::Won {
            *self = VictoryState::KeepPlaying;
            return true;
        }
        false
    }

    pub fn has_won(&self) -> bool {
        !matches!(self, VictoryState::NotWon)
    }

    /// Win reached and not yet acknowledged
    pub fn awaiting_decision(&self) -> bool {
        *self == VictoryState::Won
    }
}
