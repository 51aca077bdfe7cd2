use crate::board::TileList;
use crate::session::MovePhase;
use crate::victory::VictoryState;

/// Copy of everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Tiles on screen; during a slide this is the intermediate board
    pub tiles: TileList,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub victory: VictoryState,
    pub can_undo: bool,
    pub phase: MovePhase,
    pub move_count: u32,
}

impl SessionSnapshot {
    /// True when a swipe could be accepted right now
    pub fn playable(&self) -> bool {
        !self.game_over && !self.victory.awaiting_decision() && self.phase == MovePhase::Idle
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            tiles: TileList::new(),
            score: 0,
            high_score: 0,
            game_over: false,
            victory: VictoryState::NotWon,
            can_undo: false,
            phase: MovePhase::Idle,
            move_count: 0,
        }
    }
}
