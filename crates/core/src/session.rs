//! Game session - score, undo, victory and two-phase move application
//!
//! The engine computes a whole move at once. A session plays it back in two
//! timed phases so the front end can animate it:
//!
//! 1. **Sliding**: the intermediate board (tiles at their destinations, merge
//!    pairs overlapping) is on screen for `slide_ms`.
//! 2. **Settling**: the merged board is on screen for `spawn_delay_ms`, then a
//!    new tile spawns and the game-over check runs.
//!
//! Moves are serialized: a swipe arriving while a move is in flight is
//! rejected with [`SwipeOutcome::Busy`]. Call [`GameSession::tick`] every frame
//! with the elapsed time.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, Tile, TileList};
use crate::engine::{compute_move, is_terminal, MoveResult};
use crate::save::SavedGame;
use crate::snapshot::SessionSnapshot;
use crate::spawn::{deal_new_game, seeded_rng, spawn_tiles};
use crate::types::{
    Direction, GameAction, SLIDE_MS, SPAWN_DELAY_MS, TILES_PER_MOVE, UNDO_DEPTH, WIN_TILE,
};
use crate::victory::VictoryState;

/// Phase durations for move playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub slide_ms: u32,
    pub spawn_delay_ms: u32,
}

impl SessionTiming {
    /// No delays: every move completes on the next tick
    pub const INSTANT: SessionTiming = SessionTiming {
        slide_ms: 0,
        spawn_delay_ms: 0,
    };
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            slide_ms: SLIDE_MS,
            spawn_delay_ms: SPAWN_DELAY_MS,
        }
    }
}

/// Public view of the playback phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Idle,
    Sliding,
    Settling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Sliding { remaining_ms: u32, result: MoveResult },
    Settling { remaining_ms: u32 },
}

/// Result of [`GameSession::swipe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The move started playing back
    Accepted,
    /// Nothing can slide in that direction
    NoMove,
    /// A previous move is still playing back
    Busy,
    /// The win screen is waiting for keep-playing or restart
    AwaitingDecision,
    GameOver,
}

/// Notifications for the front end (persistence, status line)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Moved { direction: Direction, score_delta: u64 },
    Victory,
    /// A move finished: spawn done and game-over evaluated
    Settled { game_over: bool },
    Undone,
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    board: Board,
    score: u64,
}

/// A single game of 2048
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    /// Authoritative board
    board: Board,
    /// Tiles on screen (the intermediate board while sliding)
    display: TileList,
    score: u64,
    high_score: u64,
    game_over: bool,
    victory: VictoryState,
    history: ArrayVec<HistoryEntry, UNDO_DEPTH>,
    phase: Phase,
    timing: SessionTiming,
    events: Vec<SessionEvent>,
    /// Accepted moves since the last restart
    move_count: u32,
    rng: R,
}

impl GameSession<StdRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seeded_rng(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Create a new game dealing from `rng`
    pub fn with_rng(mut rng: R) -> Self {
        let board = deal_new_game(&mut rng);
        Self::from_parts(board, 0, 0, VictoryState::NotWon, rng)
    }

    /// Continue a saved game.
    ///
    /// Falls back to a new deal when the save has no board, holds a finished
    /// game, or is inconsistent. The high score always carries over.
    pub fn resume(saved: &SavedGame, mut rng: R) -> Self {
        let high_score = saved.high_score.max(saved.score);

        match saved.to_board() {
            Ok(board) if !board.is_empty() && !is_terminal(&board) => {
                let victory = VictoryState::for_resumed(&board);
                debug!(
                    tiles = board.len(),
                    score = saved.score,
                    "resuming saved game"
                );
                Self::from_parts(board, saved.score, high_score, victory, rng)
            }
            Ok(board) => {
                if !board.is_empty() {
                    info!(score = saved.score, "saved game was already over; dealing a new one");
                }
                let board = deal_new_game(&mut rng);
                Self::from_parts(board, 0, high_score, VictoryState::NotWon, rng)
            }
            Err(err) => {
                warn!(%err, "discarding invalid saved board");
                let board = deal_new_game(&mut rng);
                Self::from_parts(board, 0, high_score, VictoryState::NotWon, rng)
            }
        }
    }

    fn from_parts(
        board: Board,
        score: u64,
        high_score: u64,
        victory: VictoryState,
        rng: R,
    ) -> Self {
        let display = board.tiles().iter().copied().collect();
        Self {
            board,
            display,
            score,
            high_score: high_score.max(score),
            game_over: false,
            victory,
            history: ArrayVec::new(),
            phase: Phase::Idle,
            timing: SessionTiming::default(),
            events: Vec::new(),
            move_count: 0,
            rng,
        }
    }

    pub fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tiles currently on screen
    pub fn tiles(&self) -> &[Tile] {
        &self.display
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn victory(&self) -> VictoryState {
        self.victory
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn phase(&self) -> MovePhase {
        match self.phase {
            Phase::Idle => MovePhase::Idle,
            Phase::Sliding { .. } => MovePhase::Sliding,
            Phase::Settling { .. } => MovePhase::Settling,
        }
    }

    /// A move is playing back
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tiles: self.display.clone(),
            score: self.score,
            high_score: self.high_score,
            game_over: self.game_over,
            victory: self.victory,
            can_undo: self.can_undo(),
            phase: self.phase(),
            move_count: self.move_count,
        }
    }

    /// Save-file view of the authoritative board
    pub fn to_saved(&self) -> SavedGame {
        SavedGame::from_board(&self.board, self.score, self.high_score)
    }

    /// Take pending events, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Swipe(direction) => self.swipe(direction) == SwipeOutcome::Accepted,
            GameAction::Undo => self.undo(),
            GameAction::KeepPlaying => self.keep_playing(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Start a move in `direction`
    pub fn swipe(&mut self, direction: Direction) -> SwipeOutcome {
        if self.game_over {
            return SwipeOutcome::GameOver;
        }
        if self.is_busy() {
            return SwipeOutcome::Busy;
        }
        if self.victory.awaiting_decision() {
            return SwipeOutcome::AwaitingDecision;
        }

        let result = compute_move(&self.board, direction);
        if !result.moved {
            debug!(direction = direction.as_str(), "swipe ignored: nothing moves");
            return SwipeOutcome::NoMove;
        }

        self.push_history();
        self.move_count = self.move_count.wrapping_add(1);
        self.display = result.intermediate.clone();
        self.events.push(SessionEvent::Moved {
            direction,
            score_delta: result.score_delta,
        });
        debug!(
            direction = direction.as_str(),
            score_delta = result.score_delta,
            merges = result.merge_count(),
            "move accepted"
        );

        self.phase = Phase::Sliding {
            remaining_ms: self.timing.slide_ms,
            result,
        };
        SwipeOutcome::Accepted
    }

    /// Advance move playback. Returns true if the displayed board changed.
    ///
    /// Leftover time carries into the next phase, so one long tick can finish
    /// a whole move.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut budget = elapsed_ms;
        let mut changed = false;

        loop {
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Idle => return changed,
                Phase::Sliding {
                    remaining_ms,
                    result,
                } if budget < remaining_ms => {
                    self.phase = Phase::Sliding {
                        remaining_ms: remaining_ms - budget,
                        result,
                    };
                    return changed;
                }
                Phase::Sliding {
                    remaining_ms,
                    result,
                } => {
                    budget -= remaining_ms;
                    self.commit(result);
                    changed = true;
                }
                Phase::Settling { remaining_ms } if budget < remaining_ms => {
                    self.phase = Phase::Settling {
                        remaining_ms: remaining_ms - budget,
                    };
                    return changed;
                }
                Phase::Settling { remaining_ms } => {
                    budget -= remaining_ms;
                    self.settle();
                    changed = true;
                }
            }
        }
    }

    /// Complete any in-flight move immediately
    pub fn finish_move(&mut self) {
        while self.is_busy() {
            self.tick(u32::MAX);
        }
    }

    /// Restore the position before the last accepted move
    pub fn undo(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        let Some(entry) = self.history.pop() else {
            return false;
        };

        self.board = entry.board;
        self.display = self.board.tiles().iter().copied().collect();
        self.score = entry.score;
        self.game_over = false;
        self.events.push(SessionEvent::Undone);
        debug!(score = self.score, "undo");
        true
    }

    /// Start over; only the high score survives
    pub fn restart(&mut self) {
        let board = deal_new_game(&mut self.rng);
        self.display = board.tiles().iter().copied().collect();
        self.board = board;
        self.score = 0;
        self.game_over = false;
        self.victory = VictoryState::NotWon;
        self.history.clear();
        self.phase = Phase::Idle;
        self.move_count = 0;
        self.events.push(SessionEvent::Restarted);
        info!(high_score = self.high_score, "new game");
    }

    /// Dismiss the win screen and continue
    pub fn keep_playing(&mut self) -> bool {
        self.victory.keep_playing()
    }

    fn push_history(&mut self) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(HistoryEntry {
            board: self.board.clone(),
            score: self.score,
        });
    }

    /// End of the slide: show the merged board and bank the score
    fn commit(&mut self, result: MoveResult) {
        self.board = result.board;
        self.display = self.board.tiles().iter().copied().collect();
        self.score = self.score.saturating_add(result.score_delta);
        self.high_score = self.high_score.max(self.score);

        if self.victory.observe(&self.board) {
            info!(score = self.score, target = WIN_TILE, "target tile reached");
            self.events.push(SessionEvent::Victory);
        }

        self.phase = Phase::Settling {
            remaining_ms: self.timing.spawn_delay_ms,
        };
    }

    /// End of the move: spawn and check for game over
    fn settle(&mut self) {
        self.board = spawn_tiles(&self.board, TILES_PER_MOVE, &mut self.rng);
        self.display = self.board.tiles().iter().copied().collect();
        self.game_over = is_terminal(&self.board);
        if self.game_over {
            info!(
                score = self.score,
                max_tile = self.board.max_value(),
                moves = self.move_count,
                "game over"
            );
        }
        self.events.push(SessionEvent::Settled {
            game_over: self.game_over,
        });
        self.phase = Phase::Idle;
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One Left away from a full board with no pairs, whatever spawns
    const LOCKING_BOARD: [[u64; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [0, 8, 16, 32]];

    /// Session on a fixed board with zero playback delays
    fn session_on(rows: [[u64; 4]; 4]) -> GameSession {
        let saved = SavedGame::from_board(&Board::from_rows(rows).unwrap(), 0, 0);
        GameSession::resume(&saved, seeded_rng(42)).with_timing(SessionTiming::INSTANT)
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(12345);
        assert_eq!(session.board().len(), 2);
        assert_eq!(session.tiles().len(), 2);
        assert_eq!(session.score(), 0);
        assert!(!session.game_over());
        assert!(!session.can_undo());
        assert_eq!(session.phase(), MovePhase::Idle);
        assert_eq!(session.victory(), VictoryState::NotWon);
    }

    #[test]
    fn test_swipe_plays_back_in_two_phases() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
            .with_timing(SessionTiming {
                slide_ms: 100,
                spawn_delay_ms: 50,
            });

        assert_eq!(session.swipe(Direction::Left), SwipeOutcome::Accepted);
        assert_eq!(session.phase(), MovePhase::Sliding);
        // Intermediate: both tiles on (0,0), score not yet banked.
        assert_eq!(session.tiles().len(), 2);
        assert!(session.tiles().iter().all(|t| t.position() == (0, 0)));
        assert_eq!(session.score(), 0);

        assert!(!session.tick(99));
        assert_eq!(session.phase(), MovePhase::Sliding);

        assert!(session.tick(1));
        assert_eq!(session.phase(), MovePhase::Settling);
        assert_eq!(session.tiles().len(), 1);
        assert_eq!(session.score(), 4);

        assert!(session.tick(50));
        assert_eq!(session.phase(), MovePhase::Idle);
        assert_eq!(session.board().len(), 2);
        assert!(session.board().tiles().iter().any(|t| t.is_new));
    }

    #[test]
    fn test_swipe_rejected_while_in_flight() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
            .with_timing(SessionTiming::default());

        assert_eq!(session.swipe(Direction::Left), SwipeOutcome::Accepted);
        assert_eq!(session.swipe(Direction::Right), SwipeOutcome::Busy);
        assert!(!session.undo());

        session.finish_move();
        assert!(!session.is_busy());
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_one_long_tick_finishes_move() {
        let mut session = session_on([[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]])
            .with_timing(SessionTiming::default());
        session.swipe(Direction::Right);
        assert!(session.tick(SLIDE_MS + SPAWN_DELAY_MS));
        assert_eq!(session.phase(), MovePhase::Idle);
    }

    #[test]
    fn test_no_move_is_not_recorded() {
        let mut session = session_on([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(session.swipe(Direction::Left), SwipeOutcome::NoMove);
        assert!(!session.can_undo());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_undo_restores_board_and_score() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = session.board().clone();

        session.swipe(Direction::Left);
        session.finish_move();
        assert_eq!(session.score(), 4);
        assert!(session.can_undo());

        assert!(session.undo());
        assert_eq!(session.board(), &before);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 4);
        assert!(!session.can_undo());
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_depth_is_one() {
        let mut session = session_on([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        session.swipe(Direction::Left);
        session.finish_move();
        let after_first = session.board().clone();

        // Second move; must be legal from whatever spawned.
        let dir = Direction::ALL
            .into_iter()
            .find(|&d| crate::engine::can_move(session.board(), d))
            .unwrap();
        session.swipe(dir);
        session.finish_move();

        assert!(session.undo());
        assert_eq!(session.board(), &after_first);
        assert!(!session.undo());
    }

    #[test]
    fn test_game_over_after_last_spawn() {
        // The last cell opens at (3,3); neither a 2 nor a 4 there can pair up.
        let mut session = session_on(LOCKING_BOARD);
        assert_eq!(session.swipe(Direction::Left), SwipeOutcome::Accepted);
        session.finish_move();
        assert!(session.game_over());
        assert!(is_terminal(session.board()));

        let events = session.take_events();
        assert_eq!(events.last(), Some(&SessionEvent::Settled { game_over: true }));
    }

    #[test]
    fn test_game_over_blocks_swipes_until_undo() {
        let mut session = session_on(LOCKING_BOARD);
        session.swipe(Direction::Left);
        session.finish_move();
        assert!(session.game_over());
        assert_eq!(session.swipe(Direction::Up), SwipeOutcome::GameOver);
        assert!(session.undo());
        assert!(!session.game_over());
    }

    #[test]
    fn test_victory_event_and_keep_playing() {
        let mut session = session_on([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        session.swipe(Direction::Left);
        session.finish_move();

        assert_eq!(session.victory(), VictoryState::Won);
        assert!(session.take_events().contains(&SessionEvent::Victory));
        assert_eq!(session.swipe(Direction::Right), SwipeOutcome::AwaitingDecision);

        assert!(session.apply_action(GameAction::KeepPlaying));
        assert_eq!(session.victory(), VictoryState::KeepPlaying);
        assert!(!session.apply_action(GameAction::KeepPlaying));
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        session.swipe(Direction::Left);
        session.finish_move();
        assert_eq!(session.high_score(), 4);

        assert!(session.apply_action(GameAction::Restart));
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 4);
        assert_eq!(session.board().len(), 2);
        assert!(!session.can_undo());
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.take_events().last(), Some(&SessionEvent::Restarted));
    }

    #[test]
    fn test_restart_cancels_in_flight_move() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
            .with_timing(SessionTiming::default());
        session.swipe(Direction::Left);
        session.restart();
        assert_eq!(session.phase(), MovePhase::Idle);
        assert!(!session.tick(1000));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_resume_terminal_save_deals_new_game() {
        let board =
            Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
        let saved = SavedGame::from_board(&board, 900, 1200);
        let session = GameSession::resume(&saved, seeded_rng(1));

        assert_eq!(session.board().len(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 1200);
    }

    #[test]
    fn test_resume_with_win_tile_keeps_playing() {
        let board = Board::from_rows([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let saved = SavedGame::from_board(&board, 20000, 20000);
        let session = GameSession::resume(&saved, seeded_rng(1));
        assert_eq!(session.victory(), VictoryState::KeepPlaying);
        assert_eq!(session.score(), 20000);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = session_on([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
            .with_timing(SessionTiming::default());
        assert!(session.snapshot().playable());

        session.swipe(Direction::Left);
        let snap = session.snapshot();
        assert_eq!(snap.phase, MovePhase::Sliding);
        assert!(!snap.playable());
        assert!(snap.can_undo);
        assert_eq!(snap.tiles.len(), 2);
    }
}
