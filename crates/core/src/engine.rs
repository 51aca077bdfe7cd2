//! Move engine - slide and merge tiles for one swipe
//!
//! Every function here is pure: it takes a board snapshot and returns new data.
//! A move produces two boards so a front end can animate it in two phases:
//!
//! - the **intermediate** list, where every tile already sits at its
//!   destination with its old value (two tiles share a cell at each merge), and
//! - the **final** board, where each merge pair collapsed into one tile of
//!   double value.
//!
//! Each of the four lines along the swipe axis is read from the leading edge
//! (the side tiles slide toward) to the trailing edge. Adjacent equal values in
//! that order merge, and a tile takes part in at most one merge per move.

use arrayvec::ArrayVec;

use crate::board::{Board, Grid, Tile, TileList};
use crate::types::{Direction, BOARD_SIZE};

const LINE_LEN: usize = BOARD_SIZE as usize;

/// Outcome of [`compute_move`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Tiles at their destinations before merges resolve; values unchanged
    pub intermediate: TileList,
    /// Board after merges; `is_new` cleared on every tile
    pub board: Board,
    /// Sum of the values created by merges
    pub score_delta: u64,
    /// True if any tile changed position or merged
    pub moved: bool,
}

impl MoveResult {
    /// Number of merges performed
    pub fn merge_count(&self) -> usize {
        self.intermediate.len() - self.board.len()
    }
}

/// Value produced by merging `a` into `b`, if they can merge
#[inline]
fn merged_value(a: &Tile, b: &Tile) -> Option<u64> {
    // Input tiles are at most MAX_TILE, so doubling stays inside u64.
    (a.value == b.value).then(|| a.value * 2)
}

/// Coordinates of one line, leading edge first
fn line_cells(direction: Direction, line: u8) -> [(u8, u8); LINE_LEN] {
    let mut cells = [(0, 0); LINE_LEN];
    for (k, cell) in cells.iter_mut().enumerate() {
        let along = if direction.toward_origin() {
            k as u8
        } else {
            BOARD_SIZE - 1 - k as u8
        };
        *cell = if direction.is_horizontal() {
            (along, line)
        } else {
            (line, along)
        };
    }
    cells
}

/// Occupied tiles of a line in leading-to-trailing order
fn extract_line(grid: &Grid, cells: &[(u8, u8); LINE_LEN]) -> ArrayVec<Tile, LINE_LEN> {
    cells
        .iter()
        .filter_map(|&(x, y)| grid[y as usize][x as usize])
        .collect()
}

/// Slide every tile toward `direction`'s leading edge and merge equal neighbors.
///
/// Total: any valid board and direction yields a result. When nothing can
/// move, `moved` is false and the final board has the input's layout.
pub fn compute_move(board: &Board, direction: Direction) -> MoveResult {
    let grid = board.grid();
    let mut intermediate = TileList::new();
    let mut merged = TileList::new();
    let mut score_delta: u64 = 0;
    let mut moved = false;

    for line in 0..BOARD_SIZE {
        let cells = line_cells(direction, line);
        let tiles = extract_line(&grid, &cells);

        let mut cursor = 0;
        let mut k = 0;
        while k < tiles.len() {
            let current = tiles[k];
            let (x, y) = cells[cursor];

            let merge = tiles
                .get(k + 1)
                .and_then(|next| merged_value(&current, next).map(|value| (*next, value)));

            match merge {
                Some((next, value)) => {
                    intermediate.push(current.at(x, y));
                    intermediate.push(next.at(x, y));
                    // The leading tile keeps its identity; `next` is consumed.
                    merged.push(Tile {
                        value,
                        is_new: false,
                        ..current.at(x, y)
                    });
                    score_delta = score_delta.saturating_add(value);
                    moved = true;
                    k += 2;
                }
                None => {
                    if current.position() != (x, y) {
                        moved = true;
                    }
                    intermediate.push(current.at(x, y));
                    merged.push(Tile {
                        is_new: false,
                        ..current.at(x, y)
                    });
                    k += 1;
                }
            }
            cursor += 1;
        }
    }

    MoveResult {
        intermediate,
        board: Board::from_trusted(merged),
        score_delta,
        moved,
    }
}

/// Check if a swipe in `direction` would change the board
pub fn can_move(board: &Board, direction: Direction) -> bool {
    compute_move(board, direction).moved
}

/// Check if any direction changes the board
///
/// Differs from `!is_terminal` only on the empty board, where nothing moves.
pub fn has_any_move(board: &Board) -> bool {
    Direction::ALL.iter().any(|&dir| can_move(board, dir))
}

/// Game over: the board is full and no two orthogonal neighbors can merge.
///
/// Adjacency is symmetric, so each cell only checks its right and down
/// neighbors.
pub fn is_terminal(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }

    let grid = board.grid();
    let n = BOARD_SIZE as usize;
    for y in 0..n {
        for x in 0..n {
            let Some(tile) = grid[y][x] else {
                continue;
            };
            let right = if x + 1 < n { grid[y][x + 1] } else { None };
            let down = if y + 1 < n { grid[y + 1][x] } else { None };

            let mergeable = |other: Option<Tile>| {
                other.is_some_and(|o| merged_value(&tile, &o).is_some())
            };
            if mergeable(right) || mergeable(down) {
                return false;
            }
        }
    }

    true
}
