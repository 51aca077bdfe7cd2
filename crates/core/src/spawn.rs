//! Spawn module - random tile placement
//!
//! New tiles land on a uniformly random empty cell and are worth 2 (90%) or
//! 4 (10%). The random source is always passed in, so a seeded generator
//! reproduces a game exactly while production play draws from entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Tile, TileId};
use crate::types::{INITIAL_TILES, SPAWN_HIGH, SPAWN_HIGH_PROBABILITY, SPAWN_LOW};

/// Deterministic generator for a given seed
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Fresh seed from the thread-local generator
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Value of a newly spawned tile
pub fn spawn_value<R: Rng>(rng: &mut R) -> u64 {
    if rng.random_bool(SPAWN_HIGH_PROBABILITY) {
        SPAWN_HIGH
    } else {
        SPAWN_LOW
    }
}

/// Random id not already used on the board
fn fresh_id<R: Rng>(tiles: &[Tile], rng: &mut R) -> TileId {
    loop {
        let id = TileId(rng.random());
        if !tiles.iter().any(|t| t.id == id) {
            return id;
        }
    }
}

/// Add up to `count` tiles on distinct random empty cells.
///
/// Spawns as many as fit when fewer cells are free; `count == 0` and a full
/// board leave the board unchanged. Spawned tiles are flagged `is_new`.
pub fn spawn_tiles<R: Rng>(board: &Board, count: usize, rng: &mut R) -> Board {
    let mut empty = board.empty_cells();
    if count == 0 || empty.is_empty() {
        return board.clone();
    }

    let mut tiles = board.clone().into_tiles();
    for _ in 0..count {
        if empty.is_empty() {
            break;
        }
        let (x, y) = empty.swap_remove(rng.random_range(0..empty.len()));
        let value = spawn_value(rng);
        let id = fresh_id(&tiles, rng);
        tiles.push(Tile::spawned(id, value, x, y));
    }

    Board::from_trusted(tiles)
}

/// Opening position: an empty board with the initial deal
pub fn deal_new_game<R: Rng>(rng: &mut R) -> Board {
    spawn_tiles(&Board::new(), INITIAL_TILES, rng)
}
