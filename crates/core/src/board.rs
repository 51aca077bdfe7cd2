//! Board module - the 4x4 grid of numbered tiles
//!
//! The board is stored as an inline list of at most 16 tiles rather than a
//! grid of cells, because tiles carry an identity that survives moves (the UI
//! follows ids to animate slides). Lookups by coordinate build a small grid on
//! demand.
//!
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom)

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::{BOARD_SIZE, CELL_COUNT, MAX_TILE};

/// Stable tile identity, assigned at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u64);

/// A numbered tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Power of two, at least 2
    pub value: u64,
    pub x: u8,
    pub y: u8,
    /// Set only during the move in which the tile was spawned
    pub is_new: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u64, x: u8, y: u8) -> Self {
        Self {
            id,
            value,
            x,
            y,
            is_new: false,
        }
    }

    /// A freshly spawned tile
    pub fn spawned(id: TileId, value: u64, x: u8, y: u8) -> Self {
        Self {
            is_new: true,
            ..Self::new(id, value, x, y)
        }
    }

    /// Same tile relocated to (x, y)
    pub fn at(self, x: u8, y: u8) -> Self {
        Self { x, y, ..self }
    }

    pub fn position(&self) -> (u8, u8) {
        (self.x, self.y)
    }
}

/// Inline tile storage; also used for the intermediate board, where two
/// tiles may share a cell at each merge point.
pub type TileList = ArrayVec<Tile, CELL_COUNT>;

/// Lookup grid, indexed `[y][x]`
pub type Grid = [[Option<Tile>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// A validated board: every tile inside the grid, no two tiles on the same
/// cell, no two tiles with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    tiles: TileList,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            tiles: TileList::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: u8, y: u8) -> Option<usize> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return None;
        }
        Some((y as usize) * (BOARD_SIZE as usize) + (x as usize))
    }

    /// Build a board from arbitrary tiles, rejecting anything that breaks the
    /// board invariants. Values above [`MAX_TILE`] are rejected.
    pub fn from_tiles<I>(tiles: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Tile>,
    {
        Self::validate(tiles, MAX_TILE)
    }

    fn validate<I>(tiles: I, max_value: u64) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut occupied = [false; CELL_COUNT];
        let mut out = TileList::new();

        for tile in tiles {
            let idx = Self::index(tile.x, tile.y).ok_or(BoardError::OutOfBounds {
                x: tile.x,
                y: tile.y,
            })?;
            if occupied[idx] {
                // Also guards capacity: a 17th tile must collide.
                return Err(BoardError::DuplicateCell {
                    x: tile.x,
                    y: tile.y,
                });
            }
            if tile.value < 2 || tile.value > max_value || !tile.value.is_power_of_two() {
                return Err(BoardError::InvalidValue { value: tile.value });
            }
            if out.iter().any(|t| t.id == tile.id) {
                return Err(BoardError::DuplicateId(tile.id));
            }
            occupied[idx] = true;
            out.push(tile);
        }

        Ok(Self { tiles: out })
    }

    /// Build a board from a value grid (`rows[y][x]`, 0 = empty).
    ///
    /// Tiles get sequential ids in row-major order starting at 1.
    pub fn from_rows(
        rows: [[u64; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    ) -> Result<Self, BoardError> {
        let tiles = rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(x, &value)| (x as u8, y as u8, value))
        });

        Self::from_tiles(
            tiles
                .enumerate()
                .map(|(i, (x, y, value))| Tile::new(TileId(i as u64 + 1), value, x, y)),
        )
    }

    /// Wrap tiles produced by the engine, which upholds the invariants itself.
    ///
    /// Merges may grow a tile past [`MAX_TILE`], so only the layout is checked.
    pub(crate) fn from_trusted(tiles: TileList) -> Self {
        debug_assert!(Self::validate(tiles.iter().copied(), u64::MAX).is_ok());
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> TileList {
        self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == CELL_COUNT
    }

    /// Get the tile at position (x, y)
    pub fn get(&self, x: u8, y: u8) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.x == x && t.y == y)
    }

    pub fn is_occupied(&self, x: u8, y: u8) -> bool {
        self.get(x, y).is_some()
    }

    /// Tiles laid out by coordinate, indexed `[y][x]`
    pub fn grid(&self) -> Grid {
        let mut grid: Grid = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for tile in &self.tiles {
            grid[tile.y as usize][tile.x as usize] = Some(*tile);
        }
        grid
    }

    /// Tile values by coordinate, indexed `[y][x]`, 0 for empty cells
    pub fn values(&self) -> [[u64; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut values = [[0; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for tile in &self.tiles {
            values[tile.y as usize][tile.x as usize] = tile.value;
        }
        values
    }

    /// Empty coordinates in row-major order
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), CELL_COUNT> {
        let mut occupied = [false; CELL_COUNT];
        for tile in &self.tiles {
            if let Some(idx) = Self::index(tile.x, tile.y) {
                occupied[idx] = true;
            }
        }

        let mut cells = ArrayVec::new();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if !occupied[(y as usize) * (BOARD_SIZE as usize) + (x as usize)] {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Largest tile value, 0 on an empty board
    pub fn max_value(&self) -> u64 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn total_value(&self) -> u64 {
        self.tiles.iter().map(|t| t.value).sum()
    }

    /// Same tiles at the same coordinates, ignoring ids, flags and order
    pub fn same_layout(&self, other: &Board) -> bool {
        self.values() == other.values()
    }
}
