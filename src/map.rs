//! The tile layer: floor and wall terrain under everything else.
//!
//! The default map is open floor, so the rendered tile layer alone is the
//! uniform `.`-filled grid; walls render blank and block movement.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::grid::{Cell, Grid, StyleKey};

/// Glyph for a floor tile.
pub const FLOOR_GLYPH: char = '.';

/// One terrain tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
}

impl Tile {
    /// Whether entities can stand on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

/// Rectangular tile buffer, row-major, same coordinate space as [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// An all-floor map.
    pub fn open(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        TileMap {
            width: width.max(0),
            height: height.max(0),
            tiles: vec![Tile::Floor; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile at a position. None out of range.
    pub fn get(&self, point: Point) -> Option<Tile> {
        self.index(point).map(|i| self.tiles[i])
    }

    /// Replace a tile. Out-of-range positions are ignored.
    pub fn set(&mut self, point: Point, tile: Tile) {
        if let Some(i) = self.index(point) {
            self.tiles[i] = tile;
        }
    }

    /// Walkability check; out-of-range counts as not walkable.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.get(point).is_some_and(Tile::is_walkable)
    }

    /// Paint the tile layer into a grid: floor as `.`, wall as blank.
    pub fn render_into(&self, grid: &mut Grid) {
        for y in 0..self.height {
            for x in 0..self.width {
                let point = Point::new(x, y);
                let cell = match self.get(point) {
                    Some(Tile::Floor) => Cell::styled(FLOOR_GLYPH, StyleKey::Floor),
                    Some(Tile::Wall) | None => Cell::default(),
                };
                grid.set(point, cell);
            }
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.x >= self.width || point.y < 0 || point.y >= self.height {
            return None;
        }
        Some((point.y as usize) * (self.width as usize) + point.x as usize)
    }
}

// ============================================================================
// TESTS
// ============================================================================
