//! The frame grid: a fixed-size buffer of styled cells.
//!
//! Every draw builds a fresh Grid from scratch; nothing persists between
//! frames inside the grid itself. The renderer consumes it row by row.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Grid width in cells.
pub const GRID_WIDTH: i32 = 80;

/// Grid height in cells.
pub const GRID_HEIGHT: i32 = 50;

// ============================================================================
// STYLE DESCRIPTORS
// ============================================================================

/// Abstract style request carried by a cell.
///
/// The theme layer resolves these to concrete terminal styles. Keys
/// without a specific mapping resolve to the fixed default
/// (white on black), so adding a variant here never breaks rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleKey {
    /// No particular request — the default resolution.
    #[default]
    Default,
    /// Floor tile.
    Floor,
    /// The player glyph.
    Player,
    /// An uncarried shard.
    Shard,
    /// A point on an etched shard connection.
    Connection,
    /// Message log text.
    Message,
}

// ============================================================================
// CELLS
// ============================================================================

/// One displayable cell: a glyph plus a style request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub style: StyleKey,
}

impl Cell {
    /// A cell with the default style.
    pub const fn new(glyph: char) -> Self {
        Cell {
            glyph,
            style: StyleKey::Default,
        }
    }

    /// A cell with an explicit style key.
    pub const fn styled(glyph: char, style: StyleKey) -> Self {
        Cell { glyph, style }
    }
}

/// Blank cell — what an untouched grid position shows.
impl Default for Cell {
    fn default() -> Self {
        Cell::new(' ')
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Fixed-size rectangular cell buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid of blank cells.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Grid {
            width: width.max(0),
            height: height.max(0),
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Overwrite every cell with the given cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, point: Point, cell: Cell) {
        if let Some(i) = self.index(point) {
            self.cells[i] = cell;
        }
    }

    /// Read a cell. None for out-of-range positions.
    pub fn get(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|i| self.cells[i])
    }

    /// Rows from top to bottom, each exactly `width` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
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
