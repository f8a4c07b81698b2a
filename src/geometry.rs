//! Grid coordinates and line tracing.
//!
//! Pure functions — no I/O, no side effects.

use serde::{Deserialize, Serialize};

/// A position on the grid. Signed so that movement deltas compose
/// without casts; the grid and map layers bounds-check on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// This point shifted by a delta. Does not clamp.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Trace the straight line between two points, endpoints included.
///
/// Bresenham over integer coordinates. Works for any slope and
/// direction; `line(a, a)` yields the single point `a`.
pub fn line(from: Point, to: Point) -> Vec<Point> {
    let mut points = Vec::new();

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = from.x;
    let mut y = from.y;

    loop {
        points.push(Point::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

// ============================================================================
// TESTS
// ============================================================================
