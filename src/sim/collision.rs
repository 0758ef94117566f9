//! Axis-aligned bounding-box collision
//!
//! Every pairwise interaction in the game goes through [`overlaps`]. The
//! entity counts are small enough that brute-force pair testing is fine;
//! no spatial index is needed.

use glam::Vec2;

/// A rectangle in world coordinates. Top is the smaller y (y grows down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.x,
            top: pos.y,
            bottom: pos.y + size.y,
        }
    }
}

/// Separating-axis overlap test. Edge-touching rectangles (shared
/// boundary, zero-area overlap) count as colliding.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(b.left > a.right || b.right < a.left || b.top > a.bottom || b.bottom < a.top)
}
