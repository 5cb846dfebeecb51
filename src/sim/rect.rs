//! Axis-aligned rectangles and the overlap test
//!
//! Every entity in the field is a rectangle with its origin at the top-left
//! corner. Width and height never change after construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield dimensions, fixed for the lifetime of a world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: crate::consts::FIELD_WIDTH,
            height: crate::consts::FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Point halfway down the left edge
    pub fn left_mid(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0)
    }

    /// Point halfway down the right edge
    pub fn right_mid(&self) -> Vec2 {
        Vec2::new(self.right(), self.pos.y + self.size.y / 2.0)
    }

    /// Strict overlap on both axes; rectangles that only touch do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x() < other.right()
            && self.right() > other.x()
            && self.y() < other.bottom()
            && self.bottom() > other.y()
    }

    /// Clamp the position so the whole rectangle lies inside the field
    pub fn clamp_to(&mut self, field: &Field) {
        let max_x = (field.width - self.size.x).max(0.0);
        let max_y = (field.height - self.size.y).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }
}

/// Check whether two rectangles overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}
