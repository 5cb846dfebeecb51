//! Projectiles fired by the player and by hostiles
//!
//! A projectile only moves horizontally. The sign of its speed says who
//! fired it; there is no back-reference to the owner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Field, Rect};
use crate::consts::{SHOT_HEIGHT, SHOT_SPEED, SHOT_WIDTH};

/// Direction of travel, chosen by whoever fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Rightward, fired by the player
    Friendly,
    /// Leftward, fired by a hostile
    Hostile,
}

impl Direction {
    /// +1 for rightward, -1 for leftward
    pub fn sign(self) -> f32 {
        match self {
            Direction::Friendly => 1.0,
            Direction::Hostile => -1.0,
        }
    }
}

/// Visual tag derived from the sign of the velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Friendly,
    Hostile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Horizontal velocity in pixels per tick (signed)
    pub speed: f32,
}

impl Projectile {
    /// Create a projectile with its top-left corner at `origin`
    pub fn new(origin: Vec2, direction: Direction) -> Self {
        Self {
            rect: Rect::new(origin.x, origin.y, SHOT_WIDTH, SHOT_HEIGHT),
            speed: SHOT_SPEED * direction.sign(),
        }
    }

    pub fn tag(&self) -> Tag {
        if self.speed > 0.0 {
            Tag::Friendly
        } else {
            Tag::Hostile
        }
    }

    pub fn advance(&mut self) {
        self.rect.pos.x += self.speed;
    }

    /// Past the left edge of the field
    pub fn exited_left(&self) -> bool {
        self.rect.x() < 0.0
    }

    /// Past the right edge of the field
    pub fn exited_right(&self, field: &Field) -> bool {
        self.rect.x() > field.width
    }
}
