//! Hostiles: enemies that enter from the right edge, drift left and shoot back

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::{Direction, Projectile};
use super::rect::{Field, Rect};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub rect: Rect,
    /// Leftward drift in pixels per tick (always positive)
    pub speed: f32,
    /// Ticks until the hostile may fire; counts down every tick
    pub fire_timer: f32,
    /// Always 1: any hit destroys the hostile
    pub health: u8,
    /// Shots this hostile has fired that are still in the field
    pub shots: Vec<Projectile>,
}

impl Hostile {
    pub fn new(x: f32, y: f32, speed: f32, fire_timer: f32) -> Self {
        Self {
            rect: Rect::new(x, y, HOSTILE_SIZE, HOSTILE_SIZE),
            speed,
            fire_timer,
            health: 1,
            shots: Vec::new(),
        }
    }

    /// Spawn at the right edge with a random height, speed and first-shot delay
    pub fn spawn(field: &Field, rng: &mut impl Rng) -> Self {
        let band = (field.height - 2.0 * HOSTILE_SPAWN_MARGIN).max(0.0);
        let y = uniform(rng, HOSTILE_SPAWN_MARGIN, HOSTILE_SPAWN_MARGIN + band);
        let speed = uniform(rng, HOSTILE_MIN_SPEED, HOSTILE_MAX_SPEED);
        let fire_timer = uniform(rng, 0.0, HOSTILE_FIRST_SHOT_MAX);
        Self::new(field.width, y, speed, fire_timer)
    }

    /// Move, maybe fire, then move this hostile's shots and drop the ones
    /// that left through the left edge
    pub fn advance(&mut self, rng: &mut impl Rng) {
        self.rect.pos.x -= self.speed;

        self.fire_timer -= 1.0;
        if self.fire_timer <= 0.0 && rng.random::<f32>() < HOSTILE_FIRE_CHANCE {
            self.fire();
            self.fire_timer = uniform(rng, HOSTILE_RELOAD_MIN, HOSTILE_RELOAD_MAX);
        }

        for shot in &mut self.shots {
            shot.advance();
        }
        self.shots.retain(|shot| !shot.exited_left());
    }

    /// Fire a leftward shot from the middle of the left edge
    pub fn fire(&mut self) {
        let origin: Vec2 = self.rect.left_mid();
        log::trace!("hostile fired at ({:.1}, {:.1})", origin.x, origin.y);
        self.shots.push(Projectile::new(origin, Direction::Hostile));
    }

    /// Entirely past the left edge of the field
    pub fn is_off_screen(&self) -> bool {
        self.rect.x() < -self.rect.width()
    }
}

/// Draw from `[lo, hi)`. Float sampling can round up onto `hi`, which is
/// folded back to `lo`; an empty range yields `lo`.
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    let value = rng.random_range(lo..hi);
    if value < hi { value } else { lo }
}
