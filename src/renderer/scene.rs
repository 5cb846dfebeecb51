//! Drawable snapshot of the world, handed to a render sink once per tick
//!
//! Draw order: background, player, player shots, then each hostile followed
//! by its own shots.

use glam::Vec2;

use crate::consts::GROUND_HEIGHT;
use crate::sim::{Field, Rect, Tag, World};

/// Number of clouds drifting across the sky
pub const CLOUD_COUNT: usize = 3;
/// Horizontal cloud spacing at time zero
const CLOUD_SPACING: f32 = 300.0;
/// Cloud drift in pixels per millisecond of wall clock
const CLOUD_DRIFT: f64 = 0.02;

/// What a drawable depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Player,
    Hostile,
    Shot(Tag),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub rect: Rect,
    pub kind: DrawKind,
}

/// Scenery behind the entities
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    /// Ground strip along the bottom edge
    pub ground: Rect,
    /// Cloud anchor points (left puff centre)
    pub clouds: [Vec2; CLOUD_COUNT],
}

impl Background {
    /// Clouds scroll with the wall clock, not the simulation
    pub fn at(field: &Field, clock_ms: f64) -> Self {
        let wrap = (field.width + 100.0) as f64;
        let clouds = std::array::from_fn(|i| {
            let x = ((i as f64 * CLOUD_SPACING as f64 + clock_ms * CLOUD_DRIFT) % wrap) - 50.0;
            Vec2::new(x as f32, 50.0 + i as f32 * 30.0)
        });
        Self {
            ground: Rect::new(0.0, field.height - GROUND_HEIGHT, field.width, GROUND_HEIGHT),
            clouds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub field: Field,
    pub background: Background,
    pub drawables: Vec<Drawable>,
}

impl Scene {
    pub fn capture(world: &World, clock_ms: f64) -> Self {
        let mut drawables = Vec::with_capacity(1 + world.hostiles.len() + world.shot_count());

        drawables.push(Drawable {
            rect: world.player.rect,
            kind: DrawKind::Player,
        });
        drawables.extend(world.player.shots.iter().map(|s| Drawable {
            rect: s.rect,
            kind: DrawKind::Shot(s.tag()),
        }));

        for hostile in &world.hostiles {
            drawables.push(Drawable {
                rect: hostile.rect,
                kind: DrawKind::Hostile,
            });
            drawables.extend(hostile.shots.iter().map(|s| Drawable {
                rect: s.rect,
                kind: DrawKind::Shot(s.tag()),
            }));
        }

        Self {
            field: world.field,
            background: Background::at(&world.field, clock_ms),
            drawables,
        }
    }

    pub fn count(&self, kind: DrawKind) -> usize {
        self.drawables.iter().filter(|d| d.kind == kind).count()
    }
}

/// Consumes one scene per tick; produces nothing back to the simulation
pub trait RenderSink {
    fn present(&mut self, scene: &Scene);
}
