//! Fixed-step simulation tick
//!
//! Advances the world by one frame: player, spawning, hostiles, then hits.

use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionReport};
use super::hostile::Hostile;
use super::state::{GameEvent, World};
use crate::consts::SPAWN_INTERVAL_TICKS;

/// Held controls for a single tick (level-sensed, not edge-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the world by one tick. Does nothing once the run is over.
pub fn tick(world: &mut World, input: &TickInput) -> CollisionReport {
    if !world.is_running() {
        return CollisionReport::default();
    }

    world.begin_tick();

    let field = world.field;
    world.player.advance(input, &field);

    spawn_hostiles(world);
    advance_hostiles(world);

    let report = collision::resolve(world);
    if report != CollisionReport::default() {
        log::debug!(
            "tick {}: {} kills, {} shot hits, {} rams (score {}, lives {})",
            world.time_ticks,
            report.kills,
            report.shot_hits,
            report.rams,
            world.score,
            world.lives
        );
    }
    report
}

/// One hostile every time the spawn timer passes the interval
fn spawn_hostiles(world: &mut World) {
    world.spawn_timer += 1;
    if world.spawn_timer > SPAWN_INTERVAL_TICKS {
        let hostile = Hostile::spawn(&world.field, &mut world.rng);
        log::debug!(
            "spawned hostile at y={:.1} speed={:.2}",
            hostile.rect.y(),
            hostile.speed
        );
        world.hostiles.push(hostile);
        world.spawn_timer = 0;
        world.push_event(GameEvent::HostileSpawned);
    }
}

fn advance_hostiles(world: &mut World) {
    let rng = &mut world.rng;
    // Back to front, so each hostile's random draws come in a fixed order
    for hostile in world.hostiles.iter_mut().rev() {
        hostile.advance(rng);
    }
    world.hostiles.retain(|h| !h.is_off_screen());
}
