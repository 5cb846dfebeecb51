//! Hit resolution between the player, hostiles and their projectiles
//!
//! Three phases run in a fixed order every tick:
//! 1. player shots against hostiles
//! 2. hostile shots against the player
//! 3. hostiles ramming the player
//!
//! Lists are scanned from the back so removing the current element never
//! disturbs the ones still to be visited. A projectile is spent on its first
//! hit.

use serde::Serialize;

use super::state::World;
use crate::consts::KILL_SCORE;

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollisionReport {
    /// Hostiles destroyed by player shots
    pub kills: u32,
    /// Hostile shots that hit the player
    pub shot_hits: u32,
    /// Hostiles that flew into the player
    pub rams: u32,
}

impl CollisionReport {
    pub fn player_damage(&self) -> u32 {
        self.shot_hits + self.rams
    }
}

/// Run all three phases against the world
pub fn resolve(world: &mut World) -> CollisionReport {
    let kills = player_shots_vs_hostiles(world);
    let shot_hits = hostile_shots_vs_player(world);
    let rams = hostiles_vs_player(world);
    CollisionReport {
        kills,
        shot_hits,
        rams,
    }
}

/// Each player shot destroys at most one hostile, the last one in the list
/// that it overlaps
fn player_shots_vs_hostiles(world: &mut World) -> u32 {
    let mut kills = 0;
    for i in (0..world.player.shots.len()).rev() {
        let shot = world.player.shots[i].rect;
        if let Some(j) = world.hostiles.iter().rposition(|h| shot.overlaps(&h.rect)) {
            world.player.shots.remove(i);
            let hostile = world.hostiles.remove(j);
            log::trace!(
                "hostile destroyed at ({:.1}, {:.1})",
                hostile.rect.x(),
                hostile.rect.y()
            );
            world.award(KILL_SCORE);
            kills += 1;
        }
    }
    kills
}

/// Each hostile loses at most one shot to the player per tick
fn hostile_shots_vs_player(world: &mut World) -> u32 {
    let player = world.player.rect;
    let mut hits = 0;
    for i in (0..world.hostiles.len()).rev() {
        let shots = &mut world.hostiles[i].shots;
        if let Some(j) = shots.iter().rposition(|s| s.rect.overlaps(&player)) {
            shots.remove(j);
            world.damage_player();
            hits += 1;
        }
    }
    hits
}

/// Every hostile touching the player is destroyed and costs a life
fn hostiles_vs_player(world: &mut World) -> u32 {
    let player = world.player.rect;
    let before = world.hostiles.len();
    world.hostiles.retain(|h| !h.rect.overlaps(&player));
    let rams = (before - world.hostiles.len()) as u32;
    for _ in 0..rams {
        world.damage_player();
    }
    rams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hostile::Hostile;
    use crate::sim::projectile::{Direction, Projectile};
    use crate::sim::rect::Field;
    use crate::sim::state::{GameEvent, GamePhase};
    use glam::Vec2;

    fn world() -> World {
        let mut w = World::new(Field::new(800.0, 600.0), 1);
        // Park the player away from everything unless a test moves it
        w.player.rect.pos = Vec2::new(0.0, 0.0);
        w
    }

    fn friendly(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), Direction::Friendly)
    }

    fn hostile_shot(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), Direction::Hostile)
    }

    #[test]
    fn test_shot_kills_hostile() {
        let mut w = world();
        w.player.shots.push(friendly(100.0, 100.0));
        w.hostiles.push(Hostile::new(98.0, 98.0, 3.0, 50.0));

        let report = resolve(&mut w);
        assert_eq!(report.kills, 1);
        assert_eq!(w.score, 100);
        assert!(w.player.shots.is_empty());
        assert!(w.hostiles.is_empty());
    }

    #[test]
    fn test_one_shot_one_kill() {
        let mut w = world();
        w.player.shots.push(friendly(300.0, 300.0));
        // Two hostiles stacked on the same shot
        w.hostiles.push(Hostile::new(290.0, 290.0, 2.0, 50.0));
        w.hostiles.push(Hostile::new(295.0, 295.0, 2.0, 50.0));

        let report = resolve(&mut w);
        assert_eq!(report.kills, 1);
        assert_eq!(w.score, 100);
        assert_eq!(w.hostiles.len(), 1);
        // The later hostile in the list is hit first
        assert_eq!(w.hostiles[0].rect.x(), 290.0);
    }

    #[test]
    fn test_many_shots_score_once_each() {
        let mut w = world();
        w.player.shots.push(friendly(100.0, 100.0));
        w.hostiles.push(Hostile::new(98.0, 98.0, 3.0, 50.0));
        for k in 0..3 {
            let y = 200.0 + k as f32 * 100.0;
            w.player.shots.push(friendly(500.0, y + 5.0));
            w.hostiles.push(Hostile::new(495.0, y, 3.0, 50.0));
        }
        // A shot with nothing to hit survives
        w.player.shots.push(friendly(700.0, 20.0));

        let report = resolve(&mut w);
        assert_eq!(report.kills, 4);
        assert_eq!(w.score, 400);
        assert!(w.hostiles.is_empty());
        assert_eq!(w.player.shots.len(), 1);
    }

    #[test]
    fn test_kill_removes_hostile_shots() {
        let mut w = world();
        let mut h = Hostile::new(400.0, 300.0, 2.0, 50.0);
        h.shots.push(hostile_shot(200.0, 310.0));
        w.hostiles.push(h);
        w.player.shots.push(friendly(405.0, 305.0));

        resolve(&mut w);
        assert_eq!(w.shot_count(), 0);
    }

    #[test]
    fn test_hostile_shot_hits_player_once_per_hostile() {
        let mut w = world();
        w.player.rect.pos = Vec2::new(100.0, 100.0);
        let mut h = Hostile::new(600.0, 100.0, 2.0, 50.0);
        h.shots.push(hostile_shot(110.0, 110.0));
        h.shots.push(hostile_shot(120.0, 120.0));
        w.hostiles.push(h);

        let report = resolve(&mut w);
        assert_eq!(report.shot_hits, 1);
        assert_eq!(w.lives, 2);
        assert_eq!(w.hostiles[0].shots.len(), 1);
        // Scanned from the back: the second shot was spent
        assert_eq!(w.hostiles[0].shots[0].rect.x(), 110.0);
    }

    #[test]
    fn test_ram_costs_a_life_each() {
        let mut w = world();
        w.player.rect.pos = Vec2::new(100.0, 100.0);
        w.hostiles.push(Hostile::new(110.0, 110.0, 2.0, 50.0));
        w.hostiles.push(Hostile::new(90.0, 90.0, 2.0, 50.0));
        w.hostiles.push(Hostile::new(600.0, 400.0, 2.0, 50.0));

        let report = resolve(&mut w);
        assert_eq!(report.rams, 2);
        assert_eq!(w.lives, 1);
        assert_eq!(w.hostiles.len(), 1);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn test_final_tick_keeps_counting_hits() {
        let mut w = world();
        w.lives = 1;
        w.player.rect.pos = Vec2::new(100.0, 100.0);
        let mut shooter = Hostile::new(600.0, 400.0, 2.0, 50.0);
        shooter.shots.push(hostile_shot(105.0, 105.0));
        w.hostiles.push(shooter);
        w.hostiles.push(Hostile::new(110.0, 110.0, 2.0, 50.0));

        let report = resolve(&mut w);
        assert_eq!(report.player_damage(), 2);
        assert_eq!(w.phase, GamePhase::Over);
        assert_eq!(w.lives, -1);
        let overs: Vec<_> = w
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs, vec![GameEvent::GameOver { final_score: 0 }]);
    }

    #[test]
    fn test_phase_order_kill_before_ram() {
        // A shot kills the hostile before it can ram the player
        let mut w = world();
        w.player.rect.pos = Vec2::new(100.0, 100.0);
        w.hostiles.push(Hostile::new(120.0, 100.0, 2.0, 50.0));
        w.player.shots.push(friendly(130.0, 110.0));

        let report = resolve(&mut w);
        assert_eq!(report.kills, 1);
        assert_eq!(report.rams, 0);
        assert_eq!(w.lives, 3);
    }
}
