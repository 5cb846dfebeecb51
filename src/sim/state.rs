//! World state and core simulation types
//!
//! One `World` owns everything that changes from tick to tick. It is reset in
//! place on restart, never rebuilt.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hostile::Hostile;
use super::player::Player;
use super::rect::Field;
use crate::consts::STARTING_LIVES;

/// Run state of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are processed
    Running,
    /// All lives lost; ticks are ignored until reset
    Over,
}

/// Something observable happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    HostileSpawned,
    HostileDestroyed,
    ScoreChanged { score: u64 },
    LivesChanged { lives: i32 },
    GameOver { final_score: u64 },
    Reset,
}

#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Seed the RNG was created from
    pub seed: u64,
    pub field: Field,
    pub phase: GamePhase,
    pub score: u64,
    /// Can drop below zero when several hits land in the final tick
    pub lives: i32,
    /// Ticks since the last hostile spawn
    pub spawn_timer: u32,
    /// Ticks processed since the last reset
    pub time_ticks: u64,
    pub player: Player,
    pub hostiles: Vec<Hostile>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl World {
    /// Create a new world with the given seed
    pub fn new(field: Field, seed: u64) -> Self {
        let mut world = Self::with_rng(field, Pcg32::seed_from_u64(seed));
        world.seed = seed;
        world
    }

    /// Create a world that draws all randomness from `rng`
    pub fn with_rng(field: Field, rng: Pcg32) -> Self {
        Self {
            seed: 0,
            field,
            phase: GamePhase::Running,
            score: 0,
            lives: STARTING_LIVES,
            spawn_timer: 0,
            time_ticks: 0,
            player: Player::new(&field),
            hostiles: Vec::new(),
            rng,
            events: Vec::new(),
        }
    }

    /// Return to the initial running state. The RNG keeps its stream so a
    /// restarted run does not replay the previous one.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.spawn_timer = 0;
        self.time_ticks = 0;
        self.player.reset(&self.field);
        self.hostiles.clear();
        self.events.clear();
        self.push_event(GameEvent::Reset);
        self.push_event(GameEvent::ScoreChanged { score: 0 });
        self.push_event(GameEvent::LivesChanged {
            lives: STARTING_LIVES,
        });
        log::info!("World reset");
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Lives as shown to the player (never negative)
    pub fn display_lives(&self) -> i32 {
        self.lives.max(0)
    }

    /// Total projectiles in flight from every owner
    pub fn shot_count(&self) -> usize {
        self.player.shots.len() + self.hostiles.iter().map(|h| h.shots.len()).sum::<usize>()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start a new tick. Events left over from the previous tick are
    /// discarded, so callers that never drain do not accumulate them.
    pub(crate) fn begin_tick(&mut self) {
        self.time_ticks += 1;
        self.events.clear();
    }

    /// Take the events recorded since the current tick began (or since the
    /// last reset, if no tick has run since)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points for a destroyed hostile
    pub(crate) fn award(&mut self, points: u64) {
        self.score += points;
        self.push_event(GameEvent::HostileDestroyed);
        self.push_event(GameEvent::ScoreChanged { score: self.score });
    }

    /// Take one life; the first time lives reach zero the run ends
    pub(crate) fn damage_player(&mut self) {
        self.lives -= 1;
        self.push_event(GameEvent::LivesChanged { lives: self.lives });
        if self.lives <= 0 && self.phase == GamePhase::Running {
            self.phase = GamePhase::Over;
            self.push_event(GameEvent::GameOver {
                final_score: self.score,
            });
            log::info!(
                "Game over after {} ticks, final score {}",
                self.time_ticks,
                self.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_world() {
        let world = World::new(Field::new(800.0, 600.0), 42);
        assert_eq!(world.seed, 42);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, 3);
        assert_eq!(world.spawn_timer, 0);
        assert!(world.hostiles.is_empty());
        assert_eq!(world.player.rect.pos, Vec2::new(50.0, 520.0));
    }

    #[test]
    fn test_damage_transitions_once() {
        let mut world = World::new(Field::default(), 1);
        world.damage_player();
        world.damage_player();
        assert!(world.is_running());
        world.damage_player();
        assert_eq!(world.phase, GamePhase::Over);
        world.damage_player();
        assert_eq!(world.lives, -1);
        assert_eq!(world.display_lives(), 0);

        let overs = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_award_emits_score() {
        let mut world = World::new(Field::default(), 1);
        world.award(100);
        assert_eq!(world.score, 100);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::HostileDestroyed, GameEvent::ScoreChanged { score: 100 }]
        );
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut world = World::new(Field::default(), 9);
        world.score = 700;
        world.lives = 0;
        world.phase = GamePhase::Over;
        world.spawn_timer = 33;
        world.player.rect.pos = Vec2::new(400.0, 100.0);
        world.player.try_fire();
        world.hostiles.push(Hostile::new(500.0, 100.0, 2.0, 10.0));

        world.reset();

        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, 3);
        assert_eq!(world.spawn_timer, 0);
        assert!(world.hostiles.is_empty());
        assert_eq!(world.shot_count(), 0);
        assert_eq!(world.player.rect.pos, Vec2::new(50.0, 520.0));
        assert_eq!(world.drain_events()[0], GameEvent::Reset);
    }
}
