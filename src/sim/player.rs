//! The player-controlled shooter

use serde::{Deserialize, Serialize};

use super::projectile::{Direction, Projectile};
use super::rect::{Field, Rect};
use super::tick::TickInput;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    /// Player shots still in the field
    pub shots: Vec<Projectile>,
}

impl Player {
    pub fn new(field: &Field) -> Self {
        let start = Self::start_position(field);
        Self {
            rect: Rect::new(start.0, start.1, PLAYER_SIZE, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            cooldown: 0,
            shots: Vec::new(),
        }
    }

    fn start_position(field: &Field) -> (f32, f32) {
        (PLAYER_START_X, field.height - PLAYER_START_BOTTOM_OFFSET)
    }

    /// Move back to the start position with no shots in flight
    pub fn reset(&mut self, field: &Field) {
        let (x, y) = Self::start_position(field);
        self.rect.pos.x = x;
        self.rect.pos.y = y;
        self.cooldown = 0;
        self.shots.clear();
    }

    /// One tick of player update: steer, fire, cool down, move shots
    pub fn advance(&mut self, input: &TickInput, field: &Field) {
        self.steer(input, field);
        if input.fire {
            self.try_fire();
        }
        self.cool_down();
        self.advance_shots(field);
    }

    /// Apply held direction keys, keeping the player inside the field
    pub fn steer(&mut self, input: &TickInput, field: &Field) {
        let pos = &mut self.rect.pos;
        if input.left {
            pos.x -= self.speed;
        }
        if input.right {
            pos.x += self.speed;
        }
        if input.up {
            pos.y -= self.speed;
        }
        if input.down {
            pos.y += self.speed;
        }
        self.rect.clamp_to(field);
    }

    /// Fire from the middle of the right edge if the cooldown allows.
    /// Returns true when a shot was fired.
    pub fn try_fire(&mut self) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        self.shots
            .push(Projectile::new(self.rect.right_mid(), Direction::Friendly));
        self.cooldown = FIRE_COOLDOWN_TICKS;
        true
    }

    pub fn cool_down(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    fn advance_shots(&mut self, field: &Field) {
        for shot in &mut self.shots {
            shot.advance();
        }
        self.shots.retain(|shot| !shot.exited_right(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_start_position() {
        let p = Player::new(&field());
        assert_eq!(p.rect.pos, Vec2::new(50.0, 520.0));
        assert_eq!(p.rect.width(), 40.0);
        assert_eq!(p.cooldown, 0);
    }

    #[test]
    fn test_fire_spawns_at_right_edge_and_sets_cooldown() {
        let mut p = Player::new(&field());
        assert!(p.try_fire());
        assert_eq!(p.shots.len(), 1);
        assert_eq!(p.shots[0].rect.pos, Vec2::new(90.0, 540.0));
        assert!(p.shots[0].speed > 0.0);
        assert_eq!(p.cooldown, 10);

        assert!(!p.try_fire());
        assert_eq!(p.shots.len(), 1);
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let f = field();
        let mut p = Player::new(&f);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };

        p.advance(&input, &f);
        assert_eq!(p.shots.len(), 1);
        // Shot moved once during the tick it was fired
        assert_eq!(p.shots[0].rect.x(), 98.0);
        assert_eq!(p.cooldown, 9);

        for _ in 0..9 {
            p.advance(&input, &f);
        }
        assert_eq!(p.shots.len(), 1);

        p.advance(&input, &f);
        assert_eq!(p.shots.len(), 2);
    }

    #[test]
    fn test_shots_removed_past_right_edge() {
        let f = field();
        let mut p = Player::new(&f);
        p.try_fire();
        // 90 -> 802 takes 89 advances
        for _ in 0..88 {
            p.advance(&TickInput::default(), &f);
        }
        assert_eq!(p.shots.len(), 1);
        p.advance(&TickInput::default(), &f);
        assert!(p.shots.is_empty());
    }

    #[test]
    fn test_movement_is_clamped() {
        let f = field();
        let mut p = Player::new(&f);
        let left_down = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..50 {
            p.advance(&left_down, &f);
        }
        assert_eq!(p.rect.pos, Vec2::new(0.0, 560.0));

        let right_up = TickInput {
            right: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..500 {
            p.advance(&right_up, &f);
        }
        assert_eq!(p.rect.pos, Vec2::new(760.0, 0.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let f = field();
        let mut p = Player::new(&f);
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        p.advance(&input, &f);
        assert_eq!(p.rect.x(), 50.0);
    }

    #[test]
    fn test_reset() {
        let f = field();
        let mut p = Player::new(&f);
        p.rect.pos = Vec2::new(300.0, 10.0);
        p.try_fire();
        p.reset(&f);
        assert_eq!(p.rect.pos, Vec2::new(50.0, 520.0));
        assert!(p.shots.is_empty());
        assert_eq!(p.cooldown, 0);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, fire)| TickInput {
                left,
                right,
                up,
                down,
                fire,
            },
        )
    }

    proptest! {
        #[test]
        fn test_player_stays_in_field(inputs in prop::collection::vec(input_strategy(), 1..400)) {
            let f = field();
            let mut p = Player::new(&f);
            for input in &inputs {
                p.advance(input, &f);
                prop_assert!(p.rect.x() >= 0.0 && p.rect.x() <= f.width - p.rect.width());
                prop_assert!(p.rect.y() >= 0.0 && p.rect.y() <= f.height - p.rect.height());
            }
        }
    }
}
