//! Frame driver: one simulation tick and one render per host frame
//!
//! The host (requestAnimationFrame on the web, a plain loop natively) calls
//! `Session::frame` and stops scheduling frames once it returns false.

use super::hud::Hud;
use super::input::KeyboardState;
use crate::config::{GameConfig, KeyBindings};
use crate::renderer::{RenderSink, Scene};
use crate::sim::{GameEvent, World, tick};

pub struct Session<R: RenderSink, H: Hud> {
    world: World,
    keyboard: KeyboardState,
    bindings: KeyBindings,
    renderer: R,
    hud: H,
}

impl<R: RenderSink, H: Hud> Session<R, H> {
    pub fn new(config: &GameConfig, seed: u64, renderer: R, mut hud: H) -> Self {
        let world = World::new(config.field, seed);
        hud.set_stats(world.score, world.display_lives());
        log::info!(
            "Session started: {}x{} field, seed {}",
            config.field.width,
            config.field.height,
            seed
        );
        Self {
            world,
            keyboard: KeyboardState::new(),
            bindings: config.bindings.clone(),
            renderer,
            hud,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn key_down(&mut self, code: &str) {
        self.keyboard.press(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.keyboard.release(code);
    }

    /// Window lost focus; key releases will not be delivered
    pub fn blur(&mut self) {
        self.keyboard.clear();
    }

    /// Advance one tick and render it. Returns whether another frame should
    /// be scheduled.
    pub fn frame(&mut self, clock_ms: f64) -> bool {
        if !self.world.is_running() {
            return false;
        }

        let input = self.keyboard.snapshot(&self.bindings);
        tick(&mut self.world, &input);
        self.dispatch_events();

        let scene = Scene::capture(&self.world, clock_ms);
        self.renderer.present(&scene);

        self.world.is_running()
    }

    /// Reset the world for a fresh run. The host re-enters its frame loop.
    pub fn restart(&mut self) {
        self.world.reset();
        self.dispatch_events();
    }

    /// Forward this tick's events to the HUD. Stat changes are coalesced into
    /// one update, flushed before the game-over panel is shown.
    fn dispatch_events(&mut self) {
        let mut stats_dirty = false;
        for event in self.world.drain_events() {
            match event {
                GameEvent::ScoreChanged { .. } | GameEvent::LivesChanged { .. } => {
                    stats_dirty = true;
                }
                GameEvent::GameOver { final_score } => {
                    self.flush_stats(&mut stats_dirty);
                    self.hud.show_game_over(final_score);
                }
                GameEvent::Reset => self.hud.hide_game_over(),
                GameEvent::HostileSpawned | GameEvent::HostileDestroyed => {}
            }
        }
        self.flush_stats(&mut stats_dirty);
    }

    fn flush_stats(&mut self, dirty: &mut bool) {
        if *dirty {
            self.hud
                .set_stats(self.world.score, self.world.display_lives());
            *dirty = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawKind;
    use crate::sim::{Direction, GamePhase, Hostile, Projectile};
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingSink {
        frames: usize,
        last: Option<Scene>,
    }

    impl RenderSink for RecordingSink {
        fn present(&mut self, scene: &Scene) {
            self.frames += 1;
            self.last = Some(scene.clone());
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum HudCall {
        Stats(u64, i32),
        Show(u64),
        Hide,
    }

    #[derive(Default)]
    struct RecordingHud {
        calls: Vec<HudCall>,
    }

    impl Hud for RecordingHud {
        fn set_stats(&mut self, score: u64, lives: i32) {
            self.calls.push(HudCall::Stats(score, lives));
        }
        fn show_game_over(&mut self, final_score: u64) {
            self.calls.push(HudCall::Show(final_score));
        }
        fn hide_game_over(&mut self) {
            self.calls.push(HudCall::Hide);
        }
    }

    fn session() -> Session<RecordingSink, RecordingHud> {
        Session::new(
            &GameConfig::default(),
            42,
            RecordingSink::default(),
            RecordingHud::default(),
        )
    }

    #[test]
    fn test_initial_stats_pushed() {
        let s = session();
        assert_eq!(s.hud().calls, vec![HudCall::Stats(0, 3)]);
    }

    #[test]
    fn test_frame_ticks_and_renders() {
        let mut s = session();
        s.key_down("Space");
        assert!(s.frame(0.0));
        assert_eq!(s.renderer().frames, 1);
        assert_eq!(s.world().time_ticks, 1);

        let scene = s.renderer().last.as_ref().unwrap();
        assert_eq!(scene.drawables[0].kind, DrawKind::Player);
        assert_eq!(s.world().player.shots.len(), 1);

        s.key_up("Space");
        s.key_down("ArrowUp");
        s.frame(16.0);
        assert_eq!(s.world().player.rect.y(), 515.0);
        assert_eq!(s.world().player.shots.len(), 1);
    }

    #[test]
    fn test_blur_releases_keys() {
        let mut s = session();
        s.key_down("ArrowRight");
        s.blur();
        s.frame(0.0);
        assert_eq!(s.world().player.rect.x(), 50.0);
    }

    fn doom(s: &mut Session<RecordingSink, RecordingHud>) {
        // One hostile shot about to hit the player on its last life
        s.world.lives = 1;
        let mut h = Hostile::new(700.0, 100.0, 0.0, 1000.0);
        let target = s.world.player.rect.pos;
        h.shots.push(Projectile::new(
            Vec2::new(target.x + 20.0, target.y + 10.0),
            Direction::Hostile,
        ));
        s.world.hostiles.push(h);
    }

    #[test]
    fn test_game_over_stops_loop_and_shows_panel() {
        let mut s = session();
        s.world.score = 300;
        doom(&mut s);

        assert!(!s.frame(0.0));
        assert_eq!(s.world().phase, GamePhase::Over);
        // The final frame is still rendered
        assert_eq!(s.renderer().frames, 1);
        assert_eq!(
            s.hud().calls[1..],
            [HudCall::Stats(300, 0), HudCall::Show(300)]
        );

        // Further frames do nothing
        assert!(!s.frame(16.0));
        assert_eq!(s.renderer().frames, 1);
    }

    #[test]
    fn test_restart_resets_and_hides_panel() {
        let mut s = session();
        doom(&mut s);
        s.frame(0.0);
        s.restart();

        assert_eq!(s.world().phase, GamePhase::Running);
        assert_eq!(s.world().score, 0);
        assert_eq!(s.world().lives, 3);
        assert!(s.world().hostiles.is_empty());
        assert_eq!(
            s.hud().calls[s.hud().calls.len() - 2..],
            [HudCall::Hide, HudCall::Stats(0, 3)]
        );
        assert!(s.frame(32.0));
    }
}
