//! Strafe Run - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Scene capture and WebGPU rendering
//! - `platform`: Keyboard state, HUD sink and the frame driver
//! - `config`: Field size, seed and key bindings

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use platform::Session;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_X: f32 = 50.0;
    /// Start y is measured up from the bottom edge of the field
    pub const PLAYER_START_BOTTOM_OFFSET: f32 = 80.0;
    /// Ticks between player shots
    pub const FIRE_COOLDOWN_TICKS: u32 = 10;

    /// Projectile defaults
    pub const SHOT_WIDTH: f32 = 8.0;
    pub const SHOT_HEIGHT: f32 = 4.0;
    pub const SHOT_SPEED: f32 = 8.0;

    /// Hostile defaults
    pub const HOSTILE_SIZE: f32 = 35.0;
    pub const HOSTILE_MIN_SPEED: f32 = 2.0;
    pub const HOSTILE_MAX_SPEED: f32 = 4.0;
    /// Hostiles never spawn within this margin of the top or bottom edge
    pub const HOSTILE_SPAWN_MARGIN: f32 = 50.0;
    /// Initial fire timer is drawn from [0, this)
    pub const HOSTILE_FIRST_SHOT_MAX: f32 = 60.0;
    /// Reload timer is drawn from [MIN, MAX)
    pub const HOSTILE_RELOAD_MIN: f32 = 30.0;
    pub const HOSTILE_RELOAD_MAX: f32 = 60.0;
    /// Per-tick chance of firing once the timer has run out
    pub const HOSTILE_FIRE_CHANCE: f32 = 0.02;

    /// A hostile spawns once the spawn timer exceeds this many ticks
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    pub const KILL_SCORE: u64 = 100;
    pub const STARTING_LIVES: i32 = 3;

    /// Height of the ground strip drawn along the bottom of the field
    pub const GROUND_HEIGHT: f32 = 20.0;
}
