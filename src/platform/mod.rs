//! Platform abstraction layer
//!
//! Host-side collaborators around the simulation:
//! - Keyboard state (level-sensed key map)
//! - Score/lives and game-over display
//! - Frame driver that ticks and renders once per host frame

pub mod driver;
pub mod hud;
pub mod input;

pub use driver::Session;
pub use hud::{Hud, LogHud};
pub use input::KeyboardState;
