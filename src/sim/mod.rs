//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each owner's list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hostile;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve};
pub use hostile::Hostile;
pub use player::Player;
pub use projectile::{Direction, Projectile, Tag};
pub use rect::{Field, Rect, overlaps};
pub use state::{GameEvent, GamePhase, World};
pub use tick::{TickInput, tick};
