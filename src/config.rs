//! Game configuration
//!
//! Supplied once at startup: from the canvas `data-config` attribute on the
//! web, or from an optional JSON file natively. Nothing here is saved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HOSTILE_SPAWN_MARGIN, PLAYER_SIZE, PLAYER_START_BOTTOM_OFFSET, PLAYER_START_X,
};
use crate::sim::Field;

/// Error when loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The text was not valid configuration JSON.
    Parse(serde_json::Error),
    /// The configuration parsed but describes an unplayable field.
    Invalid(String),
    /// The configuration file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "malformed config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Key identifiers (browser `KeyboardEvent.code` values) bound to each control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub fire: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(list: &[&str]) -> Vec<String> {
            list.iter().map(|k| k.to_string()).collect()
        }
        Self {
            left: keys(&["ArrowLeft", "KeyA"]),
            right: keys(&["ArrowRight", "KeyD"]),
            up: keys(&["ArrowUp", "KeyW"]),
            down: keys(&["ArrowDown", "KeyS"]),
            fire: keys(&["Space"]),
        }
    }
}

/// Native headless runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Stop after this many ticks even if the run is still going
    pub max_ticks: u64,
    /// Drive the player with a scripted pattern instead of idling
    pub autopilot: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            // Ten minutes at 60 Hz
            max_ticks: 36_000,
            autopilot: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: Field,
    /// Fixed RNG seed; the host picks one from the clock when absent
    pub seed: Option<u64>,
    pub bindings: KeyBindings,
    pub headless: HeadlessConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject fields the game cannot be played on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Field { width, height } = self.field;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "field must have positive finite size, got {}x{}",
                width, height
            )));
        }
        let min_width = PLAYER_START_X + PLAYER_SIZE;
        if width < min_width {
            return Err(ConfigError::Invalid(format!(
                "field width must be at least {} to fit the player's start, got {}",
                min_width, width
            )));
        }
        let min_height = (2.0 * HOSTILE_SPAWN_MARGIN).max(PLAYER_START_BOTTOM_OFFSET);
        if height <= min_height {
            return Err(ConfigError::Invalid(format!(
                "field height must exceed {}, got {}",
                min_height, height
            )));
        }
        if self.bindings.fire.is_empty() {
            return Err(ConfigError::Invalid("no key bound to fire".to_string()));
        }
        Ok(())
    }
}
