//! Keyboard state written by host key events and read once per tick

use std::collections::HashMap;

use crate::config::KeyBindings;
use crate::sim::TickInput;

/// Key identifier -> currently held
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashMap<String, bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.held.insert(code.to_string(), true);
    }

    pub fn release(&mut self, code: &str) {
        self.held.insert(code.to_string(), false);
    }

    /// Forget every held key (window lost focus, so releases will not arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.get(code).copied().unwrap_or(false)
    }

    fn any_held(&self, codes: &[String]) -> bool {
        codes.iter().any(|code| self.is_held(code))
    }

    /// Sample the controls for one tick. Keys with no binding are ignored.
    pub fn snapshot(&self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            left: self.any_held(&bindings.left),
            right: self.any_held(&bindings.right),
            up: self.any_held(&bindings.up),
            down: self.any_held(&bindings.down),
            fire: self.any_held(&bindings.fire),
        }
    }
}
