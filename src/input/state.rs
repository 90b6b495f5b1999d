//! Input state management
//!
//! Feeds macroquad key events into a `KeyState` and answers action
//! queries on top of it. `action_pressed` compares against the previous
//! frame's snapshot for menu keys that must not repeat.

use std::collections::HashSet;

use macroquad::prelude::{get_keys_pressed, get_keys_released};

use super::keys::{key_name, KeyState};
use super::Action;

pub struct InputState {
    pub keys: KeyState,
    /// Keys held at the end of the previous frame
    previous: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: KeyState::new(),
            previous: HashSet::new(),
        }
    }

    /// Pull this frame's key events from macroquad. Call once per frame
    /// before checking actions.
    pub fn poll(&mut self) {
        for code in get_keys_pressed() {
            if let Some(name) = key_name(code) {
                self.keys.key_down(name);
            }
        }
        for code in get_keys_released() {
            if let Some(name) = key_name(code) {
                self.keys.key_up(name);
            }
        }
    }

    /// Is any key bound to the action held?
    pub fn action_down(&self, action: Action) -> bool {
        action.keys().iter().any(|key| self.keys.is_down(key))
    }

    /// Did the action go from released to held since the last `end_frame`?
    pub fn action_pressed(&self, action: Action) -> bool {
        action
            .keys()
            .iter()
            .any(|key| self.keys.is_down(key) && !self.previous.contains(*key))
    }

    /// Snapshot held keys for next frame's edge detection
    pub fn end_frame(&mut self) {
        self.previous = self.keys.held().map(str::to_owned).collect();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
