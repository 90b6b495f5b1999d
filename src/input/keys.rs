//! Raw key state capture
//!
//! A live map from lowercased key name to held/released. It records only
//! the current level of each key: no history, no repeat suppression.
//! Edge detection lives one layer up in `InputState`.

use std::collections::HashMap;

use macroquad::prelude::KeyCode;

#[derive(Debug, Clone)]
pub struct KeyState {
    keys: HashMap<String, bool>,
    /// False once detached; later events are ignored
    attached: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            attached: true,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if self.attached {
            self.keys.insert(key.to_lowercase(), true);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if self.attached {
            self.keys.insert(key.to_lowercase(), false);
        }
    }

    /// Is the key currently held? Unknown keys read as released.
    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(&key.to_lowercase()).copied().unwrap_or(false)
    }

    /// Names of every key currently held
    pub fn held(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, down)| **down)
            .map(|(name, _)| name.as_str())
    }

    /// Stop listening: drop all state and ignore further events.
    pub fn detach(&mut self) {
        self.attached = false;
        self.keys.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Name used in `KeyState` for a macroquad key code.
/// Keys the game never binds map to `None`.
pub fn key_name(code: KeyCode) -> Option<&'static str> {
    let name = match code {
        KeyCode::W => "w",
        KeyCode::A => "a",
        KeyCode::S => "s",
        KeyCode::D => "d",
        KeyCode::P => "p",
        KeyCode::Up => "arrowup",
        KeyCode::Down => "arrowdown",
        KeyCode::Left => "arrowleft",
        KeyCode::Right => "arrowright",
        KeyCode::Space => "space",
        KeyCode::Enter | KeyCode::KpEnter => "enter",
        KeyCode::Escape => "escape",
        _ => return None,
    };
    Some(name)
}
