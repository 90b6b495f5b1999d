//! Keyboard input
//!
//! Raw key capture (`KeyState`), an action layer with default bindings,
//! and the per-tick wiring of actions into the player's tank.

mod actions;
mod control;
mod keys;
mod state;

pub use actions::*;
pub use control::apply_player_input;
pub use keys::{key_name, KeyState};
pub use state::*;
