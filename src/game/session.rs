//! Session State
//!
//! Per-game singletons: which entity is the player and which level is
//! being played. Passed explicitly to every system that needs them.

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The player's tank
    pub player: Entity,
    /// Current level index, 0-based
    pub level: u32,
}

impl Session {
    pub fn new(player: Entity) -> Self {
        Self { player, level: 0 }
    }

    pub fn is_player(&self, entity: Entity) -> bool {
        entity == self.player
    }

    /// Move to the next level, returning the new index.
    pub fn advance_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Entity::NULL)
    }
}
