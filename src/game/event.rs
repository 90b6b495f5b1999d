//! Event System
//!
//! Systems report what happened during a tick by pushing events instead of
//! calling into each other. The runtime drains the queues after the system
//! pass (logging, HUD feedback) and clears them before the next tick.

use super::components::PowerupKind;
use super::entity::Entity;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
#[derive(Debug, Default)]
pub struct Events {
    pub enemy_destroyed: EventQueue<EnemyDestroyedEvent>,
    pub player_hit: EventQueue<PlayerHitEvent>,
    pub powerup_collected: EventQueue<PowerupCollectedEvent>,
    pub enemy_spawned: EventQueue<EnemySpawnedEvent>,
    pub level_advanced: EventQueue<LevelAdvancedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of tick.
    pub fn clear_all(&mut self) {
        self.enemy_destroyed.clear();
        self.player_hit.clear();
        self.powerup_collected.clear();
        self.enemy_spawned.clear();
        self.level_advanced.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// How an enemy died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyDeathCause {
    /// Shot by the player
    Bullet,
    /// Rammed the player
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDestroyedEvent {
    pub enemy: Entity,
    pub cause: EnemyDeathCause,
    /// Was a powerup dropped where it died?
    pub dropped_powerup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHitEvent {
    /// Bullet or enemy that caused the hit
    pub source: Entity,
    /// Lives left after the hit
    pub remaining: i32,
    /// The hit was lethal; removal is queued
    pub lethal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerupCollectedEvent {
    pub kind: PowerupKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawnedEvent {
    pub enemy: Entity,
    /// Index into the spawn point table
    pub spawn_point: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelAdvancedEvent {
    /// New level index (0-based)
    pub level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain() {
        let mut queue: EventQueue<LevelAdvancedEvent> = EventQueue::new();
        queue.send(LevelAdvancedEvent { level: 1 });
        queue.send(LevelAdvancedEvent { level: 2 });
        assert_eq!(queue.len(), 2);

        let levels: Vec<u32> = queue.drain().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut events = Events::new();
        events.powerup_collected.send(PowerupCollectedEvent { kind: PowerupKind::Star });
        events.level_advanced.send(LevelAdvancedEvent { level: 1 });
        events.clear_all();
        assert!(events.powerup_collected.is_empty());
        assert!(events.level_advanced.is_empty());
    }
}
