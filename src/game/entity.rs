//! Entity Identities
//!
//! Entities are opaque identifiers naming a bag of components.
//! Ids are handed out monotonically and never reused within a session,
//! so a stale id held across a tick can only ever miss, never alias a
//! newer entity.

use std::collections::HashSet;

/// A unique identifier for a game entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// A null/invalid entity reference.
    /// Useful for "no owner" or uninitialized fields.
    pub const NULL: Entity = Entity(u32::MAX);

    pub(crate) fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Raw numeric id (for logging).
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Check if this is the null entity.
    pub fn is_null(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "#null")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Hands out entity ids and tracks which are still alive.
pub struct EntityAllocator {
    /// Next id to hand out
    next: u32,
    /// Currently alive ids
    alive: HashSet<Entity>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            // Id 0 stays unused so a zeroed id never names a live entity
            next: 1,
            alive: HashSet::new(),
        }
    }

    /// Allocate a fresh entity.
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity(self.next);
        self.next += 1;
        self.alive.insert(entity);
        entity
    }

    /// Free an entity. Returns true if it was alive.
    pub fn free(&mut self, entity: Entity) -> bool {
        self.alive.remove(&entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        assert!(alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));

        assert!(alloc.free(e1));
        assert!(!alloc.free(e1));
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        alloc.free(e1);
        let e2 = alloc.allocate();

        assert_ne!(e1, e2);
        assert!(e2.id() > e1.id());
        assert!(!alloc.is_alive(e1));
    }

    #[test]
    fn test_null_entity() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(Entity::NULL));
        assert!(Entity::NULL.is_null());
        assert_eq!(Entity::default(), Entity::NULL);
    }
}
