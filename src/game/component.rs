//! Component Storage
//!
//! Components are plain data attached to entities. This module provides
//! `ComponentStorage<T>`, a sparse set mapping entity ids to component
//! data. Components sit in a dense Vec in insertion order so queries walk
//! contiguous memory; an id-to-slot map gives O(1) lookups.
//!
//! Storages of different component types are held behind the `AnyStorage`
//! trait so the World can keep them in one map keyed by `TypeId`.

use std::any::Any;
use std::collections::HashMap;

use super::entity::Entity;

/// Dense storage for a single component type.
pub struct ComponentStorage<T> {
    /// (owner, component) pairs in insertion order
    dense: Vec<(Entity, T)>,
    /// Entity -> index into `dense`
    slots: HashMap<Entity, usize>,
}

impl<T> ComponentStorage<T> {
    /// Create empty storage.
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Insert a component for an entity.
    /// Replaces any existing component in place, keeping its slot.
    pub fn insert(&mut self, entity: Entity, component: T) {
        match self.slots.get(&entity) {
            Some(&idx) => self.dense[idx].1 = component,
            None => {
                self.slots.insert(entity, self.dense.len());
                self.dense.push((entity, component));
            }
        }
    }

    /// Remove a component from an entity.
    /// Returns the removed component if it existed.
    ///
    /// Later components shift down one slot, so the remaining ones keep
    /// their relative insertion order.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let idx = self.slots.remove(&entity)?;
        let (_, component) = self.dense.remove(idx);
        for (owner, _) in &self.dense[idx..] {
            if let Some(slot) = self.slots.get_mut(owner) {
                *slot -= 1;
            }
        }
        Some(component)
    }

    /// Get a reference to an entity's component.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(&entity).map(|&idx| &self.dense[idx].1)
    }

    /// Get a mutable reference to an entity's component.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.slots.get(&entity) {
            Some(&idx) => Some(&mut self.dense[idx].1),
            None => None,
        }
    }

    /// Check if an entity has this component.
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Iterate over all (entity, component) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.dense.iter().map(|(e, c)| (*e, c))
    }

    /// Iterate mutably over all (entity, component) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.dense.iter_mut().map(|(e, c)| (*e, c))
    }

    /// Entities that currently hold this component, in insertion order.
    pub fn entities(&self) -> Vec<Entity> {
        self.dense.iter().map(|(e, _)| *e).collect()
    }

    /// Get the number of entities that have this component.
    pub fn count(&self) -> usize {
        self.dense.len()
    }

    /// Clear all components.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.slots.clear();
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a `ComponentStorage<T>`.
pub trait AnyStorage {
    /// Drop this entity's component, if any.
    fn remove_entity(&mut self, entity: Entity);
    fn count(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn count(&self) -> usize {
        ComponentStorage::count(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
