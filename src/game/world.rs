//! Game World
//!
//! The World is the central container for all game state:
//! - Entity allocation and lifetime tracking
//! - Component storage, one `ComponentStorage<T>` per component type
//! - Timed removal queue (entities that should disappear later, e.g. a
//!   dead player whose explosion is still playing)
//!
//! Storages are created lazily the first time a component type is added,
//! so any `'static` type can be a component without registration.

use std::any::TypeId;
use std::collections::HashMap;

use super::component::{AnyStorage, ComponentStorage};
use super::entity::{Entity, EntityAllocator};

/// A group of components added to one entity in a single call.
/// Implemented for tuples of up to eight components.
pub trait Bundle {
    fn insert_into(self, world: &mut World, entity: Entity);
}

macro_rules! impl_bundle {
    ($($T:ident),+) => {
        impl<$($T: 'static),+> Bundle for ($($T,)+) {
            #[allow(non_snake_case)]
            fn insert_into(self, world: &mut World, entity: Entity) {
                let ($($T,)+) = self;
                $(world.add_component(entity, $T);)+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);

/// An entity waiting for its removal time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRemoval {
    entity: Entity,
    due: f64,
}

/// The game world containing all entities and their components.
pub struct World {
    /// Entity allocator for creating/destroying entities
    entities: EntityAllocator,

    /// Component storages keyed by component type
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,

    /// Entities queued for removal at a later timestamp
    pending_removals: Vec<PendingRemoval>,

    /// Playfield size in pixels
    width: f32,
    height: f32,
}

impl World {
    /// Create an empty world with the given playfield size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            entities: EntityAllocator::new(),
            storages: HashMap::new(),
            pending_removals: Vec::new(),
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Create a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Remove an entity and drop all its components.
    /// Removing an already removed entity is a no-op.
    pub fn remove_entity(&mut self, entity: Entity) {
        if !self.entities.free(entity) {
            return;
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        self.pending_removals.retain(|p| p.entity != entity);
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attach a component, replacing any existing one of the same type.
    /// Ignored for entities that are no longer alive.
    pub fn add_component<T: 'static>(&mut self, entity: Entity, component: T) {
        if !self.entities.is_alive(entity) {
            log::trace!("add_component on removed entity {}", entity);
            return;
        }
        self.storage_mut_or_insert::<T>().insert(entity, component);
    }

    /// Attach several components at once.
    pub fn add_components<B: Bundle>(&mut self, entity: Entity, bundle: B) {
        bundle.insert_into(self, entity);
    }

    /// Create an entity and attach a bundle to it.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Entity {
        let entity = self.create_entity();
        self.add_components(entity, bundle);
        entity
    }

    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    pub fn has<T: 'static>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|s| s.contains(entity))
    }

    /// Detach one component, returning it if present.
    pub fn remove_component<T: 'static>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Iterate (entity, component) pairs of one type in insertion order.
    pub fn iter<T: 'static>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.storage::<T>().into_iter().flat_map(|s| s.iter())
    }

    /// Snapshot of the entities holding a component type.
    ///
    /// Systems that mutate the world while walking a component type collect
    /// ids first and re-validate each one before use.
    pub fn entities_with<T: 'static>(&self) -> Vec<Entity> {
        self.storage::<T>().map(|s| s.entities()).unwrap_or_default()
    }

    /// Number of entities holding a component type.
    pub fn count<T: 'static>(&self) -> usize {
        self.storage::<T>().map_or(0, |s| s.count())
    }

    fn storage<T: 'static>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|s| s.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    fn storage_mut<T: 'static>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|s| s.as_any_mut().downcast_mut::<ComponentStorage<T>>())
    }

    fn storage_mut_or_insert<T: 'static>(&mut self) -> &mut ComponentStorage<T> {
        self.storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage keyed by its own TypeId"))
    }

    // =========================================================================
    // Timed Removal
    // =========================================================================

    /// Queue an entity for removal once `now >= due`.
    /// Re-scheduling keeps the earlier deadline.
    pub fn schedule_removal(&mut self, entity: Entity, due: f64) {
        if !self.entities.is_alive(entity) {
            return;
        }
        if let Some(pending) = self.pending_removals.iter_mut().find(|p| p.entity == entity) {
            pending.due = pending.due.min(due);
            return;
        }
        self.pending_removals.push(PendingRemoval { entity, due });
    }

    /// Is this entity waiting in the removal queue?
    pub fn is_pending_removal(&self, entity: Entity) -> bool {
        self.pending_removals.iter().any(|p| p.entity == entity)
    }

    /// Remove every queued entity whose deadline has passed.
    /// Returns the removed entities.
    pub fn flush_due_removals(&mut self, now: f64) -> Vec<Entity> {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending_removals
            .drain(..)
            .partition(|p| p.due <= now);
        self.pending_removals = waiting;

        let mut removed = Vec::with_capacity(due.len());
        for pending in due {
            if self.entities.is_alive(pending.entity) {
                self.remove_entity(pending.entity);
                removed.push(pending.entity);
            }
        }
        removed
    }
}
