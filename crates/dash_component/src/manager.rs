//! Entity registry and component store.
//!
//! The [`EntityManager`] is the single owner of every entity and component in
//! a simulation. It holds one [`ComponentStorage`] per component kind, keyed
//! by [`ComponentTypeId`].

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};
use crate::storage::{ComponentStorage, ErasedStorage};

/// Entity registry plus per-kind component storage.
///
/// Invariants:
/// - at most one component of a given kind per entity (inserts overwrite);
/// - a component is only ever stored for a registered entity;
/// - removing an entity removes every component keyed to it.
#[derive(Default)]
pub struct EntityManager {
    allocator: EntityAllocator,
    entities: BTreeSet<Entity>,
    storages: HashMap<ComponentTypeId, Box<dyn ErasedStorage>>,
}

impl EntityManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Allocate and register a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity);
        trace!(%entity, "entity spawned");
        entity
    }

    /// Allocate a new entity and return a builder for attaching its initial
    /// components in one expression.
    pub fn build(&mut self) -> EntityBuilder<'_> {
        let entity = self.spawn();
        EntityBuilder {
            manager: self,
            entity,
        }
    }

    /// Register an entity whose ID was chosen elsewhere.
    ///
    /// Returns `false` if the entity is invalid or already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if !entity.is_valid() {
            return false;
        }
        self.allocator.reserve(entity);
        self.entities.insert(entity)
    }

    /// Unregister an entity and drop every component keyed to it.
    ///
    /// Returns `false` (and does nothing) if the entity is unknown.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            return false;
        }
        let mut dropped = 0usize;
        for storage in self.storages.values_mut() {
            if storage.remove_entity(entity) {
                dropped += 1;
            }
        }
        debug!(%entity, components = dropped, "entity removed");
        true
    }

    /// Returns `true` if the entity is registered.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Returns the number of registered entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns all registered entities in ascending ID order.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.iter().copied().collect()
    }

    // -- Component operations --

    /// Attach a component to a registered entity, replacing any component of
    /// the same kind.
    ///
    /// Returns `false` without storing anything if the entity is not
    /// registered.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        if !self.entities.contains(&entity) {
            trace!(%entity, component = T::type_name(), "insert on unknown entity ignored");
            return false;
        }
        self.storage_or_insert::<T>().insert(entity, component);
        true
    }

    /// Get the component of kind `T` owned by `entity`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get the component of kind `T` owned by `entity` mutably.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Returns `true` if `entity` has a component of kind `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|s| s.contains(entity))
    }

    /// Detach and return the component of kind `T` owned by `entity`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Copy every component of kind `T` out of the store.
    ///
    /// Systems that mutate the store while walking a kind iterate over this
    /// snapshot instead of the live storage.
    #[must_use]
    pub fn snapshot<T: Component>(&self) -> Vec<(Entity, T)> {
        self.storage::<T>()
            .map(ComponentStorage::snapshot)
            .unwrap_or_default()
    }

    /// Number of components of kind `T`.
    #[must_use]
    pub fn count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, ComponentStorage::len)
    }

    /// Names of every component kind attached to `entity`, sorted.
    #[must_use]
    pub fn component_names(&self, entity: Entity) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .storages
            .values()
            .filter(|s| s.contains_entity(entity))
            .map(|s| s.type_name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Direct access to the storage for kind `T`, if any component of that
    /// kind was ever inserted.
    #[must_use]
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&T::component_type_id())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    /// Direct mutable access to the storage for kind `T`.
    #[must_use]
    pub fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&T::component_type_id())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }

    fn storage_or_insert<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .storages
            .entry(T::component_type_id())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        let existing = storage.type_name();
        storage
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            // Two component kinds whose names hash to the same FNV-1a ID.
            .unwrap_or_else(|| {
                panic!(
                    "component type id collision between `{existing}` and `{}`",
                    T::type_name()
                )
            })
    }
}

impl std::fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self
            .storages
            .values()
            .map(|s| (s.type_name(), s.count()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("EntityManager")
            .field("entities", &self.entities.len())
            .field("components", &kinds)
            .finish()
    }
}

/// Attaches the initial component set of a freshly spawned entity.
///
/// ```rust
/// use dash_component::{Component, EntityManager};
/// # #[derive(Clone, serde::Serialize, serde::Deserialize)]
/// # struct Tag;
/// # impl Component for Tag { fn type_name() -> &'static str { "Tag" } }
///
/// let mut manager = EntityManager::new();
/// let entity = manager.build().with(Tag).id();
/// assert!(manager.has::<Tag>(entity));
/// ```
pub struct EntityBuilder<'a> {
    manager: &'a mut EntityManager,
    entity: Entity,
}

impl EntityBuilder<'_> {
    /// Attach a component.
    #[must_use]
    pub fn with<T: Component>(self, component: T) -> Self {
        self.manager.insert(self.entity, component);
        self
    }

    /// Finish building and return the entity.
    #[must_use]
    pub fn id(self) -> Entity {
        self.entity
    }
}
