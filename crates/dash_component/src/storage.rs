//! Per-kind dense component storage.
//!
//! Each component kind lives in its own [`ComponentStorage`], a sparse set:
//! components are packed contiguously in a dense vector with a parallel
//! vector of owning entities, and a hash index maps an entity to its row.
//! Per-tick passes walk the dense vector directly.

use std::any::Any;
use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;

/// Dense storage for every component of kind `T`.
///
/// `entities[i]` owns `components[i]`, and `index[entities[i]] == i` for
/// every row.
#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    components: Vec<T>,
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
}

impl<T> ComponentStorage<T> {
    /// Create a new, empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no component is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if `entity` has a component in this storage.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Insert a component, replacing and returning any previous one.
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&row) = self.index.get(&entity) {
            return Some(std::mem::replace(&mut self.components[row], component));
        }
        self.index.insert(entity, self.components.len());
        self.components.push(component);
        self.entities.push(entity);
        None
    }

    /// Remove and return the component owned by `entity`.
    ///
    /// The last row is swapped into the hole, so removal is O(1).
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let row = self.index.remove(&entity)?;
        let last = self.components.len() - 1;
        if row != last {
            let moved = self.entities[last];
            self.index.insert(moved, row);
        }
        self.entities.swap_remove(row);
        Some(self.components.swap_remove(row))
    }

    /// Get the component owned by `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).map(|&row| &self.components[row])
    }

    /// Get the component owned by `entity` mutably.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let row = *self.index.get(&entity)?;
        Some(&mut self.components[row])
    }

    /// Iterate `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, component)` pairs mutably in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    /// The owning entities, in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

impl<T: Clone> ComponentStorage<T> {
    /// Copy every `(entity, component)` pair out of the storage.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Entity, T)> {
        self.iter().map(|(e, c)| (e, c.clone())).collect()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a [`ComponentStorage`], used by the entity manager to
/// hold storages of different kinds side by side.
pub trait ErasedStorage: Any {
    /// The component kind held by this storage.
    fn component_type_id(&self) -> ComponentTypeId;

    /// The component kind's human-readable name.
    fn type_name(&self) -> &'static str;

    /// Drop the component owned by `entity`, if any.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Returns `true` if `entity` has a component here.
    fn contains_entity(&self, entity: Entity) -> bool;

    /// Number of stored components.
    fn count(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for ComponentStorage<T> {
    fn component_type_id(&self) -> ComponentTypeId {
        T::component_type_id()
    }

    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains_entity(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
