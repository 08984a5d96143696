//! # dash_component
//!
//! The "E" and "C" of the simulation core: entity identity, the component
//! contract, and the store that holds both.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all component records satisfy.
//! - [`Entity`] — lightweight `u64` entity identifiers.
//! - [`EntityAllocator`] — monotonically increasing ID allocator.
//! - [`ComponentStorage`] — dense per-kind sparse-set storage.
//! - [`EntityManager`] — the entity registry and component store.

pub mod component;
pub mod entity;
pub mod manager;
pub mod storage;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use manager::{EntityBuilder, EntityManager};
pub use storage::{ComponentStorage, ErasedStorage};
