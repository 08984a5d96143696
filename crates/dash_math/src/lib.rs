//! # dash_math
//!
//! Math types for the simulation core. Re-exports [`glam`] for linear algebra
//! and defines the spatial types shared by systems and the host:
//! [`Position`], which implements [`Component`](dash_component::Component),
//! [`Aabb`] and [`Direction`].

pub mod bounds;
pub mod direction;
pub mod position;

// Re-export glam types for convenience.
pub use glam::{Vec2, vec2};

pub use bounds::Aabb;
pub use direction::Direction;
pub use position::Position;
