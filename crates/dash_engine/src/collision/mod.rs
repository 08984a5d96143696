//! Collision resolution: collidable kinds, their bitmasks, and the
//! symmetric table that turns a touch into a semantic event.

pub mod kind;
pub mod table;

pub use kind::{CollidableKind, Collider, KIND_COUNT, category};
pub use table::{INTERACTIONS, Interaction, Participant, interaction, resolve_contact};
