//! # dash_engine
//!
//! The tick-driven simulation core of the Star Dash platformer.
//!
//! This crate provides:
//!
//! - [`collision`] — collidable kinds, their bitmasks, and the symmetric
//!   resolution table that turns a touch into a semantic event.
//! - [`components`] — the records entities carry.
//! - [`systems`] — event listeners and per-tick systems.
//! - [`factory`] — one-call entity construction.
//! - [`power_up`] — named power-up constructors.
//! - [`intent`] — the cross-thread intent queue.
//! - [`level`] — decoded level records.
//! - [`snapshot`] — frame views for the renderer.
//! - [`engine`] — the [`GameEngine`] tying it all together.
//!
//! The core never integrates motion or detects overlaps. The host integrates
//! the forces the core accumulates and reports touches through
//! [`GameEngine::handle_collision`].

pub mod collision;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod intent;
pub mod level;
pub mod power_up;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use collision::{CollidableKind, Collider};
pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::EngineError;
pub use intent::{Intent, IntentAction, IntentSender};
pub use level::{EntityRecord, LevelRecord, RecordKind};
pub use snapshot::{EntityFrame, FrameSnapshot, PlayerInfo};
pub use world::World;
