//! Systems: stateless behavior over the [`World`].
//!
//! Event-driven systems implement [`Listener<World>`](dash_event::Listener)
//! and declare the kinds they subscribe to in `KINDS`. Systems with per-tick
//! work implement [`TickSystem`]; the engine runs them in a fixed order after
//! draining intents.

pub mod collision;
pub mod combat;
pub mod hook;
pub mod hostile;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod position;

pub use collision::CollisionSystem;
pub use combat::CombatSystem;
pub use hook::HookSystem;
pub use hostile::HostileSystem;
pub use physics::PhysicsSystem;
pub use pickup::PickupSystem;
pub use player::PlayerSystem;
pub use position::PositionSystem;

use crate::world::World;

/// Work done once per tick.
pub trait TickSystem {
    fn name(&self) -> &'static str;

    /// Advance by `dt` seconds.
    fn update(&mut self, world: &mut World, dt: f32);
}
