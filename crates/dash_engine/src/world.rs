//! The mutable simulation state systems operate on.

use dash_component::{Entity, EntityManager};
use dash_event::Timestamp;
use dash_math::{Position, Vec2};

use crate::components::Physics;
use crate::config::EngineConfig;
use crate::power_up::PowerUpRegistry;

/// Everything a system may read or mutate while handling an event or a tick.
///
/// The engine owns the world and lends it to each listener call.
#[derive(Debug)]
pub struct World {
    pub entities: EntityManager,
    pub config: EngineConfig,
    pub power_ups: PowerUpRegistry,
    /// Simulation clock.
    pub time: Timestamp,
}

impl World {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            entities: EntityManager::new(),
            config,
            power_ups: PowerUpRegistry::with_defaults(),
            time: Timestamp::ZERO,
        }
    }

    /// Center point of `entity`, if it has a position.
    #[must_use]
    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.entities.get::<Position>(entity).map(|p| p.point)
    }

    /// Position and physics body of `entity`, if it has both.
    #[must_use]
    pub fn body(&self, entity: Entity) -> Option<(Position, Physics)> {
        let position = self.entities.get::<Position>(entity)?;
        let physics = self.entities.get::<Physics>(entity)?;
        Some((*position, *physics))
    }
}
