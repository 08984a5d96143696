//! Force and velocity bookkeeping for the host's integrator.
//!
//! The core never integrates. Systems accumulate forces during a tick, the
//! host reads them, integrates, and pushes the resulting velocities back with
//! [`PhysicsSystem::sync`]. Forces are cleared at the start of every tick.

use dash_component::{Entity, EntityManager};
use dash_math::Vec2;
use tracing::trace;

use super::TickSystem;
use crate::components::Physics;
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Zero every accumulated force. Returns how many bodies were reset.
    pub fn reset_forces(&self, entities: &mut EntityManager) -> usize {
        let Some(storage) = entities.storage_mut::<Physics>() else {
            return 0;
        };
        let mut count = 0;
        for (_, physics) in storage.iter_mut() {
            physics.force = Vec2::ZERO;
            count += 1;
        }
        count
    }

    /// Whether `entity` has any velocity.
    #[must_use]
    pub fn is_moving(&self, entities: &EntityManager, entity: Entity) -> bool {
        entities
            .get::<Physics>(entity)
            .is_some_and(|p| p.velocity != Vec2::ZERO)
    }

    /// Whether `entity` has vertical velocity.
    #[must_use]
    pub fn is_jumping(&self, entities: &EntityManager, entity: Entity) -> bool {
        entities
            .get::<Physics>(entity)
            .is_some_and(|p| p.velocity.y != 0.0)
    }

    /// Add `force` to the force accumulated this tick. Returns `false` when
    /// `entity` has no physics body.
    pub fn apply_force(&self, entities: &mut EntityManager, entity: Entity, force: Vec2) -> bool {
        match entities.get_mut::<Physics>(entity) {
            Some(physics) => {
                physics.force += force;
                true
            }
            None => false,
        }
    }

    /// Accumulate an impulse. Hosts integrate the first tick's force of a
    /// jump as an impulse, so this shares the force accumulator.
    pub fn apply_impulse(
        &self,
        entities: &mut EntityManager,
        entity: Entity,
        impulse: Vec2,
    ) -> bool {
        self.apply_force(entities, entity, impulse)
    }

    /// Overwrite velocities with the integrator's results. Unknown entities
    /// are skipped. Returns how many bodies were updated.
    pub fn sync<I>(&self, entities: &mut EntityManager, velocities: I) -> usize
    where
        I: IntoIterator<Item = (Entity, Vec2)>,
    {
        let mut count = 0;
        for (entity, velocity) in velocities {
            if let Some(physics) = entities.get_mut::<Physics>(entity) {
                physics.velocity = velocity;
                count += 1;
            }
        }
        count
    }

    #[must_use]
    pub fn size(&self, entities: &EntityManager, entity: Entity) -> Option<Vec2> {
        entities.get::<Physics>(entity).map(|p| p.size)
    }

    #[must_use]
    pub fn velocity(&self, entities: &EntityManager, entity: Entity) -> Option<Vec2> {
        entities.get::<Physics>(entity).map(|p| p.velocity)
    }

    #[must_use]
    pub fn force(&self, entities: &EntityManager, entity: Entity) -> Option<Vec2> {
        entities.get::<Physics>(entity).map(|p| p.force)
    }
}

impl TickSystem for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let count = self.reset_forces(&mut world.entities);
        trace!(bodies = count, "forces reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::testing;

    #[test]
    fn test_forces_accumulate_then_reset() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let mut physics = PhysicsSystem;

        assert!(physics.apply_force(&mut world.entities, player, Vec2::new(10.0, 0.0)));
        assert!(physics.apply_force(&mut world.entities, player, Vec2::new(5.0, 5.0)));
        assert_eq!(
            physics.force(&world.entities, player),
            Some(Vec2::new(15.0, 5.0))
        );

        physics.update(&mut world, 1.0 / 60.0);
        assert_eq!(physics.force(&world.entities, player), Some(Vec2::ZERO));
        assert_eq!(physics.velocity(&world.entities, player), Some(Vec2::ZERO));
    }

    #[test]
    fn test_sync_overwrites_velocity() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let physics = PhysicsSystem;
        assert!(!physics.is_moving(&world.entities, player));

        let updated = physics.sync(
            &mut world.entities,
            [(player, Vec2::new(3.0, 0.0)), (Entity::from_raw(999), Vec2::ONE)],
        );
        assert_eq!(updated, 1);
        assert!(physics.is_moving(&world.entities, player));
        assert!(!physics.is_jumping(&world.entities, player));

        physics.sync(&mut world.entities, [(player, Vec2::new(3.0, -2.0))]);
        assert!(physics.is_jumping(&world.entities, player));
    }

    #[test]
    fn test_unknown_entity() {
        let mut world = testing::world();
        let ghost = Entity::from_raw(42);
        let physics = PhysicsSystem;
        assert!(!physics.apply_force(&mut world.entities, ghost, Vec2::ONE));
        assert!(!physics.is_moving(&world.entities, ghost));
        assert_eq!(physics.size(&world.entities, ghost), None);
    }
}
