//! Monster patrols and homing missile steering.

use dash_component::Entity;
use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use dash_math::{Position, Vec2};
use tracing::trace;

use super::{PhysicsSystem, TickSystem};
use crate::components::{HomingMissile, Patrol, Physics};
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct HostileSystem;

impl HostileSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::MonsterWallContact,
        EventKind::MonsterObstacleContact,
    ];

    /// Turn `monster` around if it is heading into `blocker`.
    ///
    /// Contacts repeat every frame while the bodies overlap; only a monster
    /// still walking toward the blocker turns.
    fn bounce(world: &mut World, monster: Entity, blocker: Entity) {
        let (Some(monster_at), Some(blocker_at)) =
            (world.position(monster), world.position(blocker))
        else {
            return;
        };
        let Some(patrol) = world.entities.get_mut::<Patrol>(monster) else {
            return;
        };
        let heading = (blocker_at.x - monster_at.x) * patrol.direction.sign();
        if heading > 0.0 {
            patrol.direction = patrol.direction.reversed();
            trace!(%monster, %blocker, direction = ?patrol.direction, "patrol reversed");
        }
    }
}

impl Listener<World> for HostileSystem {
    fn name(&self) -> &'static str {
        "hostile"
    }

    fn handle(&mut self, event: &Event, world: &mut World, _emitter: &mut Emitter) {
        match event.payload {
            EventPayload::MonsterWallContact { monster, wall } => {
                Self::bounce(world, monster, wall);
            }
            EventPayload::MonsterObstacleContact { monster, obstacle } => {
                Self::bounce(world, monster, obstacle);
            }
            _ => {}
        }
    }
}

impl TickSystem for HostileSystem {
    fn name(&self) -> &'static str {
        "hostile"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let physics = PhysicsSystem;
        let config = &world.config;
        let entities = &mut world.entities;

        for (monster, patrol) in entities.snapshot::<Patrol>() {
            let Some(body) = entities.get::<Physics>(monster).copied() else {
                continue;
            };
            let along = body.velocity.x * patrol.direction.sign();
            if along < config.monster_speed {
                let push = patrol.direction.sign() * config.monster_patrol_force * body.mass;
                physics.apply_force(entities, monster, Vec2::new(push, 0.0));
            }
        }

        for (missile, homing) in entities.snapshot::<HomingMissile>() {
            let Some(target) = entities
                .get::<Position>(homing.target)
                .map(|p| p.point)
            else {
                continue;
            };
            let Some((at, mass)) = entities
                .get::<Position>(missile)
                .zip(entities.get::<Physics>(missile))
                .map(|(p, b)| (p.point, b.mass))
            else {
                continue;
            };
            let steer = (target - at).normalize_or_zero() * config.missile_thrust * mass;
            physics.apply_force(entities, missile, steer);
        }
    }
}
