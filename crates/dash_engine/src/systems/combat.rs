//! Damage from stomps, monster touches, and homing missiles.

use dash_component::Entity;
use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use tracing::{debug, info};

use crate::components::Health;
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct CombatSystem;

impl CombatSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::PlayerAttacksMonster,
        EventKind::MonsterAttacksPlayer,
        EventKind::PlayerHomingMissileContact,
    ];

    /// Damage `target`, returning its health afterwards. `None` when the
    /// target has no health.
    fn damage(world: &mut World, target: Entity, amount: f32) -> Option<Health> {
        let health = world.entities.get_mut::<Health>(target)?;
        health.damage(amount);
        Some(*health)
    }
}

impl Listener<World> for CombatSystem {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn handle(&mut self, event: &Event, world: &mut World, emitter: &mut Emitter) {
        match event.payload {
            EventPayload::PlayerAttacksMonster { monster } => {
                let amount = world.config.stomp_damage;
                // Monsters without health die on the first stomp.
                let alive = Self::damage(world, monster, amount).is_some_and(|h| h.is_alive());
                if !alive && world.entities.contains(monster) {
                    emitter.emit(EventPayload::EntityRemoval { entity: monster });
                    debug!(%monster, "monster defeated");
                }
            }
            EventPayload::MonsterAttacksPlayer { monster, player } => {
                let amount = world.config.monster_damage;
                if let Some(health) = Self::damage(world, player, amount) {
                    debug!(%player, %monster, hp = health.current, "player hit by monster");
                    if !health.is_alive() {
                        info!(%player, "player knocked out");
                    }
                }
            }
            EventPayload::PlayerHomingMissileContact { player, missile } => {
                if !world.entities.contains(missile) {
                    return;
                }
                let amount = world.config.missile_damage;
                if let Some(health) = Self::damage(world, player, amount) {
                    debug!(%player, %missile, hp = health.current, "player hit by missile");
                }
                emitter.emit(EventPayload::EntityRemoval { entity: missile });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::level::RecordKind;
    use crate::systems::testing;
    use dash_math::Vec2;

    fn hp(world: &World, entity: Entity) -> f32 {
        world.entities.get::<Health>(entity).unwrap().current
    }

    #[test]
    fn test_stomp_defeats_monster() {
        let mut world = testing::world();
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 0.0);
        let emitted = testing::handle(
            &mut CombatSystem,
            &mut world,
            EventPayload::PlayerAttacksMonster { monster },
        );
        assert_eq!(hp(&world, monster), 0.0);
        assert_eq!(emitted, vec![EventPayload::EntityRemoval { entity: monster }]);
    }

    #[test]
    fn test_tough_monster_survives_a_stomp() {
        let mut world = testing::world();
        world.config.monster_health = 2.0;
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 0.0);
        let emitted = testing::handle(
            &mut CombatSystem,
            &mut world,
            EventPayload::PlayerAttacksMonster { monster },
        );
        assert!(emitted.is_empty());
        assert_eq!(hp(&world, monster), 1.0);
    }

    #[test]
    fn test_monster_hit_floors_at_zero() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 0.0);
        for _ in 0..5 {
            testing::handle(
                &mut CombatSystem,
                &mut world,
                EventPayload::MonsterAttacksPlayer { monster, player },
            );
        }
        assert_eq!(hp(&world, player), 0.0);
        assert!(world.entities.contains(player));
    }

    #[test]
    fn test_missile_hits_once() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let missile = factory::spawn_homing_missile(&mut world.entities, Vec2::ZERO, player);

        let emitted = testing::handle(
            &mut CombatSystem,
            &mut world,
            EventPayload::PlayerHomingMissileContact { player, missile },
        );
        assert_eq!(emitted, vec![EventPayload::EntityRemoval { entity: missile }]);
        assert_eq!(hp(&world, player), 2.0);
    }
}
