//! Reactions to contacts between players and scenery or monsters, and
//! entity removal.

use dash_component::Entity;
use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use dash_math::{Aabb, Vec2};
use tracing::{debug, trace};

use crate::components::{GrappleHook, PlayerState};
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionSystem;

impl CollisionSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::EntityRemoval,
        EventKind::PlayerFloorContact,
        EventKind::PlayerMonsterContact,
        EventKind::PlayerObstacleContact,
        EventKind::PlayerToolContact,
    ];

    /// Remove `entity` and all its components. Removing an unknown entity is
    /// a no-op.
    fn remove(world: &mut World, entity: Entity, emitter: &mut Emitter) {
        if !world.entities.contains(entity) {
            trace!(%entity, "entity already removed");
            return;
        }
        // Hooks die with their owner; owners forget their hook.
        if let Some(hook) = world.entities.get::<PlayerState>(entity).and_then(|s| s.hook) {
            emitter.emit(EventPayload::EntityRemoval { entity: hook });
        }
        if let Some(owner) = world.entities.get::<GrappleHook>(entity).map(|h| h.owner) {
            if let Some(state) = world.entities.get_mut::<PlayerState>(owner) {
                if state.hook == Some(entity) {
                    state.hook = None;
                }
            }
        }
        world.entities.remove_entity(entity);
    }

    /// Lands `player` when its center is strictly above `surface_y`.
    fn land_if_above(world: &mut World, player: Entity, surface_y: f32) {
        let Some(player_y) = world.position(player).map(|p| p.y) else {
            return;
        };
        if player_y <= surface_y {
            trace!(%player, player_y, surface_y, "contact from below ignored");
            return;
        }
        if let Some(state) = world.entities.get_mut::<PlayerState>(player) {
            state.land();
        }
    }

    fn player_monster(world: &World, player: Entity, monster: Entity, emitter: &mut Emitter) {
        let (Some((player_pos, player_body)), Some((monster_pos, monster_body))) =
            (world.body(player), world.body(monster))
        else {
            return;
        };
        let player_bottom = Aabb::new(player_pos.point, player_body.size).bottom();
        let monster_top = Aabb::new(monster_pos.point, monster_body.size).top();

        if player_bottom >= monster_top {
            emitter.emit(EventPayload::PlayerAttacksMonster { monster });
        } else {
            emitter.emit(EventPayload::MonsterAttacksPlayer { monster, player });
        }
    }
}

impl Listener<World> for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn handle(&mut self, event: &Event, world: &mut World, emitter: &mut Emitter) {
        match event.payload {
            EventPayload::EntityRemoval { entity } => {
                Self::remove(world, entity, emitter);
                debug!(%entity, "entity removed");
            }
            EventPayload::PlayerFloorContact {
                player,
                contact_point,
                ..
            } => Self::land_if_above(world, player, contact_point.y),
            EventPayload::PlayerMonsterContact { player, monster } => {
                Self::player_monster(world, player, monster, emitter);
            }
            EventPayload::PlayerObstacleContact {
                player, obstacle, ..
            } => {
                if let Some(obstacle_y) = world.position(obstacle).map(|p: Vec2| p.y) {
                    Self::land_if_above(world, player, obstacle_y);
                }
            }
            EventPayload::PlayerToolContact { tool, .. } => {
                emitter.emit(EventPayload::EntityRemoval { entity: tool });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Health, Physics};
    use crate::level::RecordKind;
    use crate::systems::testing;

    fn state(world: &World, player: Entity) -> PlayerState {
        *world.entities.get::<PlayerState>(player).unwrap()
    }

    #[test]
    fn test_floor_contact_from_above_lands() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 100.0);
        let floor = testing::record_at(&mut world, RecordKind::Floor, 0.0, 20.0);

        testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerFloorContact {
                player,
                floor,
                contact_point: Vec2::new(0.0, 50.0),
            },
        );
        let s = state(&world, player);
        assert!(s.can_jump);
        assert!(s.can_move);
    }

    #[test]
    fn test_floor_contact_from_below_ignored() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 40.0);
        let floor = testing::record_at(&mut world, RecordKind::Floor, 0.0, 80.0);
        let before = state(&world, player);

        testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerFloorContact {
                player,
                floor,
                contact_point: Vec2::new(0.0, 50.0),
            },
        );
        assert_eq!(state(&world, player), before);
    }

    #[test]
    fn test_floor_contact_at_equal_height_ignored() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 50.0);
        let floor = testing::record_at(&mut world, RecordKind::Floor, 0.0, 0.0);

        testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerFloorContact {
                player,
                floor,
                contact_point: Vec2::new(0.0, 50.0),
            },
        );
        assert!(!state(&world, player).can_jump);
    }

    #[test]
    fn test_obstacle_contact_compares_obstacle_center() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 120.0);
        let obstacle = testing::record_at(&mut world, RecordKind::Obstacle, 0.0, 60.0);

        testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerObstacleContact {
                player,
                obstacle,
                contact_point: Vec2::new(0.0, 500.0),
            },
        );
        assert!(state(&world, player).can_jump);
    }

    #[test]
    fn test_obstacle_contact_level_or_below_ignored() {
        let mut world = testing::world();
        let obstacle = testing::record_at(&mut world, RecordKind::Obstacle, 0.0, 60.0);

        for player_y in [60.0, 30.0] {
            let player = testing::player_at(&mut world, 0.0, player_y);
            let before = state(&world, player);
            testing::handle(
                &mut CollisionSystem,
                &mut world,
                EventPayload::PlayerObstacleContact {
                    player,
                    obstacle,
                    contact_point: Vec2::new(0.0, 0.0),
                },
            );
            assert_eq!(state(&world, player), before, "player at y {player_y}");
            assert!(!state(&world, player).can_jump);
            assert!(!state(&world, player).can_move);
        }
    }

    #[test]
    fn test_stomp_from_above() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 255.0);
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 130.0);

        // player bottom 200, monster top 200
        let emitted = testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerMonsterContact { player, monster },
        );
        assert_eq!(emitted, vec![EventPayload::PlayerAttacksMonster { monster }]);
    }

    #[test]
    fn test_monster_hits_lower_player() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 150.0);
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 130.0);

        let emitted = testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerMonsterContact { player, monster },
        );
        assert_eq!(
            emitted,
            vec![EventPayload::MonsterAttacksPlayer { monster, player }]
        );
    }

    #[test]
    fn test_monster_contact_without_physics_is_skipped() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 255.0);
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 130.0);
        world.entities.remove::<Physics>(monster);

        let emitted = testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerMonsterContact { player, monster },
        );
        assert!(emitted.is_empty());
    }

    #[test]
    fn test_tool_contact_requests_removal() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let tool = testing::record_at(&mut world, RecordKind::Tool, 0.0, 0.0);

        let emitted = testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::PlayerToolContact { player, tool },
        );
        assert_eq!(emitted, vec![EventPayload::EntityRemoval { entity: tool }]);
    }

    #[test]
    fn test_removal_cascades_and_is_idempotent() {
        let mut world = testing::world();
        let monster = testing::record_at(&mut world, RecordKind::Monster, 0.0, 0.0);
        let removal = EventPayload::EntityRemoval { entity: monster };

        testing::handle(&mut CollisionSystem, &mut world, removal.clone());
        assert!(!world.entities.contains(monster));
        assert!(world.entities.get::<Health>(monster).is_none());
        assert!(world.entities.get::<Physics>(monster).is_none());
        assert!(world.entities.component_names(monster).is_empty());

        let count = world.entities.entity_count();
        testing::handle(&mut CollisionSystem, &mut world, removal);
        assert_eq!(world.entities.entity_count(), count);
    }

    #[test]
    fn test_removing_hook_clears_owner() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let hook = crate::factory::spawn_grapple_hook(
            &mut world.entities,
            player,
            Vec2::ZERO,
            dash_math::Direction::Right,
            &world.config,
        );
        world.entities.get_mut::<PlayerState>(player).unwrap().hook = Some(hook);

        testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::EntityRemoval { entity: hook },
        );
        assert_eq!(state(&world, player).hook, None);
    }

    #[test]
    fn test_removing_player_takes_hook_along() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let hook = crate::factory::spawn_grapple_hook(
            &mut world.entities,
            player,
            Vec2::ZERO,
            dash_math::Direction::Right,
            &world.config,
        );
        world.entities.get_mut::<PlayerState>(player).unwrap().hook = Some(hook);

        let emitted = testing::handle(
            &mut CollisionSystem,
            &mut world,
            EventPayload::EntityRemoval { entity: player },
        );
        assert_eq!(emitted, vec![EventPayload::EntityRemoval { entity: hook }]);
    }
}
