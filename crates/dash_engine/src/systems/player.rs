//! Player input handling and per-tick locomotion.
//!
//! Intent events only record what the player wants. Forces are applied in
//! [`TickSystem::update`], after the physics system has cleared the previous
//! tick's forces.

use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use dash_math::Vec2;
use tracing::{debug, trace};

use super::{PhysicsSystem, TickSystem};
use crate::components::{Physics, PlayerState, SpeedBoost};
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerSystem;

impl PlayerSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::PlayerMove,
        EventKind::PlayerStop,
        EventKind::PlayerJump,
    ];
}

impl Listener<World> for PlayerSystem {
    fn name(&self) -> &'static str {
        "player"
    }

    fn handle(&mut self, event: &Event, world: &mut World, _emitter: &mut Emitter) {
        match event.payload {
            EventPayload::PlayerMove { player, direction } => {
                if let Some(state) = world.entities.get_mut::<PlayerState>(player) {
                    state.moving = Some(direction);
                    state.facing = direction;
                }
            }
            EventPayload::PlayerStop { player, direction } => {
                if let Some(state) = world.entities.get_mut::<PlayerState>(player) {
                    if state.moving == Some(direction) {
                        state.moving = None;
                    }
                }
            }
            EventPayload::PlayerJump { player } => {
                let Some(state) = world.entities.get_mut::<PlayerState>(player) else {
                    return;
                };
                if !state.can_jump {
                    trace!(%player, "jump while airborne ignored");
                    return;
                }
                state.pending_jump = true;
                state.can_jump = false;
                state.can_move = false;
                debug!(%player, "jump accepted");
            }
            _ => {}
        }
    }
}

impl TickSystem for PlayerSystem {
    fn name(&self) -> &'static str {
        "player"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        let physics = PhysicsSystem;
        let config = &world.config;
        let entities = &mut world.entities;

        for (player, state) in entities.snapshot::<PlayerState>() {
            let boost = entities.get::<SpeedBoost>(player).copied();
            let multiplier = boost.map_or(1.0, |b| b.multiplier);

            if state.pending_jump {
                physics.apply_impulse(entities, player, config.jump_impulse);
                if let Some(live) = entities.get_mut::<PlayerState>(player) {
                    live.pending_jump = false;
                }
            }

            if let Some(direction) = state.moving.filter(|_| state.can_move) {
                let body = entities.get::<Physics>(player).copied();
                if let Some(body) = body {
                    let max_speed = config.max_run_speed * multiplier;
                    if body.velocity.x.abs() < max_speed {
                        let push = direction.sign() * config.run_force * body.mass * multiplier;
                        physics.apply_force(entities, player, Vec2::new(push, 0.0));
                    }
                }
            }

            if let Some(mut boost) = boost {
                boost.remaining -= dt;
                if boost.is_expired() {
                    entities.remove::<SpeedBoost>(player);
                    debug!(%player, "speed boost expired");
                } else {
                    entities.insert(player, boost);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::testing;
    use dash_component::Entity;
    use dash_math::Direction;

    fn state(world: &World, player: Entity) -> PlayerState {
        *world.entities.get::<PlayerState>(player).unwrap()
    }

    fn force(world: &World, player: Entity) -> Vec2 {
        world.entities.get::<Physics>(player).unwrap().force
    }

    fn grounded_player(world: &mut World) -> Entity {
        let player = testing::player_at(world, 0.0, 100.0);
        world.entities.get_mut::<PlayerState>(player).unwrap().land();
        player
    }

    #[test]
    fn test_move_and_stop() {
        let mut world = testing::world();
        let player = grounded_player(&mut world);
        let mut system = PlayerSystem;

        testing::handle(
            &mut system,
            &mut world,
            EventPayload::PlayerMove {
                player,
                direction: Direction::Left,
            },
        );
        assert_eq!(state(&world, player).moving, Some(Direction::Left));
        assert_eq!(state(&world, player).facing, Direction::Left);

        // Releasing the other key keeps running.
        testing::handle(
            &mut system,
            &mut world,
            EventPayload::PlayerStop {
                player,
                direction: Direction::Right,
            },
        );
        assert_eq!(state(&world, player).moving, Some(Direction::Left));

        testing::handle(
            &mut system,
            &mut world,
            EventPayload::PlayerStop {
                player,
                direction: Direction::Left,
            },
        );
        assert_eq!(state(&world, player).moving, None);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut world = testing::world();
        let airborne = testing::player_at(&mut world, 0.0, 100.0);
        testing::handle(
            &mut PlayerSystem,
            &mut world,
            EventPayload::PlayerJump { player: airborne },
        );
        assert!(!state(&world, airborne).pending_jump);

        let grounded = grounded_player(&mut world);
        testing::handle(
            &mut PlayerSystem,
            &mut world,
            EventPayload::PlayerJump { player: grounded },
        );
        let s = state(&world, grounded);
        assert!(s.pending_jump);
        assert!(!s.can_jump);
        assert!(!s.can_move);
    }

    #[test]
    fn test_jump_impulse_applied_once() {
        let mut world = testing::world();
        let player = grounded_player(&mut world);
        let mut system = PlayerSystem;
        testing::handle(&mut system, &mut world, EventPayload::PlayerJump { player });

        system.update(&mut world, 1.0 / 60.0);
        assert_eq!(force(&world, player), Vec2::new(0.0, 8500.0));
        assert!(!state(&world, player).pending_jump);

        PhysicsSystem.reset_forces(&mut world.entities);
        system.update(&mut world, 1.0 / 60.0);
        assert_eq!(force(&world, player), Vec2::ZERO);
    }

    #[test]
    fn test_run_force_until_max_speed() {
        let mut world = testing::world();
        let player = grounded_player(&mut world);
        let mut system = PlayerSystem;
        testing::handle(
            &mut system,
            &mut world,
            EventPayload::PlayerMove {
                player,
                direction: Direction::Right,
            },
        );

        system.update(&mut world, 1.0 / 60.0);
        assert_eq!(force(&world, player), Vec2::new(20.0 * 50.0, 0.0));

        PhysicsSystem.reset_forces(&mut world.entities);
        PhysicsSystem.sync(&mut world.entities, [(player, Vec2::new(150.0, 0.0))]);
        system.update(&mut world, 1.0 / 60.0);
        assert_eq!(force(&world, player), Vec2::ZERO);
    }

    #[test]
    fn test_speed_boost_scales_and_expires() {
        let mut world = testing::world();
        let player = grounded_player(&mut world);
        world.entities.insert(
            player,
            SpeedBoost {
                remaining: 0.5,
                multiplier: 2.5,
            },
        );
        world.entities.get_mut::<PlayerState>(player).unwrap().moving = Some(Direction::Left);
        PhysicsSystem.sync(&mut world.entities, [(player, Vec2::new(-200.0, 0.0))]);

        let mut system = PlayerSystem;
        system.update(&mut world, 0.25);
        assert_eq!(force(&world, player), Vec2::new(-20.0 * 50.0 * 2.5, 0.0));
        assert_eq!(world.entities.get::<SpeedBoost>(player).unwrap().remaining, 0.25);

        system.update(&mut world, 0.25);
        assert!(!world.entities.has::<SpeedBoost>(player));
    }
}
