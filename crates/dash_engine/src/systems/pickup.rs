//! Collectibles and power-up boxes.

use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use tracing::debug;

use crate::components::{Collectible, PowerUpBox, Score};
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct PickupSystem;

impl PickupSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::PlayerCollectibleContact,
        EventKind::PlayerPowerUpBoxContact,
        EventKind::PowerUpRequest,
    ];
}

impl Listener<World> for PickupSystem {
    fn name(&self) -> &'static str {
        "pickup"
    }

    fn handle(&mut self, event: &Event, world: &mut World, emitter: &mut Emitter) {
        match &event.payload {
            EventPayload::PlayerCollectibleContact {
                player,
                collectible,
            } => {
                // A collectible touched twice in one frame is already gone.
                let Some(points) = world.entities.get::<Collectible>(*collectible).map(|c| c.points)
                else {
                    return;
                };
                if let Some(score) = world.entities.get_mut::<Score>(*player) {
                    score.value += points;
                    debug!(%player, points, score = score.value, "collectible picked up");
                }
                emitter.emit(EventPayload::EntityRemoval {
                    entity: *collectible,
                });
            }
            EventPayload::PlayerPowerUpBoxContact {
                player,
                power_up_box,
            } => {
                let Some(power_up) = world
                    .entities
                    .get::<PowerUpBox>(*power_up_box)
                    .map(|b| b.power_up.clone())
                else {
                    return;
                };
                emitter.emit(EventPayload::PowerUpRequest {
                    player: *player,
                    power_up,
                });
                emitter.emit(EventPayload::EntityRemoval {
                    entity: *power_up_box,
                });
            }
            EventPayload::PowerUpRequest { player, power_up } => {
                world
                    .power_ups
                    .grant(power_up, *player, &mut world.entities, &world.config);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SpeedBoost;
    use crate::level::RecordKind;
    use crate::systems::testing;

    #[test]
    fn test_collectible_scores() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let coin = testing::record_at(&mut world, RecordKind::Collectible { points: 10 }, 0.0, 0.0);

        let emitted = testing::handle(
            &mut PickupSystem,
            &mut world,
            EventPayload::PlayerCollectibleContact {
                player,
                collectible: coin,
            },
        );
        assert_eq!(world.entities.get::<Score>(player).unwrap().value, 10);
        assert_eq!(emitted, vec![EventPayload::EntityRemoval { entity: coin }]);
    }

    #[test]
    fn test_power_up_box_requests_power_up() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let power_up_box = testing::record_at(
            &mut world,
            RecordKind::PowerUpBox {
                power_up: "SpeedBoostPowerUp".to_string(),
            },
            0.0,
            0.0,
        );

        let emitted = testing::handle(
            &mut PickupSystem,
            &mut world,
            EventPayload::PlayerPowerUpBoxContact {
                player,
                power_up_box,
            },
        );
        assert_eq!(
            emitted,
            vec![
                EventPayload::PowerUpRequest {
                    player,
                    power_up: "SpeedBoostPowerUp".to_string(),
                },
                EventPayload::EntityRemoval {
                    entity: power_up_box
                },
            ]
        );

        testing::handle(&mut PickupSystem, &mut world, emitted[0].clone());
        assert!(world.entities.has::<SpeedBoost>(player));
    }

    #[test]
    fn test_unknown_power_up_ignored() {
        let mut world = testing::world();
        let player = testing::player_at(&mut world, 0.0, 0.0);
        let emitted = testing::handle(
            &mut PickupSystem,
            &mut world,
            EventPayload::PowerUpRequest {
                player,
                power_up: "Teleporter".to_string(),
            },
        );
        assert!(emitted.is_empty());
        assert!(!world.entities.has::<SpeedBoost>(player));
    }
}
