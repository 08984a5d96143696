//! Event payloads exchanged between systems.
//!
//! Every occurrence in the simulation is one variant of the closed
//! [`EventPayload`] set, wrapped in an [`Event`] that carries its timestamp.
//! Listeners are registered per [`EventKind`], the payload's fieldless tag.

use dash_component::Entity;
use dash_math::{Direction, Vec2};
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

// ── Payloads ────────────────────────────────────────────────────────────────

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    // ── Lifecycle ──
    /// Remove an entity and every component keyed to it.
    EntityRemoval { entity: Entity },
    /// Teleport an entity's position to `destination`.
    Move { entity: Entity, destination: Vec2 },

    // ── Player intents ──
    /// A player started running.
    PlayerMove { player: Entity, direction: Direction },
    /// A player released a run direction.
    PlayerStop { player: Entity, direction: Direction },
    PlayerJump { player: Entity },
    /// A player fired or released the grapple hook.
    PlayerHook { player: Entity },

    // ── Contacts (produced by collision resolution) ──
    PlayerFloorContact {
        player: Entity,
        floor: Entity,
        contact_point: Vec2,
    },
    PlayerMonsterContact { player: Entity, monster: Entity },
    PlayerObstacleContact {
        player: Entity,
        obstacle: Entity,
        contact_point: Vec2,
    },
    PlayerToolContact { player: Entity, tool: Entity },
    PlayerCollectibleContact { player: Entity, collectible: Entity },
    PlayerPowerUpBoxContact { player: Entity, power_up_box: Entity },
    PlayerHomingMissileContact { player: Entity, missile: Entity },
    MonsterWallContact { monster: Entity, wall: Entity },
    MonsterObstacleContact { monster: Entity, obstacle: Entity },
    GrappleHookObstacleContact {
        hook: Entity,
        obstacle: Entity,
        contact_point: Vec2,
    },
    GrappleHookWallContact { hook: Entity, wall: Entity },
    GrappleHookFloorContact { hook: Entity, floor: Entity },

    // ── Outcomes ──
    /// A player stomped a monster from above.
    PlayerAttacksMonster { monster: Entity },
    /// A monster hit a player from the side or below.
    MonsterAttacksPlayer { monster: Entity, player: Entity },
    /// A named power-up should be granted to `player`.
    PowerUpRequest { player: Entity, power_up: String },
}

impl EventPayload {
    /// The payload's kind tag.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::EntityRemoval { .. } => EventKind::EntityRemoval,
            EventPayload::Move { .. } => EventKind::Move,
            EventPayload::PlayerMove { .. } => EventKind::PlayerMove,
            EventPayload::PlayerStop { .. } => EventKind::PlayerStop,
            EventPayload::PlayerJump { .. } => EventKind::PlayerJump,
            EventPayload::PlayerHook { .. } => EventKind::PlayerHook,
            EventPayload::PlayerFloorContact { .. } => EventKind::PlayerFloorContact,
            EventPayload::PlayerMonsterContact { .. } => EventKind::PlayerMonsterContact,
            EventPayload::PlayerObstacleContact { .. } => EventKind::PlayerObstacleContact,
            EventPayload::PlayerToolContact { .. } => EventKind::PlayerToolContact,
            EventPayload::PlayerCollectibleContact { .. } => EventKind::PlayerCollectibleContact,
            EventPayload::PlayerPowerUpBoxContact { .. } => EventKind::PlayerPowerUpBoxContact,
            EventPayload::PlayerHomingMissileContact { .. } => {
                EventKind::PlayerHomingMissileContact
            }
            EventPayload::MonsterWallContact { .. } => EventKind::MonsterWallContact,
            EventPayload::MonsterObstacleContact { .. } => EventKind::MonsterObstacleContact,
            EventPayload::GrappleHookObstacleContact { .. } => {
                EventKind::GrappleHookObstacleContact
            }
            EventPayload::GrappleHookWallContact { .. } => EventKind::GrappleHookWallContact,
            EventPayload::GrappleHookFloorContact { .. } => EventKind::GrappleHookFloorContact,
            EventPayload::PlayerAttacksMonster { .. } => EventKind::PlayerAttacksMonster,
            EventPayload::MonsterAttacksPlayer { .. } => EventKind::MonsterAttacksPlayer,
            EventPayload::PowerUpRequest { .. } => EventKind::PowerUpRequest,
        }
    }
}

/// Fieldless tag of an [`EventPayload`] variant. Listener routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    EntityRemoval,
    Move,
    PlayerMove,
    PlayerStop,
    PlayerJump,
    PlayerHook,
    PlayerFloorContact,
    PlayerMonsterContact,
    PlayerObstacleContact,
    PlayerToolContact,
    PlayerCollectibleContact,
    PlayerPowerUpBoxContact,
    PlayerHomingMissileContact,
    MonsterWallContact,
    MonsterObstacleContact,
    GrappleHookObstacleContact,
    GrappleHookWallContact,
    GrappleHookFloorContact,
    PlayerAttacksMonster,
    MonsterAttacksPlayer,
    PowerUpRequest,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

// ── Envelope ────────────────────────────────────────────────────────────────

/// An immutable, timestamped occurrence.
///
/// Events are transient: once every listener of their kind has handled them
/// they are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened.
    pub timestamp: Timestamp,
    /// What happened.
    pub payload: EventPayload,
}

impl Event {
    #[must_use]
    pub fn new(payload: EventPayload, timestamp: Timestamp) -> Self {
        Self { timestamp, payload }
    }

    /// The event's kind tag.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let e = Entity::from_raw(1);
        let event = Event::new(
            EventPayload::PlayerFloorContact {
                player: e,
                floor: Entity::from_raw(2),
                contact_point: Vec2::new(0.0, 50.0),
            },
            Timestamp::from_secs(1.0),
        );
        assert_eq!(event.kind(), EventKind::PlayerFloorContact);
        assert_eq!(
            EventPayload::EntityRemoval { entity: e }.kind(),
            EventKind::EntityRemoval
        );
        assert_eq!(EventKind::MonsterAttacksPlayer.to_string(), "MonsterAttacksPlayer");
    }

    #[test]
    fn test_event_survives_messagepack() {
        let event = Event::new(
            EventPayload::PowerUpRequest {
                player: Entity::from_raw(3),
                power_up: "SpeedBoostPowerUp".to_string(),
            },
            Timestamp::from_secs(2.5),
        );
        let bytes = rmp_serde::to_vec_named(&event).unwrap();
        let restored: Event = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(event, restored);
    }
}
