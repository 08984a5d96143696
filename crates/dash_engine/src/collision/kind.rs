//! Collidable kinds and their physics bitmasks.

use dash_component::{Component, Entity};
use dash_event::EventPayload;
use dash_math::Vec2;
use serde::{Deserialize, Serialize};

use super::table::{Participant, resolve_contact};

/// Number of [`CollidableKind`] variants; dimension of the resolution table.
pub const KIND_COUNT: usize = 10;

/// Category bits, one per collidable kind.
pub mod category {
    pub const NONE: u32 = 0;
    pub const ALL: u32 = u32::MAX;

    pub const PLAYER: u32 = 1 << 0;
    pub const MONSTER: u32 = 1 << 1;
    pub const COLLECTIBLE: u32 = 1 << 2;
    pub const OBSTACLE: u32 = 1 << 3;
    pub const POWER_UP_BOX: u32 = 1 << 4;
    pub const WALL: u32 = 1 << 5;
    pub const FLOOR: u32 = 1 << 6;
    pub const GRAPPLE_HOOK: u32 = 1 << 7;
    pub const HOMING_MISSILE: u32 = 1 << 8;
    pub const TOOL: u32 = 1 << 9;
}

/// The closed set of things that can touch each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollidableKind {
    Player,
    Monster,
    Collectible,
    Obstacle,
    PowerUpBox,
    Wall,
    Floor,
    GrappleHook,
    HomingMissile,
    Tool,
}

impl CollidableKind {
    /// Every kind, in table order.
    pub const ALL: [CollidableKind; KIND_COUNT] = [
        CollidableKind::Player,
        CollidableKind::Monster,
        CollidableKind::Collectible,
        CollidableKind::Obstacle,
        CollidableKind::PowerUpBox,
        CollidableKind::Wall,
        CollidableKind::Floor,
        CollidableKind::GrappleHook,
        CollidableKind::HomingMissile,
        CollidableKind::Tool,
    ];

    /// Row/column of this kind in the resolution table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn category(self) -> u32 {
        1 << (self as u32)
    }

    /// Categories this kind is physically blocked by.
    #[must_use]
    pub const fn collision_mask(self) -> u32 {
        use category::*;
        match self {
            CollidableKind::Player => {
                ALL ^ PLAYER ^ COLLECTIBLE ^ GRAPPLE_HOOK ^ POWER_UP_BOX ^ HOMING_MISSILE ^ TOOL
            }
            CollidableKind::Monster => PLAYER | FLOOR | OBSTACLE | WALL,
            CollidableKind::Obstacle => PLAYER | MONSTER,
            CollidableKind::Wall => MONSTER,
            CollidableKind::Floor => PLAYER | MONSTER,
            CollidableKind::GrappleHook => {
                ALL ^ COLLECTIBLE ^ POWER_UP_BOX ^ PLAYER ^ GRAPPLE_HOOK ^ TOOL
            }
            CollidableKind::Collectible
            | CollidableKind::PowerUpBox
            | CollidableKind::HomingMissile
            | CollidableKind::Tool => NONE,
        }
    }

    /// Categories whose touch this kind wants reported.
    #[must_use]
    pub const fn contact_mask(self) -> u32 {
        use category::*;
        match self {
            CollidableKind::Player => {
                FLOOR | COLLECTIBLE | POWER_UP_BOX | HOMING_MISSILE | MONSTER | OBSTACLE | TOOL
            }
            CollidableKind::Monster => PLAYER | FLOOR | OBSTACLE | WALL,
            CollidableKind::Collectible => PLAYER,
            CollidableKind::Obstacle => HOMING_MISSILE | PLAYER | MONSTER | GRAPPLE_HOOK,
            CollidableKind::PowerUpBox => PLAYER,
            CollidableKind::Wall => MONSTER | GRAPPLE_HOOK | HOMING_MISSILE,
            CollidableKind::Floor => PLAYER | HOMING_MISSILE | GRAPPLE_HOOK,
            CollidableKind::GrappleHook => OBSTACLE | WALL | FLOOR,
            CollidableKind::HomingMissile => PLAYER | OBSTACLE | FLOOR | WALL,
            CollidableKind::Tool => PLAYER,
        }
    }

    /// Body size used when a record does not carry one.
    #[must_use]
    pub const fn default_size(self) -> Vec2 {
        match self {
            CollidableKind::Player => Vec2::new(70.0, 110.0),
            CollidableKind::Monster => Vec2::new(100.0, 140.0),
            CollidableKind::Floor => Vec2::new(300.0, 60.0),
            CollidableKind::GrappleHook => Vec2::new(100.0, 100.0),
            CollidableKind::HomingMissile => Vec2::new(50.0, 100.0),
            CollidableKind::Collectible
            | CollidableKind::Obstacle
            | CollidableKind::PowerUpBox
            | CollidableKind::Wall
            | CollidableKind::Tool => Vec2::new(60.0, 60.0),
        }
    }

    /// Whether bodies of this kind are moved by the integrator.
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(
            self,
            CollidableKind::Player
                | CollidableKind::Monster
                | CollidableKind::GrappleHook
                | CollidableKind::HomingMissile
        )
    }
}

impl std::fmt::Display for CollidableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Which collidable kind an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collider {
    pub kind: CollidableKind,
}

impl Collider {
    #[must_use]
    pub const fn new(kind: CollidableKind) -> Self {
        Self { kind }
    }

    /// Resolve a touch between `entity` (carrying this collider) and
    /// `other_entity` (carrying `other`) into the semantic event it produces.
    ///
    /// Swapping the two participants yields the same event.
    #[must_use]
    pub fn resolve(
        &self,
        entity: Entity,
        other: &Collider,
        other_entity: Entity,
        contact_point: Vec2,
    ) -> Option<EventPayload> {
        resolve_contact(
            Participant::new(entity, self.kind),
            Participant::new(other_entity, other.kind),
            contact_point,
        )
    }
}

impl Component for Collider {
    fn type_name() -> &'static str {
        "Collider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bits_follow_table_order() {
        assert_eq!(CollidableKind::Player.category(), category::PLAYER);
        assert_eq!(CollidableKind::Floor.category(), category::FLOOR);
        assert_eq!(CollidableKind::Tool.category(), category::TOOL);
        for (i, kind) in CollidableKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_player_masks() {
        let player = CollidableKind::Player;
        assert_eq!(player.collision_mask() & category::FLOOR, category::FLOOR);
        assert_eq!(player.collision_mask() & category::COLLECTIBLE, 0);
        assert_eq!(player.collision_mask() & category::PLAYER, 0);
        assert_ne!(player.contact_mask() & category::TOOL, 0);
        assert_eq!(CollidableKind::HomingMissile.collision_mask(), category::NONE);
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(CollidableKind::Player.default_size(), Vec2::new(70.0, 110.0));
        assert_eq!(CollidableKind::Monster.default_size(), Vec2::new(100.0, 140.0));
        assert_eq!(CollidableKind::Tool.default_size(), Vec2::new(60.0, 60.0));
    }
}
