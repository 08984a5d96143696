//! Pairwise contact resolution.
//!
//! A const `KIND_COUNT × KIND_COUNT` table maps every ordered pair of
//! [`CollidableKind`]s to an [`Interaction`]. The table is written only
//! through [`pair`], which fills both `(a, b)` and `(b, a)`, so it is
//! symmetric by construction and every cell is defined.
//!
//! Roles in the produced event follow each participant's kind. Call order
//! never matters.

use dash_component::Entity;
use dash_event::EventPayload;
use dash_math::Vec2;

use super::kind::{CollidableKind, KIND_COUNT};

/// What a touch between two kinds means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing happens.
    Ignore,
    PlayerFloor,
    PlayerMonster,
    PlayerObstacle,
    PlayerTool,
    PlayerCollectible,
    PlayerPowerUpBox,
    PlayerHomingMissile,
    MonsterWall,
    MonsterObstacle,
    HookObstacle,
    HookWall,
    HookFloor,
    /// A homing missile hit scenery and is destroyed.
    MissileBlocked,
}

type Table = [[Interaction; KIND_COUNT]; KIND_COUNT];

const fn pair(mut table: Table, a: CollidableKind, b: CollidableKind, cell: Interaction) -> Table {
    table[a as usize][b as usize] = cell;
    table[b as usize][a as usize] = cell;
    table
}

const fn build() -> Table {
    use CollidableKind::*;
    use Interaction as I;

    let t = [[I::Ignore; KIND_COUNT]; KIND_COUNT];
    let t = pair(t, Player, Floor, I::PlayerFloor);
    let t = pair(t, Player, Monster, I::PlayerMonster);
    let t = pair(t, Player, Obstacle, I::PlayerObstacle);
    let t = pair(t, Player, Tool, I::PlayerTool);
    let t = pair(t, Player, Collectible, I::PlayerCollectible);
    let t = pair(t, Player, PowerUpBox, I::PlayerPowerUpBox);
    let t = pair(t, Player, HomingMissile, I::PlayerHomingMissile);
    let t = pair(t, Monster, Wall, I::MonsterWall);
    let t = pair(t, Monster, Obstacle, I::MonsterObstacle);
    let t = pair(t, GrappleHook, Obstacle, I::HookObstacle);
    let t = pair(t, GrappleHook, Wall, I::HookWall);
    let t = pair(t, GrappleHook, Floor, I::HookFloor);
    let t = pair(t, HomingMissile, Obstacle, I::MissileBlocked);
    let t = pair(t, HomingMissile, Wall, I::MissileBlocked);
    pair(t, HomingMissile, Floor, I::MissileBlocked)
}

/// The resolution table, indexed by [`CollidableKind::index`].
pub const INTERACTIONS: Table = build();

/// The interaction between two kinds.
#[must_use]
pub const fn interaction(a: CollidableKind, b: CollidableKind) -> Interaction {
    INTERACTIONS[a.index()][b.index()]
}

/// One side of a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub entity: Entity,
    pub kind: CollidableKind,
}

impl Participant {
    #[must_use]
    pub const fn new(entity: Entity, kind: CollidableKind) -> Self {
        Self { entity, kind }
    }
}

/// Turn a touch between `a` and `b` at `point` into the event it produces,
/// or `None` for pairs that do not interact.
#[must_use]
pub fn resolve_contact(a: Participant, b: Participant, point: Vec2) -> Option<EventPayload> {
    // Only distinct kinds have non-ignore cells, so the kind picks the side.
    let role = |kind: CollidableKind| if a.kind == kind { a.entity } else { b.entity };

    use CollidableKind as K;
    let payload = match interaction(a.kind, b.kind) {
        Interaction::Ignore => return None,
        Interaction::PlayerFloor => EventPayload::PlayerFloorContact {
            player: role(K::Player),
            floor: role(K::Floor),
            contact_point: point,
        },
        Interaction::PlayerMonster => EventPayload::PlayerMonsterContact {
            player: role(K::Player),
            monster: role(K::Monster),
        },
        Interaction::PlayerObstacle => EventPayload::PlayerObstacleContact {
            player: role(K::Player),
            obstacle: role(K::Obstacle),
            contact_point: point,
        },
        Interaction::PlayerTool => EventPayload::PlayerToolContact {
            player: role(K::Player),
            tool: role(K::Tool),
        },
        Interaction::PlayerCollectible => EventPayload::PlayerCollectibleContact {
            player: role(K::Player),
            collectible: role(K::Collectible),
        },
        Interaction::PlayerPowerUpBox => EventPayload::PlayerPowerUpBoxContact {
            player: role(K::Player),
            power_up_box: role(K::PowerUpBox),
        },
        Interaction::PlayerHomingMissile => EventPayload::PlayerHomingMissileContact {
            player: role(K::Player),
            missile: role(K::HomingMissile),
        },
        Interaction::MonsterWall => EventPayload::MonsterWallContact {
            monster: role(K::Monster),
            wall: role(K::Wall),
        },
        Interaction::MonsterObstacle => EventPayload::MonsterObstacleContact {
            monster: role(K::Monster),
            obstacle: role(K::Obstacle),
        },
        Interaction::HookObstacle => EventPayload::GrappleHookObstacleContact {
            hook: role(K::GrappleHook),
            obstacle: role(K::Obstacle),
            contact_point: point,
        },
        Interaction::HookWall => EventPayload::GrappleHookWallContact {
            hook: role(K::GrappleHook),
            wall: role(K::Wall),
        },
        Interaction::HookFloor => EventPayload::GrappleHookFloorContact {
            hook: role(K::GrappleHook),
            floor: role(K::Floor),
        },
        Interaction::MissileBlocked => EventPayload::EntityRemoval {
            entity: role(K::HomingMissile),
        },
    };
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collider;

    fn entity_for(kind: CollidableKind) -> Entity {
        Entity::from_raw(kind.index() as u64 + 1)
    }

    #[test]
    fn test_table_is_symmetric() {
        for a in CollidableKind::ALL {
            for b in CollidableKind::ALL {
                assert_eq!(interaction(a, b), interaction(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_same_kind_never_interacts() {
        for kind in CollidableKind::ALL {
            assert_eq!(interaction(kind, kind), Interaction::Ignore, "{kind}");
        }
    }

    #[test]
    fn test_resolution_ignores_call_order() {
        let point = Vec2::new(12.0, 34.0);
        for a in CollidableKind::ALL {
            for b in CollidableKind::ALL {
                if a == b {
                    continue;
                }
                let pa = Participant::new(entity_for(a), a);
                let pb = Participant::new(entity_for(b), b);
                assert_eq!(
                    resolve_contact(pa, pb, point),
                    resolve_contact(pb, pa, point),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_player_floor_roles() {
        let player = Entity::from_raw(1);
        let floor = Entity::from_raw(2);
        let point = Vec2::new(0.0, 50.0);
        let from_floor = Collider::new(CollidableKind::Floor).resolve(
            floor,
            &Collider::new(CollidableKind::Player),
            player,
            point,
        );
        assert_eq!(
            from_floor,
            Some(EventPayload::PlayerFloorContact {
                player,
                floor,
                contact_point: point,
            })
        );
    }

    #[test]
    fn test_missile_blocked_removes_missile() {
        let missile = Participant::new(Entity::from_raw(7), CollidableKind::HomingMissile);
        let wall = Participant::new(Entity::from_raw(8), CollidableKind::Wall);
        assert_eq!(
            resolve_contact(wall, missile, Vec2::ZERO),
            Some(EventPayload::EntityRemoval {
                entity: Entity::from_raw(7)
            })
        );
    }

    #[test]
    fn test_unmapped_pairs() {
        let hook = Participant::new(Entity::from_raw(1), CollidableKind::GrappleHook);
        let coin = Participant::new(Entity::from_raw(2), CollidableKind::Collectible);
        let player = Participant::new(Entity::from_raw(3), CollidableKind::Player);
        assert_eq!(resolve_contact(hook, coin, Vec2::ZERO), None);
        assert_eq!(resolve_contact(player, hook, Vec2::ZERO), None);
        assert_eq!(interaction(CollidableKind::Wall, CollidableKind::Floor), Interaction::Ignore);
    }
}
