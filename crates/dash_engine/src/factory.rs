//! Entity factories.
//!
//! Every routine registers the entity and its complete initial component set
//! in one call.

use dash_component::{Entity, EntityBuilder, EntityManager};
use dash_math::{Direction, Position, Vec2};
use tracing::trace;

use crate::collision::{CollidableKind, Collider};
use crate::components::{
    Collectible, GrappleHook, Health, HomingMissile, HookState, Patrol, Physics, PlayerState,
    PowerUpBox, Score, Sprite,
};
use crate::config::EngineConfig;
use crate::level::{EntityRecord, RecordKind};

/// Components every collidable body carries.
fn body<'a>(
    entities: &'a mut EntityManager,
    kind: CollidableKind,
    at: Vec2,
    physics: Physics,
    sprite: impl Into<String>,
) -> EntityBuilder<'a> {
    entities
        .build()
        .with(Position::at(at))
        .with(physics)
        .with(Collider::new(kind))
        .with(Sprite::new(sprite))
}

/// Spawn the entity a level record describes.
pub fn spawn_record(
    entities: &mut EntityManager,
    record: &EntityRecord,
    config: &EngineConfig,
) -> Entity {
    let kind = record.kind.collidable_kind();
    let builder = body(
        entities,
        kind,
        record.position,
        Physics::for_kind(kind, record.body_size()),
        record.sprite.as_str(),
    );
    let entity = match &record.kind {
        RecordKind::Monster => builder
            .with(Health::full(config.monster_health))
            .with(Patrol {
                direction: Direction::Left,
            })
            .id(),
        RecordKind::Collectible { points } => builder.with(Collectible { points: *points }).id(),
        RecordKind::PowerUpBox { power_up } => builder
            .with(PowerUpBox {
                power_up: power_up.clone(),
            })
            .id(),
        RecordKind::Obstacle | RecordKind::Wall | RecordKind::Floor | RecordKind::Tool => {
            builder.id()
        }
    };
    trace!(%entity, %kind, "spawned level entity");
    entity
}

/// Spawn the avatar of the player in seat `index`.
pub fn spawn_player(
    entities: &mut EntityManager,
    index: usize,
    at: Vec2,
    config: &EngineConfig,
) -> Entity {
    let kind = CollidableKind::Player;
    let physics = Physics::for_kind(kind, kind.default_size()).with_mass(config.player_mass);
    let entity = body(entities, kind, at, physics, format!("player{}", index + 1))
        .with(PlayerState::new(index))
        .with(Health::full(config.player_health))
        .with(Score::default())
        .id();
    trace!(%entity, index, "spawned player");
    entity
}

/// Spawn a grapple hook for `owner`, launched in the `facing` direction.
pub fn spawn_grapple_hook(
    entities: &mut EntityManager,
    owner: Entity,
    at: Vec2,
    facing: Direction,
    config: &EngineConfig,
) -> Entity {
    let kind = CollidableKind::GrappleHook;
    let launch = Vec2::new(
        config.hook_launch_velocity.x * facing.sign(),
        config.hook_launch_velocity.y,
    );
    let physics = Physics::for_kind(kind, kind.default_size()).with_velocity(launch);
    body(entities, kind, at, physics, "grapple_hook")
        .with(GrappleHook {
            owner,
            state: HookState::Flying,
        })
        .id()
}

/// Spawn a homing missile at `at` steering toward `target`.
pub fn spawn_homing_missile(entities: &mut EntityManager, at: Vec2, target: Entity) -> Entity {
    let kind = CollidableKind::HomingMissile;
    let physics = Physics::for_kind(kind, kind.default_size());
    body(entities, kind, at, physics, "homing_missile")
        .with(HomingMissile { target })
        .id()
}
