//! Read-only frame views for the rendering host.

use dash_component::Entity;
use dash_event::Timestamp;
use dash_math::{Position, Vec2};
use serde::{Deserialize, Serialize};

use crate::collision::{CollidableKind, Collider};
use crate::components::{Health, Physics, PlayerState, Score, Sprite};
use crate::world::World;

/// Everything the renderer needs about one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFrame {
    pub entity: Entity,
    pub kind: Option<CollidableKind>,
    pub position: Vec2,
    pub rotation: f32,
    pub size: Vec2,
    pub velocity: Vec2,
    pub sprite: Option<String>,
}

/// All positioned entities at the end of a tick, in entity order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub time: Timestamp,
    pub entities: Vec<EntityFrame>,
}

impl FrameSnapshot {
    /// Capture every entity that has a position.
    #[must_use]
    pub fn capture(world: &World, tick: u64) -> Self {
        let store = &world.entities;
        let entities = store
            .entities()
            .into_iter()
            .filter_map(|entity| {
                let position = store.get::<Position>(entity)?;
                let physics = store.get::<Physics>(entity);
                Some(EntityFrame {
                    entity,
                    kind: store.get::<Collider>(entity).map(|c| c.kind),
                    position: position.point,
                    rotation: position.rotation,
                    size: physics.map_or(Vec2::ZERO, |p| p.size),
                    velocity: physics.map_or(Vec2::ZERO, |p| p.velocity),
                    sprite: store.get::<Sprite>(entity).map(|s| s.name.clone()),
                })
            })
            .collect();
        Self {
            tick,
            time: world.time,
            entities,
        }
    }

    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&EntityFrame> {
        self.entities.iter().find(|frame| frame.entity == entity)
    }
}

/// Overlay data for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub index: usize,
    pub entity: Entity,
    pub score: u32,
    pub health: f32,
    pub position: Vec2,
    pub grounded: bool,
}

impl PlayerInfo {
    /// Collect overlay data for `entity`, if it is a live player.
    #[must_use]
    pub fn capture(world: &World, entity: Entity) -> Option<Self> {
        let store = &world.entities;
        let state = store.get::<PlayerState>(entity)?;
        Some(Self {
            index: state.index,
            entity,
            score: store.get::<Score>(entity).map_or(0, |s| s.value),
            health: store.get::<Health>(entity).map_or(0.0, |h| h.current),
            position: world.position(entity).unwrap_or(Vec2::ZERO),
            grounded: state.is_grounded(),
        })
    }
}
