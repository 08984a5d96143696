//! Decoded level data handed to the engine by the host.

use dash_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::CollidableKind;

/// Level-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub name: String,
    /// Level extent in world units.
    pub size: Vec2,
    /// Player spawn points, used round-robin by seat index.
    #[serde(default)]
    pub spawn_points: Vec<Vec2>,
}

impl LevelRecord {
    /// Spawn point for the player in seat `index`.
    #[must_use]
    pub fn spawn_point(&self, index: usize) -> Option<Vec2> {
        if self.spawn_points.is_empty() {
            return None;
        }
        Some(self.spawn_points[index % self.spawn_points.len()])
    }
}

/// What a placed entity is, with its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordKind {
    Monster,
    Collectible { points: u32 },
    Obstacle,
    PowerUpBox { power_up: String },
    Wall,
    Floor,
    Tool,
}

impl RecordKind {
    #[must_use]
    pub fn collidable_kind(&self) -> CollidableKind {
        match self {
            RecordKind::Monster => CollidableKind::Monster,
            RecordKind::Collectible { .. } => CollidableKind::Collectible,
            RecordKind::Obstacle => CollidableKind::Obstacle,
            RecordKind::PowerUpBox { .. } => CollidableKind::PowerUpBox,
            RecordKind::Wall => CollidableKind::Wall,
            RecordKind::Floor => CollidableKind::Floor,
            RecordKind::Tool => CollidableKind::Tool,
        }
    }
}

/// One entity placed in a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(flatten)]
    pub kind: RecordKind,
    pub position: Vec2,
    pub sprite: String,
    /// Overrides the kind's default body size.
    #[serde(default)]
    pub size: Option<Vec2>,
}

impl EntityRecord {
    #[must_use]
    pub fn new(kind: RecordKind, position: Vec2, sprite: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            sprite: sprite.into(),
            size: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Body size, falling back to the kind's default.
    #[must_use]
    pub fn body_size(&self) -> Vec2 {
        self.size
            .unwrap_or_else(|| self.kind.collidable_kind().default_size())
    }
}
