//! 2D position component.
//!
//! [`Position`] places an entity in level space: the center point of its body
//! plus a rotation in radians. Level space is y-up, so a larger `y` is higher
//! on screen.

use dash_component::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Center point and rotation of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Level-space center point.
    pub point: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
}

impl Position {
    /// The origin with no rotation.
    pub const ORIGIN: Self = Self {
        point: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Create a position at `point` with no rotation.
    #[must_use]
    pub const fn at(point: Vec2) -> Self {
        Self {
            point,
            rotation: 0.0,
        }
    }

    /// Create a position from raw coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self::at(Vec2::new(x, y))
    }

    /// Translate by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.point += offset;
        self
    }

    /// Horizontal coordinate of the center point.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.point.x
    }

    /// Vertical coordinate of the center point.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.point.y
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}
