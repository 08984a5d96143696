//! Axis-aligned bounding boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its center and full size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Aabb {
    /// Center point.
    pub center: Vec2,
    /// Full width and height.
    pub size: Vec2,
}

impl Aabb {
    /// Create a box from its center and full size.
    #[must_use]
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Half the size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// The y coordinate of the bottom edge (level space is y-up).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    /// The y coordinate of the top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    /// Returns `true` if the two boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents() + other.half_extents();
        delta.x <= reach.x && delta.y <= reach.y
    }

    /// Center of the overlapping region, or `None` when the boxes are apart.
    #[must_use]
    pub fn overlap_center(&self, other: &Aabb) -> Option<Vec2> {
        if !self.intersects(other) {
            return None;
        }
        let min = Vec2::new(self.left().max(other.left()), self.bottom().max(other.bottom()));
        let max = Vec2::new(self.right().min(other.right()), self.top().min(other.top()));
        Some((min + max) * 0.5)
    }
}
