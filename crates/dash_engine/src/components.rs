//! Component records attached to game entities.
//!
//! [`Position`](dash_math::Position) lives in `dash_math`; [`Collider`] in
//! [`collision`](crate::collision). Everything else an entity can carry is
//! defined here.
//!
//! [`Collider`]: crate::collision::Collider

use dash_component::{Component, Entity};
use dash_math::{Aabb, Direction, Position, Vec2};
use serde::{Deserialize, Serialize};

use crate::collision::CollidableKind;

// ── Physics ─────────────────────────────────────────────────────────────────

/// Rigid-body state read and written by the host's integrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Physics {
    /// Full body width and height.
    pub size: Vec2,
    pub velocity: Vec2,
    /// Force accumulated this tick. Cleared at the start of every tick.
    pub force: Vec2,
    pub mass: f32,
    pub category_bit_mask: u32,
    pub collision_bit_mask: u32,
    pub contact_bit_mask: u32,
    pub is_dynamic: bool,
}

impl Physics {
    /// A body of `kind` with the kind's bitmasks, unit mass, and no motion.
    #[must_use]
    pub fn for_kind(kind: CollidableKind, size: Vec2) -> Self {
        Self {
            size,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass: 1.0,
            category_bit_mask: kind.category(),
            collision_bit_mask: kind.collision_mask(),
            contact_bit_mask: kind.contact_mask(),
            is_dynamic: kind.is_dynamic(),
        }
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// The body's box when centered on `position`.
    #[must_use]
    pub fn bounds(&self, position: &Position) -> Aabb {
        Aabb::new(position.point, self.size)
    }

    /// Whether a touch between the two bodies should be reported.
    #[must_use]
    pub fn reports_contact_with(&self, other: &Physics) -> bool {
        self.contact_bit_mask & other.category_bit_mask != 0
            || other.contact_bit_mask & self.category_bit_mask != 0
    }

    /// Whether the two bodies block each other.
    #[must_use]
    pub fn collides_with(&self, other: &Physics) -> bool {
        self.collision_bit_mask & other.category_bit_mask != 0
            && other.collision_bit_mask & self.category_bit_mask != 0
    }
}

impl Component for Physics {
    fn type_name() -> &'static str {
        "Physics"
    }
}

// ── Players ─────────────────────────────────────────────────────────────────

/// Input-driven state of a player avatar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    /// Seat index of the player, as used by intents.
    pub index: usize,
    /// Grounded and allowed to take off.
    pub can_jump: bool,
    /// Allowed to apply run force.
    pub can_move: bool,
    /// Held run direction, if any.
    pub moving: Option<Direction>,
    pub facing: Direction,
    /// A jump was accepted and its impulse is due on the next tick.
    pub pending_jump: bool,
    /// The player's grapple hook, while one is out.
    pub hook: Option<Entity>,
}

impl PlayerState {
    /// A freshly spawned player, airborne until its first landing.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            can_jump: false,
            can_move: false,
            moving: None,
            facing: Direction::Right,
            pending_jump: false,
            hook: None,
        }
    }

    /// Grounded players may jump and run.
    pub fn land(&mut self) {
        self.can_jump = true;
        self.can_move = true;
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.can_jump
    }
}

impl Component for PlayerState {
    fn type_name() -> &'static str {
        "PlayerState"
    }
}

/// Points collected by a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Score {
    pub value: u32,
}

impl Component for Score {
    fn type_name() -> &'static str {
        "Score"
    }
}

/// A temporary run-speed multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpeedBoost {
    /// Seconds left.
    pub remaining: f32,
    pub multiplier: f32,
}

impl SpeedBoost {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for SpeedBoost {
    fn type_name() -> &'static str {
        "SpeedBoost"
    }
}

// ── Shared ──────────────────────────────────────────────────────────────────

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    /// Create a health component at full HP.
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` while HP is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// Name of the texture the renderer draws for an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
}

impl Sprite {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}

// ── Pickups ─────────────────────────────────────────────────────────────────

/// A coin or gem worth `points`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collectible {
    pub points: u32,
}

impl Component for Collectible {
    fn type_name() -> &'static str {
        "Collectible"
    }
}

/// A box that grants the named power-up when touched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PowerUpBox {
    pub power_up: String,
}

impl Component for PowerUpBox {
    fn type_name() -> &'static str {
        "PowerUpBox"
    }
}

// ── Hostiles and projectiles ────────────────────────────────────────────────

/// Horizontal patrol of a monster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Patrol {
    pub direction: Direction,
}

impl Component for Patrol {
    fn type_name() -> &'static str {
        "Patrol"
    }
}

/// A missile steering toward `target`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomingMissile {
    pub target: Entity,
}

impl Component for HomingMissile {
    fn type_name() -> &'static str {
        "HomingMissile"
    }
}

/// Where a grapple hook is in its flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum HookState {
    Flying,
    /// Stuck to an obstacle at `anchor`.
    Attached { anchor: Vec2 },
}

/// A grapple hook fired by `owner`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrappleHook {
    pub owner: Entity,
    pub state: HookState,
}

impl GrappleHook {
    /// The anchor point, once attached.
    #[must_use]
    pub fn anchor(&self) -> Option<Vec2> {
        match self.state {
            HookState::Attached { anchor } => Some(anchor),
            HookState::Flying => None,
        }
    }
}

impl Component for GrappleHook {
    fn type_name() -> &'static str {
        "GrappleHook"
    }
}
