//! Engine tuning parameters.

use dash_event::DEFAULT_MAX_DEPTH;
use dash_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Tunables of the simulation.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting of follow-up events in a single dispatch.
    pub max_dispatch_depth: usize,
    /// Impulse applied once when a jump is accepted.
    pub jump_impulse: Vec2,
    /// Run force per unit of mass.
    pub run_force: f32,
    /// Horizontal speed above which no more run force is applied.
    pub max_run_speed: f32,
    pub player_mass: f32,
    pub player_health: f32,
    /// Where players spawn when the level has no spawn points.
    pub default_spawn: Vec2,
    pub monster_health: f32,
    /// Patrol speed of monsters.
    pub monster_speed: f32,
    /// Patrol force per unit of mass.
    pub monster_patrol_force: f32,
    /// Damage dealt to a monster by a stomp.
    pub stomp_damage: f32,
    /// Damage dealt to a player by a monster touch.
    pub monster_damage: f32,
    /// Damage dealt to a player by a homing missile.
    pub missile_damage: f32,
    /// Steering force of homing missiles per unit of mass.
    pub missile_thrust: f32,
    /// Launch speed of a grapple hook along its facing axis, plus lift.
    pub hook_launch_velocity: Vec2,
    /// Pull toward an attached hook's anchor, per unit of mass.
    pub hook_pull_force: f32,
    pub speed_boost_duration: f32,
    pub speed_boost_multiplier: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_dispatch_depth: DEFAULT_MAX_DEPTH,
            jump_impulse: Vec2::new(0.0, 8500.0),
            run_force: 20.0,
            max_run_speed: 150.0,
            player_mass: 50.0,
            player_health: 3.0,
            default_spawn: Vec2::new(100.0, 300.0),
            monster_health: 1.0,
            monster_speed: 100.0,
            monster_patrol_force: 20.0,
            stomp_damage: 1.0,
            monster_damage: 1.0,
            missile_damage: 1.0,
            missile_thrust: 40.0,
            hook_launch_velocity: Vec2::new(600.0, 600.0),
            hook_pull_force: 30.0,
            speed_boost_duration: 15.0,
            speed_boost_multiplier: 2.5,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }

    #[must_use]
    pub fn with_jump_impulse(mut self, impulse: Vec2) -> Self {
        self.jump_impulse = impulse;
        self
    }

    #[must_use]
    pub fn with_player_mass(mut self, mass: f32) -> Self {
        self.player_mass = mass;
        self
    }

    #[must_use]
    pub fn with_run(mut self, force: f32, max_speed: f32) -> Self {
        self.run_force = force;
        self.max_run_speed = max_speed;
        self
    }

    #[must_use]
    pub fn with_speed_boost(mut self, duration: f32, multiplier: f32) -> Self {
        self.speed_boost_duration = duration;
        self.speed_boost_multiplier = multiplier;
        self
    }

    /// Reject configurations that cannot drive a simulation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_dispatch_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "max_dispatch_depth must be at least 1".to_string(),
            ));
        }
        let positive = [
            ("player_mass", self.player_mass),
            ("player_health", self.player_health),
            ("monster_health", self.monster_health),
            ("speed_boost_multiplier", self.speed_boost_multiplier),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("run_force", self.run_force),
            ("max_run_speed", self.max_run_speed),
            ("monster_speed", self.monster_speed),
            ("monster_patrol_force", self.monster_patrol_force),
            ("missile_thrust", self.missile_thrust),
            ("hook_pull_force", self.hook_pull_force),
            ("speed_boost_duration", self.speed_boost_duration),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
