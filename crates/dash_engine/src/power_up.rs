//! Named power-up constructors.
//!
//! Power-up boxes carry only a name. The [`PowerUpRegistry`] maps that name to
//! a constructor that grants the effect to the player who opened the box.

use std::collections::HashMap;

use dash_component::{Entity, EntityManager};
use dash_math::{Position, Vec2};
use tracing::debug;

use crate::components::{PlayerState, SpeedBoost};
use crate::config::EngineConfig;
use crate::factory;

/// Grants a power-up to `player`.
pub type PowerUpConstructor = fn(&mut EntityManager, Entity, &EngineConfig);

pub const SPEED_BOOST: &str = "SpeedBoostPowerUp";
pub const HOMING_MISSILE: &str = "HomingMissilePowerUp";

/// Lookup table from power-up name to constructor.
#[derive(Clone)]
pub struct PowerUpRegistry {
    constructors: HashMap<String, PowerUpConstructor>,
}

impl PowerUpRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry with the built-in power-ups.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SPEED_BOOST, grant_speed_boost);
        registry.register(HOMING_MISSILE, launch_homing_missile);
        registry
    }

    /// Register or replace a constructor.
    pub fn register(&mut self, name: impl Into<String>, constructor: PowerUpConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Grant `name` to `player`. Unknown names are ignored and return `false`.
    pub fn grant(
        &self,
        name: &str,
        player: Entity,
        entities: &mut EntityManager,
        config: &EngineConfig,
    ) -> bool {
        match self.constructors.get(name) {
            Some(constructor) => {
                constructor(entities, player, config);
                debug!(%player, power_up = name, "power-up granted");
                true
            }
            None => {
                debug!(%player, power_up = name, "unknown power-up ignored");
                false
            }
        }
    }
}

impl Default for PowerUpRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for PowerUpRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PowerUpRegistry").field("power_ups", &names).finish()
    }
}

/// Faster running for a while. A second boost restarts the timer.
fn grant_speed_boost(entities: &mut EntityManager, player: Entity, config: &EngineConfig) {
    entities.insert(
        player,
        SpeedBoost {
            remaining: config.speed_boost_duration,
            multiplier: config.speed_boost_multiplier,
        },
    );
}

/// Fire a homing missile from above `player` at the nearest rival.
fn launch_homing_missile(entities: &mut EntityManager, player: Entity, _config: &EngineConfig) {
    let Some(origin) = entities.get::<Position>(player).map(|p| p.point) else {
        return;
    };
    let target = entities
        .snapshot::<PlayerState>()
        .into_iter()
        .filter(|(entity, _)| *entity != player)
        .filter_map(|(entity, _)| {
            let at = entities.get::<Position>(entity)?.point;
            Some((entity, origin.distance_squared(at)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity);

    if let Some(target) = target {
        factory::spawn_homing_missile(entities, origin + Vec2::new(0.0, 150.0), target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::HomingMissile;

    #[test]
    fn test_speed_boost() {
        let config = EngineConfig::default();
        let mut entities = EntityManager::new();
        let player = factory::spawn_player(&mut entities, 0, Vec2::ZERO, &config);

        let registry = PowerUpRegistry::with_defaults();
        assert!(registry.grant(SPEED_BOOST, player, &mut entities, &config));
        let boost = entities.get::<SpeedBoost>(player).unwrap();
        assert_eq!(boost.remaining, 15.0);
        assert_eq!(boost.multiplier, 2.5);
    }

    #[test]
    fn test_unknown_power_up_is_ignored() {
        let config = EngineConfig::default();
        let mut entities = EntityManager::new();
        let player = factory::spawn_player(&mut entities, 0, Vec2::ZERO, &config);
        let before = entities.component_names(player);

        assert!(!PowerUpRegistry::new().grant(SPEED_BOOST, player, &mut entities, &config));
        assert_eq!(entities.component_names(player), before);
    }

    #[test]
    fn test_missile_targets_nearest_rival() {
        let config = EngineConfig::default();
        let mut entities = EntityManager::new();
        let shooter = factory::spawn_player(&mut entities, 0, Vec2::ZERO, &config);
        let near = factory::spawn_player(&mut entities, 1, Vec2::new(200.0, 0.0), &config);
        let _far = factory::spawn_player(&mut entities, 2, Vec2::new(900.0, 0.0), &config);

        PowerUpRegistry::with_defaults().grant(HOMING_MISSILE, shooter, &mut entities, &config);
        let missiles = entities.snapshot::<HomingMissile>();
        assert_eq!(missiles.len(), 1);
        assert_eq!(missiles[0].1.target, near);
    }

    #[test]
    fn test_missile_needs_a_rival() {
        let config = EngineConfig::default();
        let mut entities = EntityManager::new();
        let alone = factory::spawn_player(&mut entities, 0, Vec2::ZERO, &config);
        PowerUpRegistry::with_defaults().grant(HOMING_MISSILE, alone, &mut entities, &config);
        assert_eq!(entities.count::<HomingMissile>(), 0);
    }
}
