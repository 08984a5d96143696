//! Level files: a [`LevelRecord`] plus its placed entities, as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use dash_engine::{EntityRecord, LevelRecord, RecordKind};
use dash_math::Vec2;
use serde::{Deserialize, Serialize};

/// On-disk shape of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub level: LevelRecord,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

impl LevelFile {
    /// Read and decode a level from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading level {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("decoding level {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// A small built-in level: a floor strip, a walled monster pen, pickups.
    #[must_use]
    pub fn demo() -> Self {
        let floor = |x: f32| EntityRecord::new(RecordKind::Floor, Vec2::new(x, 0.0), "ground");
        let coin = |x: f32| {
            EntityRecord::new(RecordKind::Collectible { points: 10 }, Vec2::new(x, 70.0), "coin")
        };
        let mut entities: Vec<EntityRecord> =
            (0..8).map(|i| floor(150.0 + i as f32 * 300.0)).collect();
        entities.extend([
            EntityRecord::new(RecordKind::Wall, Vec2::new(900.0, 100.0), "wall"),
            EntityRecord::new(RecordKind::Wall, Vec2::new(1500.0, 100.0), "wall"),
            EntityRecord::new(RecordKind::Monster, Vec2::new(1200.0, 100.0), "slime"),
            EntityRecord::new(RecordKind::Obstacle, Vec2::new(600.0, 60.0), "crate"),
            coin(400.0),
            coin(500.0),
            EntityRecord::new(
                RecordKind::PowerUpBox {
                    power_up: "SpeedBoostPowerUp".to_string(),
                },
                Vec2::new(750.0, 70.0),
                "mystery_box",
            ),
            EntityRecord::new(RecordKind::Tool, Vec2::new(1800.0, 70.0), "wrench"),
        ]);
        Self {
            level: LevelRecord {
                name: "demo".to_string(),
                size: Vec2::new(2400.0, 800.0),
                spawn_points: vec![Vec2::new(100.0, 200.0), Vec2::new(220.0, 200.0)],
            },
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_survives_json() {
        let demo = LevelFile::demo();
        let text = serde_json::to_string_pretty(&demo).unwrap();
        assert_eq!(LevelFile::from_json(&text).unwrap(), demo);
    }

    #[test]
    fn test_decode_minimal() {
        let level = LevelFile::from_json(
            r#"{
                "level": { "name": "tiny", "size": [500.0, 300.0] },
                "entities": [
                    { "type": "Floor", "position": [250.0, 0.0], "sprite": "ground", "size": [500.0, 60.0] },
                    { "type": "PowerUpBox", "power_up": "SpeedBoostPowerUp", "position": [100.0, 70.0], "sprite": "box" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(level.level.name, "tiny");
        assert!(level.level.spawn_points.is_empty());
        assert_eq!(level.entities.len(), 2);
        assert_eq!(level.entities[0].body_size(), Vec2::new(500.0, 60.0));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result = LevelFile::from_json(
            r#"{ "level": { "name": "bad", "size": [1.0, 1.0] },
                 "entities": [ { "type": "Dragon", "position": [0.0, 0.0], "sprite": "x" } ] }"#,
        );
        assert!(result.is_err());
    }
}
