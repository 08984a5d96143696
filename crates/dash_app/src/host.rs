//! Stand-in for the rendering/physics host.
//!
//! A naive integrator turns the engine's accumulated forces into motion, and
//! an all-pairs AABB pass reports touches back to the engine. A touch is
//! reported once, on the frame it begins.

use std::collections::HashSet;

use anyhow::Result;
use dash_component::Entity;
use dash_engine::GameEngine;
use dash_engine::components::{Physics, PlayerState};
use dash_event::EventPayload;
use dash_math::{Aabb, Position, Vec2};
use tracing::{debug, trace};

/// A touch found by the broad phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
    pub point: Vec2,
}

/// Host-side physics parameters and broad-phase memory.
#[derive(Debug, Clone)]
pub struct Host {
    /// Acceleration applied to every dynamic body.
    pub gravity: Vec2,
    /// Bodies below this height have fallen out of the level.
    pub fall_limit: f32,
    /// Pairs found touching on the previous frame, lower id first.
    touching: HashSet<(Entity, Entity)>,
}

impl Default for Host {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -900.0),
            fall_limit: -500.0,
            touching: HashSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    at: Vec2,
    velocity: Vec2,
    physics: Physics,
}

impl Body {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.at, self.physics.size)
    }
}

fn bodies(engine: &GameEngine) -> Vec<Body> {
    let store = engine.entities();
    let Some(physics) = store.storage::<Physics>() else {
        return Vec::new();
    };
    physics
        .iter()
        .filter_map(|(entity, physics)| {
            let at = store.get::<Position>(entity)?.point;
            Some(Body {
                entity,
                at,
                velocity: physics.velocity,
                physics: *physics,
            })
        })
        .collect()
}

/// Move `body` out of `blocker` along the axis of least penetration, leaving
/// the two flush.
fn push_out(body: &mut Body, blocker: Aabb) {
    let reach = body.physics.size * 0.5 + blocker.half_extents();
    let delta = body.at - blocker.center;
    let depth = reach - delta.abs();
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return;
    }
    if depth.y <= depth.x {
        body.at.y = blocker.center.y + reach.y * delta.y.signum();
        body.velocity.y = 0.0;
    } else {
        body.at.x = blocker.center.x + reach.x * delta.x.signum();
        body.velocity.x = 0.0;
    }
}

/// How fast `body` closes in on `other`.
fn approach(body: &Body, other: &Body) -> f32 {
    body.velocity.dot(other.at - body.at)
}

fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Host {
    /// Integrate one tick: forces become velocity changes (impulse per tick),
    /// gravity accelerates, blocking bodies push back. Results are synced
    /// into the engine.
    ///
    /// Static blockers are resolved first. Between two blocking dynamic
    /// bodies, the one moving into the other is pushed back.
    pub fn integrate(&self, engine: &mut GameEngine, dt: f32) -> Result<()> {
        let all = bodies(engine);
        let statics: Vec<&Body> = all.iter().filter(|b| !b.physics.is_dynamic).collect();

        let mut moving: Vec<Body> = Vec::new();
        for body in all.iter().filter(|b| b.physics.is_dynamic) {
            let p = &body.physics;
            let mut next = *body;
            next.velocity = p.velocity + p.force / p.mass + self.gravity * dt;
            next.at = body.at + next.velocity * dt;
            for blocker in statics.iter().filter(|s| p.collides_with(&s.physics)) {
                push_out(&mut next, blocker.bounds());
            }
            moving.push(next);
        }

        for i in 0..moving.len() {
            for j in i + 1..moving.len() {
                let (head, tail) = moving.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if !a.physics.collides_with(&b.physics) {
                    continue;
                }
                if approach(a, b) >= approach(b, a) {
                    push_out(a, b.bounds());
                } else {
                    push_out(b, a.bounds());
                }
            }
        }

        let fallen: Vec<Entity> = moving
            .iter()
            .filter(|b| b.at.y < self.fall_limit)
            .map(|b| b.entity)
            .collect();
        engine.sync_velocities(moving.iter().map(|b| (b.entity, b.velocity)));
        engine.sync_positions(moving.iter().map(|b| (b.entity, b.at)));
        for entity in fallen {
            self.recover_fallen(engine, entity)?;
        }
        Ok(())
    }

    /// Players fall back to their spawn point; anything else is removed.
    fn recover_fallen(&self, engine: &mut GameEngine, entity: Entity) -> Result<()> {
        let seat = engine.entities().get::<PlayerState>(entity).map(|s| s.index);
        let respawn = seat.map(|index| {
            engine
                .level()
                .and_then(|level| level.spawn_point(index))
                .unwrap_or(engine.config().default_spawn)
        });
        match respawn {
            Some(destination) => {
                debug!(%entity, "player fell out, respawning");
                engine.dispatch(EventPayload::Move {
                    entity,
                    destination,
                })?;
                engine.sync_velocities([(entity, Vec2::ZERO)]);
            }
            None => {
                debug!(%entity, "body fell out, removing");
                engine.dispatch(EventPayload::EntityRemoval { entity })?;
            }
        }
        Ok(())
    }

    /// Pairs of bodies that started touching since the last call and want
    /// the touch reported. Pairs that keep touching are not repeated until
    /// they separate.
    pub fn detect_contacts(&mut self, engine: &GameEngine) -> Vec<Contact> {
        let all = bodies(engine);
        let mut touching = HashSet::new();
        let mut contacts = Vec::new();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                if !a.physics.reports_contact_with(&b.physics) {
                    continue;
                }
                let Some(point) = a.bounds().overlap_center(&b.bounds()) else {
                    continue;
                };
                let key = pair_key(a.entity, b.entity);
                touching.insert(key);
                if !self.touching.contains(&key) {
                    contacts.push(Contact {
                        a: a.entity,
                        b: b.entity,
                        point,
                    });
                }
            }
        }
        self.touching = touching;
        contacts
    }

    /// Report contacts to the engine. Returns how many produced an event.
    pub fn report_contacts(&self, engine: &mut GameEngine, contacts: &[Contact]) -> Result<usize> {
        let mut resolved = 0;
        for contact in contacts {
            if let Some(kind) = engine.handle_collision(contact.a, contact.b, contact.point)? {
                trace!(a = %contact.a, b = %contact.b, %kind, "contact resolved");
                resolved += 1;
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_engine::components::{Health, Patrol};
    use dash_engine::{EngineConfig, EntityRecord, LevelRecord, RecordKind};

    fn engine(records: &[EntityRecord], spawn: Vec2) -> GameEngine {
        let mut engine = GameEngine::new(EngineConfig::default()).unwrap();
        let level = LevelRecord {
            name: "host-test".to_string(),
            size: Vec2::new(1000.0, 600.0),
            spawn_points: vec![spawn],
        };
        engine.setup_level(level, records);
        engine.setup_players(1);
        engine
    }

    /// One frame of the host loop.
    fn step(host: &mut Host, engine: &mut GameEngine) {
        let dt = 1.0 / 60.0;
        engine.update(dt).unwrap();
        host.integrate(engine, dt as f32).unwrap();
        let contacts = host.detect_contacts(engine);
        host.report_contacts(engine, &contacts).unwrap();
    }

    fn monster_on_floor() -> [EntityRecord; 2] {
        // Floor top at 30; monster bottom at 30, top at 170.
        [
            EntityRecord::new(RecordKind::Floor, Vec2::ZERO, "ground"),
            EntityRecord::new(RecordKind::Monster, Vec2::new(0.0, 100.0), "slime"),
        ]
    }

    fn monster(engine: &GameEngine) -> Entity {
        engine.entities().snapshot::<Patrol>()[0].0
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut engine = engine(&[], Vec2::new(0.0, 300.0));
        let player = engine.player(0).unwrap();
        Host::default().integrate(&mut engine, 0.1).unwrap();
        assert_eq!(engine.velocity(player), Some(Vec2::new(0.0, -90.0)));
        assert_eq!(engine.position(player), Some(Vec2::new(0.0, 291.0)));
    }

    #[test]
    fn test_floor_blocks_and_reports_landing() {
        // Floor top at 30; player bottom starts at 30.
        let mut engine = engine(
            &[EntityRecord::new(RecordKind::Floor, Vec2::ZERO, "ground")],
            Vec2::new(0.0, 85.0),
        );
        let player = engine.player(0).unwrap();
        let mut host = Host::default();

        host.integrate(&mut engine, 1.0 / 60.0).unwrap();
        assert_eq!(engine.position(player), Some(Vec2::new(0.0, 85.0)));
        assert_eq!(engine.velocity(player), Some(Vec2::ZERO));

        let contacts = host.detect_contacts(&engine);
        assert_eq!(contacts.len(), 1);
        assert_eq!(host.report_contacts(&mut engine, &contacts).unwrap(), 1);
        assert!(engine.player_info(0).unwrap().grounded);
    }

    #[test]
    fn test_fallen_player_respawns() {
        let mut engine = engine(&[], Vec2::new(0.0, 300.0));
        let player = engine.player(0).unwrap();
        engine.sync_positions([(player, Vec2::new(0.0, -490.0))]);
        engine.sync_velocities([(player, Vec2::new(0.0, -500.0))]);

        Host::default().integrate(&mut engine, 0.1).unwrap();
        assert_eq!(engine.position(player), Some(Vec2::new(0.0, 300.0)));
        assert_eq!(engine.velocity(player), Some(Vec2::ZERO));
    }

    #[test]
    fn test_non_reporting_pairs_skipped() {
        let engine = engine(
            &[
                EntityRecord::new(RecordKind::Wall, Vec2::ZERO, "wall"),
                EntityRecord::new(RecordKind::Floor, Vec2::ZERO, "floor"),
            ],
            Vec2::new(0.0, 1000.0),
        );
        assert!(Host::default().detect_contacts(&engine).is_empty());
    }

    #[test]
    fn test_touch_reported_once_until_separated() {
        let mut engine = engine(
            &[EntityRecord::new(RecordKind::Floor, Vec2::ZERO, "ground")],
            Vec2::new(0.0, 85.0),
        );
        let player = engine.player(0).unwrap();
        let mut host = Host::default();

        assert_eq!(host.detect_contacts(&engine).len(), 1);
        assert!(host.detect_contacts(&engine).is_empty());

        engine.sync_positions([(player, Vec2::new(0.0, 300.0))]);
        assert!(host.detect_contacts(&engine).is_empty());

        engine.sync_positions([(player, Vec2::new(0.0, 85.0))]);
        let contacts = host.detect_contacts(&engine);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].point.y, 30.0);
    }

    #[test]
    fn test_monster_touch_hurts_once() {
        let mut engine = engine(&monster_on_floor(), Vec2::new(0.0, 100.0));
        let player = engine.player(0).unwrap();
        let mut host = Host::default();

        for _ in 0..5 {
            step(&mut host, &mut engine);
        }
        let health = engine.entities().get::<Health>(player).unwrap();
        assert_eq!(health.current, health.max - 1.0);
    }

    #[test]
    fn test_monster_pushes_player_out() {
        let mut engine = engine(&monster_on_floor(), Vec2::new(0.0, 100.0));
        let player = engine.player(0).unwrap();
        Host::default().integrate(&mut engine, 1.0 / 60.0).unwrap();

        let monster = monster(&engine);
        let player_x = engine.position(player).unwrap().x;
        let monster_x = engine.position(monster).unwrap().x;
        assert_eq!((player_x - monster_x).abs(), 85.0);
    }

    #[test]
    fn test_player_falls_onto_monster_and_stomps() {
        let mut engine = engine(&monster_on_floor(), Vec2::new(0.0, 300.0));
        let player = engine.player(0).unwrap();
        let monster = monster(&engine);
        let mut host = Host::default();

        for _ in 0..60 {
            step(&mut host, &mut engine);
        }
        assert!(!engine.entities().contains(monster));
        let health = engine.entities().get::<Health>(player).unwrap();
        assert_eq!(health.current, health.max);
    }
}
