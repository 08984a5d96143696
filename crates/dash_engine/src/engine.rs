//! The game engine: owns the world, the dispatcher, and the tick schedule.

use dash_component::{Entity, EntityManager};
use dash_event::{Event, EventDispatcher, EventKind, EventPayload, Timestamp};
use dash_math::Vec2;
use tracing::{debug, info, trace};

use crate::collision::Collider;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::factory;
use crate::intent::{Intent, IntentAction, IntentQueue, IntentSender};
use crate::level::{EntityRecord, LevelRecord};
use crate::snapshot::{FrameSnapshot, PlayerInfo};
use crate::systems::{
    CollisionSystem, CombatSystem, HookSystem, HostileSystem, PhysicsSystem, PickupSystem,
    PlayerSystem, PositionSystem, TickSystem,
};
use crate::world::World;

/// Tick-driven simulation of one match.
///
/// Per tick the host calls [`update`](Self::update), integrates the forces it
/// reads from [`snapshot`](Self::snapshot) or the physics queries, pushes
/// results back with [`sync_velocities`](Self::sync_velocities) and
/// [`sync_positions`](Self::sync_positions), and reports touches through
/// [`handle_collision`](Self::handle_collision).
pub struct GameEngine {
    world: World,
    dispatcher: EventDispatcher<World>,
    /// Per-tick systems, physics first.
    schedule: Vec<Box<dyn TickSystem>>,
    physics: PhysicsSystem,
    positions: PositionSystem,
    intents: IntentQueue,
    players: Vec<Entity>,
    level: Option<LevelRecord>,
    tick: u64,
}

impl GameEngine {
    /// Build an engine with every system wired.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut dispatcher = EventDispatcher::with_max_depth(config.max_dispatch_depth);
        dispatcher.subscribe(Box::new(CollisionSystem), CollisionSystem::KINDS);
        dispatcher.subscribe(Box::new(PositionSystem), PositionSystem::KINDS);
        dispatcher.subscribe(Box::new(PlayerSystem), PlayerSystem::KINDS);
        dispatcher.subscribe(Box::new(HookSystem), HookSystem::KINDS);
        dispatcher.subscribe(Box::new(CombatSystem), CombatSystem::KINDS);
        dispatcher.subscribe(Box::new(PickupSystem), PickupSystem::KINDS);
        dispatcher.subscribe(Box::new(HostileSystem), HostileSystem::KINDS);

        let schedule: Vec<Box<dyn TickSystem>> = vec![
            Box::new(PhysicsSystem),
            Box::new(PlayerSystem),
            Box::new(HookSystem),
            Box::new(HostileSystem),
        ];

        info!(
            max_depth = config.max_dispatch_depth,
            tick_systems = schedule.len(),
            "game engine ready"
        );

        Ok(Self {
            world: World::new(config),
            dispatcher,
            schedule,
            physics: PhysicsSystem,
            positions: PositionSystem,
            intents: IntentQueue::new(),
            players: Vec::new(),
            level: None,
            tick: 0,
        })
    }

    // -- Setup --

    /// Spawn every entity of a level. Returns the spawned entities in record
    /// order.
    pub fn setup_level(&mut self, level: LevelRecord, records: &[EntityRecord]) -> Vec<Entity> {
        let world = &mut self.world;
        let spawned: Vec<Entity> = records
            .iter()
            .map(|record| factory::spawn_record(&mut world.entities, record, &world.config))
            .collect();
        info!(level = %level.name, entities = spawned.len(), "level loaded");
        self.level = Some(level);
        spawned
    }

    /// Spawn `count` additional players at the level's spawn points.
    pub fn setup_players(&mut self, count: usize) -> &[Entity] {
        for _ in 0..count {
            let index = self.players.len();
            let at = self
                .level
                .as_ref()
                .and_then(|level| level.spawn_point(index))
                .unwrap_or_else(|| {
                    self.world.config.default_spawn + Vec2::new(index as f32 * 100.0, 0.0)
                });
            let entity =
                factory::spawn_player(&mut self.world.entities, index, at, &self.world.config);
            self.players.push(entity);
        }
        info!(players = self.players.len(), "players ready");
        &self.players
    }

    /// The entity of the player in seat `index`.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<Entity> {
        self.players.get(index).copied()
    }

    #[must_use]
    pub fn players(&self) -> &[Entity] {
        &self.players
    }

    #[must_use]
    pub fn level(&self) -> Option<&LevelRecord> {
        self.level.as_ref()
    }

    // -- Intents --

    /// A handle producers on any thread can send intents through.
    #[must_use]
    pub fn intent_sender(&self) -> IntentSender {
        self.intents.sender()
    }

    /// Queue an intent for the next tick.
    pub fn submit(&self, intent: Intent) {
        self.intents.sender().send(intent);
    }

    fn apply_intent(&mut self, intent: Intent) -> Result<(), EngineError> {
        let Some(player) = self.player(intent.player_index) else {
            debug!(index = intent.player_index, "intent for unknown player ignored");
            return Ok(());
        };
        let payload = match intent.action {
            IntentAction::StartMove(direction) => EventPayload::PlayerMove { player, direction },
            IntentAction::StopMove(direction) => EventPayload::PlayerStop { player, direction },
            IntentAction::Jump => EventPayload::PlayerJump { player },
            IntentAction::Hook => EventPayload::PlayerHook { player },
        };
        self.dispatcher
            .dispatch(Event::new(payload, intent.timestamp), &mut self.world)?;
        Ok(())
    }

    // -- Tick --

    /// Advance the simulation by `dt` seconds.
    ///
    /// Queued intents are dispatched in arrival order, then the physics
    /// system clears last tick's forces, then the remaining per-tick systems
    /// apply this tick's forces.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError::Dispatch`] raised by an intent's event
    /// chain. The remaining intents and the tick systems still run.
    pub fn update(&mut self, dt: f64) -> Result<(), EngineError> {
        self.tick += 1;
        self.world.time = self.world.time.advanced(dt);

        let intents = self.intents.drain();
        let intent_count = intents.len();
        let mut failure = None;
        for intent in intents {
            if let Err(err) = self.apply_intent(intent) {
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }

        for system in &mut self.schedule {
            system.update(&mut self.world, dt as f32);
            trace!(system = system.name(), "tick system ran");
        }

        debug!(
            tick = self.tick,
            time = %self.world.time,
            intents = intent_count,
            entities = self.world.entities.entity_count(),
            failed = failure.is_some(),
            "tick complete"
        );
        failure.map_or(Ok(()), Err)
    }

    // -- Events --

    /// Resolve a touch reported by the host's broad phase and dispatch the
    /// resulting event.
    ///
    /// Returns the kind of the dispatched event, or `None` when either entity
    /// has no collider or the pair does not interact.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Dispatch`] if the event chain overruns the
    /// dispatch depth bound.
    pub fn handle_collision(
        &mut self,
        a: Entity,
        b: Entity,
        contact_point: Vec2,
    ) -> Result<Option<EventKind>, EngineError> {
        let store = &self.world.entities;
        let (Some(collider_a), Some(collider_b)) =
            (store.get::<Collider>(a).copied(), store.get::<Collider>(b).copied())
        else {
            trace!(%a, %b, "contact with non-collidable ignored");
            return Ok(None);
        };
        let Some(payload) = collider_a.resolve(a, &collider_b, b, contact_point) else {
            return Ok(None);
        };
        let kind = payload.kind();
        self.dispatch(payload)?;
        Ok(Some(kind))
    }

    /// Dispatch `payload` at the current simulation time. Returns the number
    /// of listener invocations.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Dispatch`] if the event chain overruns the
    /// dispatch depth bound.
    pub fn dispatch(&mut self, payload: EventPayload) -> Result<usize, EngineError> {
        let event = Event::new(payload, self.world.time);
        Ok(self.dispatcher.dispatch(event, &mut self.world)?)
    }

    // -- Frame sync --

    /// Push the integrator's velocities. Returns how many bodies were updated.
    pub fn sync_velocities<I>(&mut self, velocities: I) -> usize
    where
        I: IntoIterator<Item = (Entity, Vec2)>,
    {
        self.physics.sync(&mut self.world.entities, velocities)
    }

    /// Push the integrator's positions. Returns how many were updated.
    pub fn sync_positions<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = (Entity, Vec2)>,
    {
        self.positions.sync(&mut self.world.entities, points)
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.world, self.tick)
    }

    #[must_use]
    pub fn player_info(&self, index: usize) -> Option<PlayerInfo> {
        PlayerInfo::capture(&self.world, self.player(index)?)
    }

    /// Overlay data for every live player, by seat.
    #[must_use]
    pub fn players_info(&self) -> Vec<PlayerInfo> {
        self.players
            .iter()
            .filter_map(|&entity| PlayerInfo::capture(&self.world, entity))
            .collect()
    }

    // -- Physics queries --

    #[must_use]
    pub fn is_moving(&self, entity: Entity) -> bool {
        self.physics.is_moving(&self.world.entities, entity)
    }

    #[must_use]
    pub fn is_jumping(&self, entity: Entity) -> bool {
        self.physics.is_jumping(&self.world.entities, entity)
    }

    /// Add a force to `entity` for the current tick.
    pub fn apply_force(&mut self, entity: Entity, force: Vec2) -> bool {
        self.physics.apply_force(&mut self.world.entities, entity, force)
    }

    #[must_use]
    pub fn velocity(&self, entity: Entity) -> Option<Vec2> {
        self.physics.velocity(&self.world.entities, entity)
    }

    #[must_use]
    pub fn force(&self, entity: Entity) -> Option<Vec2> {
        self.physics.force(&self.world.entities, entity)
    }

    #[must_use]
    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.positions.position(&self.world.entities, entity)
    }

    // -- Accessors --

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn entities(&self) -> &EntityManager {
        &self.world.entities
    }

    #[must_use]
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.world.entities
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.world.config
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn time(&self) -> Timestamp {
        self.world.time
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schedule: Vec<&str> = self.schedule.iter().map(|s| s.name()).collect();
        f.debug_struct("GameEngine")
            .field("tick", &self.tick)
            .field("time", &self.world.time)
            .field("players", &self.players)
            .field("entities", &self.world.entities.entity_count())
            .field("schedule", &schedule)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
