//! Position bookkeeping and `Move` handling.

use dash_component::{Entity, EntityManager};
use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use dash_math::{Position, Vec2};
use tracing::trace;

use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct PositionSystem;

impl PositionSystem {
    pub const KINDS: &'static [EventKind] = &[EventKind::Move];

    #[must_use]
    pub fn position(&self, entities: &EntityManager, entity: Entity) -> Option<Vec2> {
        entities.get::<Position>(entity).map(|p| p.point)
    }

    /// Place `entity` at `point`. Returns `false` when it has no position.
    pub fn move_to(&self, entities: &mut EntityManager, entity: Entity, point: Vec2) -> bool {
        match entities.get_mut::<Position>(entity) {
            Some(position) => {
                position.point = point;
                true
            }
            None => false,
        }
    }

    /// Overwrite positions with the host's results. Returns how many were
    /// updated.
    pub fn sync<I>(&self, entities: &mut EntityManager, points: I) -> usize
    where
        I: IntoIterator<Item = (Entity, Vec2)>,
    {
        points
            .into_iter()
            .filter(|(entity, point)| self.move_to(entities, *entity, *point))
            .count()
    }
}

impl Listener<World> for PositionSystem {
    fn name(&self) -> &'static str {
        "position"
    }

    fn handle(&mut self, event: &Event, world: &mut World, _emitter: &mut Emitter) {
        if let EventPayload::Move {
            entity,
            destination,
        } = event.payload
        {
            if !self.move_to(&mut world.entities, entity, destination) {
                trace!(%entity, "move target has no position");
            }
        }
    }
}
