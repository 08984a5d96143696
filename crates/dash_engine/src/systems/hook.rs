//! Grapple hooks: firing, attaching, retracting, and pulling the owner.

use dash_component::Entity;
use dash_event::{Emitter, Event, EventKind, EventPayload, Listener};
use dash_math::Vec2;
use tracing::debug;

use super::{PhysicsSystem, TickSystem};
use crate::components::{GrappleHook, HookState, Physics, PlayerState};
use crate::factory;
use crate::world::World;

#[derive(Debug, Default, Clone, Copy)]
pub struct HookSystem;

impl HookSystem {
    pub const KINDS: &'static [EventKind] = &[
        EventKind::PlayerHook,
        EventKind::GrappleHookObstacleContact,
        EventKind::GrappleHookWallContact,
        EventKind::GrappleHookFloorContact,
    ];

    /// Fire a hook, or release the one already out.
    fn toggle(world: &mut World, player: Entity, emitter: &mut Emitter) {
        let Some(state) = world.entities.get::<PlayerState>(player).copied() else {
            return;
        };
        if let Some(hook) = state.hook.filter(|h| world.entities.contains(*h)) {
            emitter.emit(EventPayload::EntityRemoval { entity: hook });
            if let Some(live) = world.entities.get_mut::<PlayerState>(player) {
                live.hook = None;
            }
            debug!(%player, %hook, "hook released");
            return;
        }
        let Some(at) = world.position(player) else {
            return;
        };
        let config = &world.config;
        let hook =
            factory::spawn_grapple_hook(&mut world.entities, player, at, state.facing, config);
        if let Some(live) = world.entities.get_mut::<PlayerState>(player) {
            live.hook = Some(hook);
        }
        debug!(%player, %hook, facing = ?state.facing, "hook fired");
    }

    fn attach(world: &mut World, hook: Entity, anchor: Vec2) {
        let Some(grapple) = world.entities.get_mut::<GrappleHook>(hook) else {
            return;
        };
        if grapple.anchor().is_some() {
            return;
        }
        grapple.state = HookState::Attached { anchor };
        if let Some(body) = world.entities.get_mut::<Physics>(hook) {
            body.velocity = Vec2::ZERO;
            body.is_dynamic = false;
        }
        debug!(%hook, x = anchor.x, y = anchor.y, "hook attached");
    }
}

impl Listener<World> for HookSystem {
    fn name(&self) -> &'static str {
        "hook"
    }

    fn handle(&mut self, event: &Event, world: &mut World, emitter: &mut Emitter) {
        match event.payload {
            EventPayload::PlayerHook { player } => Self::toggle(world, player, emitter),
            EventPayload::GrappleHookObstacleContact {
                hook,
                contact_point,
                ..
            } => Self::attach(world, hook, contact_point),
            EventPayload::GrappleHookWallContact { hook, .. }
            | EventPayload::GrappleHookFloorContact { hook, .. } => {
                // Attached hooks stay put even if a swing drags them along scenery.
                let flying = world
                    .entities
                    .get::<GrappleHook>(hook)
                    .is_some_and(|h| h.anchor().is_none());
                if flying {
                    emitter.emit(EventPayload::EntityRemoval { entity: hook });
                }
            }
            _ => {}
        }
    }
}

impl TickSystem for HookSystem {
    fn name(&self) -> &'static str {
        "hook"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let pull = world.config.hook_pull_force;
        for (_, hook) in world.entities.snapshot::<GrappleHook>() {
            let Some(anchor) = hook.anchor() else {
                continue;
            };
            let Some((position, body)) = world.body(hook.owner) else {
                continue;
            };
            let toward = (anchor - position.point).normalize_or_zero();
            PhysicsSystem.apply_force(&mut world.entities, hook.owner, toward * pull * body.mass);
        }
    }
}
