//! Synchronous publish/subscribe event bus.
//!
//! The [`EventDispatcher`] owns a set of [`Listener`]s and routes each event
//! to the listeners registered for its exact [`EventKind`], in registration
//! order, on the caller's stack. A listener may raise follow-up events through
//! its [`Emitter`]; those are dispatched as soon as the listener returns,
//! before the next listener for the original event runs.
//!
//! Follow-up chains are bounded: an event nested deeper than
//! [`EventDispatcher::max_depth`] aborts the dispatch with
//! [`DispatchError::DepthExceeded`].

use std::collections::HashMap;

use tracing::{error, trace};

use crate::error::DispatchError;
use crate::event::{Event, EventKind, EventPayload};
use crate::time::Timestamp;

/// Default bound on follow-up nesting.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Handle to a listener owned by a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub usize);

/// A system that reacts to dispatched events.
///
/// `C` is the shared simulation state the dispatcher's owner passes in on
/// every dispatch.
pub trait Listener<C> {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// React to one event. Follow-up events go through `emitter`.
    fn handle(&mut self, event: &Event, ctx: &mut C, emitter: &mut Emitter);
}

/// Collects the follow-up events a listener raises while handling an event.
#[derive(Debug)]
pub struct Emitter {
    timestamp: Timestamp,
    pending: Vec<Event>,
}

impl Emitter {
    /// Create an emitter that stamps events with `timestamp`.
    #[must_use]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            pending: Vec::new(),
        }
    }

    /// Raise a follow-up event, stamped with the triggering event's time.
    pub fn emit(&mut self, payload: EventPayload) {
        self.pending.push(Event::new(payload, self.timestamp));
    }

    /// The timestamp follow-ups are stamped with.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the raised events in the order they were emitted.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.pending
    }
}

/// Routes events to listeners by exact kind.
pub struct EventDispatcher<C> {
    listeners: Vec<Box<dyn Listener<C>>>,
    routes: HashMap<EventKind, Vec<ListenerId>>,
    max_depth: usize,
}

impl<C> EventDispatcher<C> {
    /// Create an empty dispatcher with the [`DEFAULT_MAX_DEPTH`] bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create an empty dispatcher with a custom nesting bound.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            listeners: Vec::new(),
            routes: HashMap::new(),
            max_depth,
        }
    }

    /// The deepest follow-up nesting allowed. The root event is depth 0.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Take ownership of a listener. It receives nothing until registered
    /// for at least one kind.
    pub fn add_listener(&mut self, listener: Box<dyn Listener<C>>) -> ListenerId {
        let id = ListenerId(self.listeners.len());
        self.listeners.push(listener);
        id
    }

    /// Route events of `kind` to `listener`.
    ///
    /// Registering the same pair twice is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownListener`] if `listener` was not
    /// returned by [`add_listener`](Self::add_listener) on this dispatcher.
    pub fn register_listener(
        &mut self,
        kind: EventKind,
        listener: ListenerId,
    ) -> Result<(), DispatchError> {
        if listener.0 >= self.listeners.len() {
            return Err(DispatchError::UnknownListener(listener));
        }
        let route = self.routes.entry(kind).or_default();
        if !route.contains(&listener) {
            route.push(listener);
        }
        Ok(())
    }

    /// Add a listener and register it for every kind in `kinds`.
    pub fn subscribe(&mut self, listener: Box<dyn Listener<C>>, kinds: &[EventKind]) -> ListenerId {
        let id = self.add_listener(listener);
        let route_count = kinds.len();
        for &kind in kinds {
            let route = self.routes.entry(kind).or_default();
            if !route.contains(&id) {
                route.push(id);
            }
        }
        trace!(listener = id.0, kinds = route_count, "listener subscribed");
        id
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to every listener registered for its kind, then
    /// deliver any follow-ups they raise, depth first.
    ///
    /// Returns the number of listener invocations, follow-ups included.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DepthExceeded`] if a follow-up chain nests
    /// deeper than [`max_depth`](Self::max_depth). Handlers that already ran
    /// keep their effects.
    pub fn dispatch(&mut self, event: Event, ctx: &mut C) -> Result<usize, DispatchError> {
        self.dispatch_at(&event, ctx, 0)
    }

    fn dispatch_at(
        &mut self,
        event: &Event,
        ctx: &mut C,
        depth: usize,
    ) -> Result<usize, DispatchError> {
        let kind = event.kind();
        if depth > self.max_depth {
            error!(%kind, depth, limit = self.max_depth, "event chain too deep, aborting dispatch");
            return Err(DispatchError::DepthExceeded {
                kind,
                depth,
                limit: self.max_depth,
            });
        }

        let Some(route) = self.routes.get(&kind) else {
            trace!(%kind, "no listeners");
            return Ok(0);
        };
        let route = route.clone();

        let mut handled = 0;
        for id in route {
            let listener = self
                .listeners
                .get_mut(id.0)
                .ok_or(DispatchError::UnknownListener(id))?;
            trace!(%kind, listener = listener.name(), depth, "delivering event");

            let mut emitter = Emitter::new(event.timestamp);
            listener.handle(event, ctx, &mut emitter);
            handled += 1;

            for follow_up in emitter.into_events() {
                handled += self.dispatch_at(&follow_up, ctx, depth + 1)?;
            }
        }
        Ok(handled)
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventDispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("EventDispatcher")
            .field("listeners", &names)
            .field("routes", &self.routes.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
