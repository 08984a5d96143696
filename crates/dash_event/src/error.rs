//! Dispatcher error types.

use crate::dispatcher::ListenerId;
use crate::event::EventKind;

/// Errors raised by the [`EventDispatcher`](crate::EventDispatcher).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A chain of follow-up events nested deeper than the dispatcher allows.
    #[error("event chain exceeded depth limit {limit} at {kind} (depth {depth})")]
    DepthExceeded {
        /// Kind of the event that would have crossed the limit.
        kind: EventKind,
        /// Nesting depth of that event; the root event is depth 0.
        depth: usize,
        /// The configured limit.
        limit: usize,
    },

    /// A route referenced a listener that was never added.
    #[error("unknown listener {0:?}")]
    UnknownListener(ListenerId),
}
