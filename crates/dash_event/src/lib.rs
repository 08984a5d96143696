//! # dash_event
//!
//! Events and the event bus of the simulation core.
//!
//! This crate provides:
//!
//! - [`event`] — the closed [`EventPayload`] set, its [`EventKind`] tag, and
//!   the timestamped [`Event`] envelope.
//! - [`dispatcher`] — the synchronous, depth-bounded [`EventDispatcher`] and
//!   the [`Listener`] contract systems implement.
//! - [`time`] — simulation [`Timestamp`]s.
//! - [`error`] — dispatcher error types.

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod time;

pub use dispatcher::{DEFAULT_MAX_DEPTH, Emitter, EventDispatcher, Listener, ListenerId};
pub use error::DispatchError;
pub use event::{Event, EventKind, EventPayload};
pub use time::Timestamp;
