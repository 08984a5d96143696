//! Engine error types.

use dash_event::DispatchError;

/// Errors surfaced by the [`GameEngine`](crate::GameEngine).
///
/// Expected misses (unknown entities, unmapped collision pairs, unknown
/// power-ups) are never errors; they are skipped.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An event chain overran the dispatcher's depth bound.
    #[error("event dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The configuration cannot drive a simulation.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
