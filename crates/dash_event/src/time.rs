//! Simulation timestamps.

use serde::{Deserialize, Serialize};

/// Seconds since the simulation started.
///
/// Intents carry the host's timestamp; events raised inside the core carry
/// the timestamp of the event or tick that caused them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// The start of the simulation.
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn secs(self) -> f64 {
        self.0
    }

    /// This timestamp moved forward by `dt` seconds.
    #[must_use]
    pub fn advanced(self, dt: f64) -> Self {
        Self(self.0 + dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
