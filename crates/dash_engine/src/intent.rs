//! Player intents and the queue that carries them into the tick.
//!
//! Producers on any thread send through a cloneable [`IntentSender`]. The
//! engine drains the [`IntentQueue`] at the start of every tick, in arrival
//! order.

use crossbeam_channel::{Receiver, Sender, unbounded};
use dash_event::Timestamp;
use dash_math::Direction;
use serde::{Deserialize, Serialize};

/// What a player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentAction {
    StartMove(Direction),
    StopMove(Direction),
    Jump,
    Hook,
}

/// A timestamped request from the player in seat `player_index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub player_index: usize,
    pub action: IntentAction,
    pub timestamp: Timestamp,
}

impl Intent {
    #[must_use]
    pub fn new(player_index: usize, action: IntentAction, timestamp: Timestamp) -> Self {
        Self {
            player_index,
            action,
            timestamp,
        }
    }
}

/// Producer handle of the intent queue.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: Sender<Intent>,
}

impl IntentSender {
    /// Enqueue an intent. Returns `false` once the engine is gone.
    pub fn send(&self, intent: Intent) -> bool {
        self.tx.send(intent).is_ok()
    }
}

/// Unbounded multi-producer, single-consumer intent queue.
#[derive(Debug)]
pub struct IntentQueue {
    tx: Sender<Intent>,
    rx: Receiver<Intent>,
}

impl IntentQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    #[must_use]
    pub fn sender(&self) -> IntentSender {
        IntentSender {
            tx: self.tx.clone(),
        }
    }

    /// Number of intents waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Take every queued intent, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Intent> {
        self.rx.try_iter().collect()
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}
