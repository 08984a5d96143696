//! Scripted intent producer running on its own thread.
//!
//! Stands in for the input layer: every beat each player takes the next step
//! of a fixed routine.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, bounded, select, tick};
use dash_engine::{Intent, IntentAction, IntentSender};
use dash_event::Timestamp;
use dash_math::Direction;
use tracing::{debug, trace};

const ROUTINE: [IntentAction; 6] = [
    IntentAction::StartMove(Direction::Right),
    IntentAction::Jump,
    IntentAction::Hook,
    IntentAction::Hook,
    IntentAction::StopMove(Direction::Right),
    IntentAction::StartMove(Direction::Left),
];

/// Handle to a running bot thread.
#[derive(Debug)]
pub struct Bot {
    stop: Sender<()>,
    handle: JoinHandle<usize>,
}

impl Bot {
    /// Start sending intents for `players` seats every `beat`.
    #[must_use]
    pub fn spawn(intents: IntentSender, players: usize, beat: Duration) -> Self {
        let (stop, stopped) = bounded::<()>(1);
        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            let beats = tick(beat);
            let mut step = 0usize;
            let mut sent = 0usize;
            loop {
                select! {
                    recv(stopped) -> _ => break,
                    recv(beats) -> _ => {
                        let timestamp = Timestamp::from_secs(started.elapsed().as_secs_f64());
                        for seat in 0..players {
                            let action = ROUTINE[(step + seat) % ROUTINE.len()];
                            if !intents.send(Intent::new(seat, action, timestamp)) {
                                debug!("engine gone, bot exiting");
                                return sent;
                            }
                            trace!(seat, ?action, "intent sent");
                            sent += 1;
                        }
                        step += 1;
                    }
                }
            }
            sent
        });
        Self { stop, handle }
    }

    /// Stop the thread and return how many intents it sent.
    pub fn shutdown(self) -> usize {
        let _ = self.stop.send(());
        self.handle.join().unwrap_or(0)
    }
}
