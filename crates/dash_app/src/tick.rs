//! Host tick loop.
//!
//! Each tick runs the frame lifecycle in order:
//!
//! 1. The engine drains intents, clears forces, and applies this tick's forces.
//! 2. The host integrates and syncs velocities and positions back.
//! 3. The host's broad phase reports contacts, which the engine resolves.

use std::time::{Duration, Instant};

use anyhow::Result;
use dash_engine::GameEngine;
use tracing::{debug, info, warn};

use crate::host::Host;

/// Configuration for the host tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Log player overlays every this many ticks (0 = never).
    pub report_every: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            report_every: 60,
        }
    }
}

/// The host's tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    config: TickConfig,
    engine: GameEngine,
    host: Host,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, engine: GameEngine, host: Host) -> Self {
        Self {
            config,
            engine,
            host,
        }
    }

    /// Returns the engine's tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.engine.tick()
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Run one frame.
    pub fn tick(&mut self, dt: f64) -> Result<()> {
        self.engine.update(dt)?;
        self.host.integrate(&mut self.engine, dt as f32)?;
        let contacts = self.host.detect_contacts(&self.engine);
        let resolved = self.host.report_contacts(&mut self.engine, &contacts)?;

        debug!(
            tick_id = self.engine.tick(),
            contacts = contacts.len(),
            resolved,
            "frame done"
        );

        let every = self.config.report_every;
        if every > 0 && self.engine.tick() % every == 0 {
            for player in self.engine.players_info() {
                info!(
                    tick_id = self.engine.tick(),
                    seat = player.index,
                    score = player.score,
                    hp = player.health,
                    x = player.position.x,
                    y = player.position.y,
                    grounded = player.grounded,
                    "player"
                );
            }
        }
        Ok(())
    }

    /// Run the tick loop for the configured number of ticks, or indefinitely.
    pub fn run(&mut self) -> Result<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();
            self.tick(tick_duration.as_secs_f64())?;
            tick_count += 1;

            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.engine.tick(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
        Ok(())
    }

    /// Hand the engine back once the loop is done.
    #[must_use]
    pub fn into_engine(self) -> GameEngine {
        self.engine
    }
}
