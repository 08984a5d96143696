//! # dash_app — headless host
//!
//! Drives the Star Dash simulation core without a renderer. It loads a level,
//! spawns players, runs a scripted intent producer on a background thread,
//! and steps the engine at a fixed tick rate, standing in for the scene
//! bridge with a naive integrator and broad phase.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line and install the tracing subscriber.
//! 2. Load the engine configuration (JSON) and the level (JSON or built-in).
//! 3. Spawn players and the intent bot.
//! 4. Enter the fixed-timestep tick loop.
//! 5. Optionally dump the final frame as MessagePack.

mod bot;
mod host;
mod level;
mod tick;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dash_engine::{EngineConfig, GameEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::Bot;
use host::Host;
use level::LevelFile;
use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "dash_app", about = "Headless Star Dash simulation host")]
struct Args {
    /// Level JSON file (built-in demo level when omitted)
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Engine configuration JSON file (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run (0 = run until interrupted)
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Target ticks per second
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f64,

    /// Number of players
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Milliseconds between scripted intents (0 disables the bot)
    #[arg(long, default_value_t = 500)]
    bot_beat_ms: u64,

    /// Write the final frame snapshot to this file as MessagePack
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dash_app=info".parse()?))
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.tick_rate.is_finite() && args.tick_rate > 0.0,
        "tick rate must be positive, got {}",
        args.tick_rate
    );
    info!("dash host starting");

    let config = load_config(args.config.as_deref())?;
    let level = match &args.level {
        Some(path) => LevelFile::load(path)?,
        None => LevelFile::demo(),
    };

    let mut engine = GameEngine::new(config)?;
    engine.setup_level(level.level, &level.entities);
    engine.setup_players(args.players);

    let bot = (args.bot_beat_ms > 0).then(|| {
        Bot::spawn(
            engine.intent_sender(),
            args.players,
            Duration::from_millis(args.bot_beat_ms),
        )
    });

    let tick_config = TickConfig {
        tick_rate: args.tick_rate,
        max_ticks: args.ticks,
        ..TickConfig::default()
    };
    let mut tick_loop = TickLoop::new(tick_config, engine, Host::default());
    let outcome = tick_loop.run();

    if let Some(bot) = bot {
        let sent = bot.shutdown();
        info!(intents = sent, "bot stopped");
    }
    outcome?;

    let engine = tick_loop.into_engine();
    if let Some(path) = &args.dump {
        let bytes = rmp_serde::to_vec_named(&engine.snapshot())?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "final frame written");
    }

    for player in engine.players_info() {
        info!(seat = player.index, score = player.score, hp = player.health, "final standing");
    }
    info!(ticks = engine.tick(), "dash host shut down");
    Ok(())
}
