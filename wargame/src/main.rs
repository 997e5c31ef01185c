//! Wargame - two-player tactics on a small grid
//!
//! Runs one game to completion:
//! 1. Humans type moves on stdin (or receive them from a move broker)
//! 2. Computer players pick moves with a time-boxed minimax search
//! 3. Every move is written to a `gameTrace-*.txt` file
//! 4. Search statistics are saved to `game_stats.json` when the game ends

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::{info, warn};

mod broker;
mod config;
mod game;
mod human;
mod options;
mod stats;
mod trace;

use crate::broker::{BrokerClient, MoveRelay};
use crate::config::Config;
use crate::game::Game;
use crate::stats::{write_stats, GameStatsSnapshot};
use crate::trace::TraceLog;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Board output goes to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let options = config.to_options()?;
    info!(
        game_type = %options.game_type,
        max_depth = options.max_depth,
        max_time = options.max_time,
        max_turns = options.max_turns,
        alpha_beta = options.alpha_beta,
        "Starting game"
    );

    let mut game = Game::new(options.clone());

    let mut trace = match TraceLog::create(&options, game.board()) {
        Ok(trace) => trace,
        Err(e) => {
            warn!(
                "Failed to create game trace in {}: {}",
                options.trace_dir.display(),
                e
            );
            TraceLog::disabled()
        }
    };

    let broker = options
        .broker
        .as_deref()
        .map(|url| BrokerClient::new(url, options.broker_retry, options.broker_timeout))
        .transpose()?;
    if let Some(client) = &broker {
        info!(url = client.url(), "Using move broker");
    }
    let relay = broker.as_ref().map(|client| client as &dyn MoveRelay);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let winner = game.run(&mut stdin.lock(), &mut stdout.lock(), &mut trace, relay)?;

    let snapshot =
        GameStatsSnapshot::new(winner, game.turns_played(), game.stats(), game.last_depth());
    if let Some(path) = write_stats(&options.stats_dir, &snapshot) {
        info!("Saved game stats to {}", path.display());
    }
    if let Some(path) = trace.path() {
        info!("Game trace written to {}", path.display());
    }

    Ok(())
}
