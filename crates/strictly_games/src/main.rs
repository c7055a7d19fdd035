//! Strictly Games - headless runner
//!
//! Plays dots and boxes end to end with structured logging.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_games::{DotsConfig, GameEvent, GameSession, Orchestrator};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Selfplay {
            grid_size,
            seed,
            delay_ms,
        } => run_selfplay(&cli.config, grid_size, seed, delay_ms).await,
    }
}

/// Loads the config file if present, else defaults.
fn load_config(path: &Path) -> Result<DotsConfig> {
    if path.exists() {
        Ok(DotsConfig::from_file(path)?)
    } else {
        debug!(path = %path.display(), "No config file, using defaults");
        Ok(DotsConfig::default())
    }
}

/// Run one self-play game and print the final board.
#[instrument(skip(config_path))]
async fn run_selfplay(
    config_path: &Path,
    grid_size: Option<usize>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(grid_size) = grid_size {
        config = config.with_grid_size(grid_size);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_opponent_delay_ms(delay_ms);
    }

    let session = GameSession::new(&config)?.into_shared();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let logger = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::Started { board } => info!("Game started\n{}", board),
                GameEvent::OpponentThinking => debug!("Computer is thinking"),
                GameEvent::LineDrawn {
                    line,
                    completed,
                    scores,
                } => info!(
                    line = %line.id,
                    player = line.drawn_by.number(),
                    boxes = completed.len(),
                    score = %format!("{}-{}", scores.player1, scores.player2),
                    "Line drawn"
                ),
                GameEvent::TurnChanged { player, .. } => debug!(player = player.number(), "Turn"),
                GameEvent::GameOver { announcement, .. } => info!("{}", announcement),
            }
        }
    });

    let mut orchestrator = Orchestrator::new(session.clone(), event_tx).await;
    let outcome = orchestrator.run_self_play().await?;
    drop(orchestrator);
    logger.await?;

    let session = session.lock().await;
    println!("{}", session.state().display());
    println!("{}", session.state().status_line());
    debug!(?outcome, "Self-play complete");
    Ok(())
}
