//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand};

/// Strictly Games - dots and boxes with a greedy heuristic opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Dots-and-boxes rules engine host", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to game config (TOML). Defaults apply when the file is absent.
    #[arg(short, long, default_value = "dots.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one headless game with the heuristic in every seat
    Selfplay {
        /// Override dots per side
        #[arg(long)]
        grid_size: Option<usize>,

        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the opponent delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}
