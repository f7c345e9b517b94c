//! Command-line interface for dooz.

use clap::{Parser, Subcommand};

/// Dooz - N×N tic-tac-toe rules engine
#[derive(Parser, Debug)]
#[command(name = "dooz")]
#[command(about = "Drive the Dooz rules engine from a terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play computer-vs-computer games and report the results
    Simulate {
        /// Path to a TOML game config (defaults are used if omitted)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Override the board size from the config
        #[arg(short, long)]
        size: Option<usize>,

        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,

        /// Print each final snapshot as JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Print the default game config as TOML
    Config,

    /// Print the JSON schema of the game config
    Schema,
}
