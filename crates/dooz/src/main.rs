//! Dooz - terminal driver
//!
//! Runs the rules engine without a UI: simulated games, config dumps.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use dooz::{GameConfig, Lifecycle, Outcome, Player, RandomStrategy, TurnEngine};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            config,
            size,
            games,
            seed,
            json,
        } => simulate(config, size, games, seed, json),
        Command::Config => print_default_config(),
        Command::Schema => print_schema(),
    }
}

/// Plays `games` computer-vs-computer games and prints a tally.
#[instrument]
fn simulate(
    config_path: Option<PathBuf>,
    size: Option<usize>,
    games: u32,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(size) = size {
        config = config.with_size(size);
        config.validate()?;
    }

    // Every seat is driven by the strategy.
    let players = config
        .players()
        .clone()
        .map(|p| Player::computer(p.name().as_str(), p.shape().as_str()));
    let config = config.with_players(players);

    let mut engine = match seed {
        Some(seed) => TurnEngine::new(RandomStrategy::seeded(seed)).with_rng_seed(seed),
        None => TurnEngine::new(RandomStrategy::new()),
    };

    let mut tally: BTreeMap<String, u32> = BTreeMap::new();
    for game in 1..=games {
        let snapshot = engine.new_game(&config)?;
        let label = match snapshot.lifecycle {
            Lifecycle::Finished(Outcome::Won(seat)) => {
                format!("{} wins", snapshot.players[seat.index()].name())
            }
            Lifecycle::Finished(Outcome::Drawn) => "draw".to_string(),
            other => anyhow::bail!("game {} stopped in state {:?}", game, other),
        };
        *tally.entry(label.clone()).or_default() += 1;

        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            println!(
                "Game {}: {} after {} moves",
                game, label, snapshot.move_history_len
            );
            println!("{}\n", snapshot.board.render(&snapshot.players));
        }
    }

    info!(games, "Simulation finished");
    for (label, count) in &tally {
        println!("{label}: {count}");
    }
    Ok(())
}

fn print_default_config() -> Result<()> {
    print!("{}", GameConfig::default().to_toml()?);
    Ok(())
}

fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(GameConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
