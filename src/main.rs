//! Strictly Minimax - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io;
use strictly_minimax::{Board, EngineConfig, analyze, run_frontend};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play { json } => run_play(&config, json),
        Command::BestMove { board, json } => run_best_move(&board, json),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: &EngineConfig, json: bool) -> Result<()> {
    info!("Starting interactive game");
    let stdin = io::stdin();
    let outcomes = run_frontend(config, stdin.lock(), io::stdout(), json)?;
    info!(games = outcomes.len(), "Leaving");
    Ok(())
}

/// Print the engine's choice for a single position
#[instrument]
fn run_best_move(board: &str, json: bool) -> Result<()> {
    let mut board: Board = board
        .parse()
        .with_context(|| format!("Invalid board {board:?}"))?;

    println!("{}\n", board.display());
    let outcome = board.evaluate();
    println!("Evaluation: {outcome}");
    if outcome.is_terminal() {
        return Ok(());
    }

    let analysis = analyze(&mut board)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        for scored in analysis.scored() {
            println!("  {} -> {:+}", scored.mv(), scored.score());
        }
        println!(
            "Best move: {} (score {:+}, {} positions searched)",
            analysis.best(),
            analysis.score(),
            analysis.nodes()
        );
    }
    Ok(())
}
