//! Command-line interface for strictly_minimax.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Minimax - tic-tac-toe against an opponent that cannot lose
#[derive(Parser, Debug)]
#[command(name = "strictly_minimax")]
#[command(about = "Play tic-tac-toe against exhaustive minimax", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal (you are X and move first)
    Play {
        /// Print the session snapshot as JSON after every move
        #[arg(long)]
        json: bool,
    },

    /// Print the engine's move for a position
    BestMove {
        /// Nine cells in row-major order: X human, O AI, '.' empty; '/' and spaces separate rows (e.g. "X.. .O. ...")
        #[arg(short, long)]
        board: String,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
