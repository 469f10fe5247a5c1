//! Command-line interface for the tic-tac-toe server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against an exhaustive minimax engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe game server with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play a game against the engine in the terminal
    Play,
}
