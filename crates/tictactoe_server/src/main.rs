//! Tic-tac-toe server binary.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_server::{ServerConfig, SessionManager};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config).await,
        Command::Play => run_play(),
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the HTTP game server
async fn run_server(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ServerConfig::default(),
    }
    .with_overrides(host, port);

    init_tracing(config.log_filter());
    info!(?config, "Starting tic-tac-toe server");

    tictactoe_server::serve(&config, SessionManager::new()).await
}

/// Play in the terminal
fn run_play() -> Result<()> {
    init_tracing("warn");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let outcome = tictactoe_server::play::run(stdin.lock(), &mut stdout)?;
    info!(?outcome, "Terminal game finished");
    Ok(())
}
