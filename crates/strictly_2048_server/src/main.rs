//! Strictly 2048 - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_2048_server::{
    GameRepository, GameService, ServerConfig, StorageBackend, open_store, serve,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            storage,
            db_path,
        } => run_http_server(config, host, port, storage, db_path).await,
        Command::Migrate { db_path } => run_migrations(db_path),
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_http_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    storage: Option<StorageBackend>,
    db_path: Option<String>,
) -> Result<()> {
    let port = port.or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()));

    let config = ServerConfig::load(config_path.as_deref())?
        .with_overrides(host, port, storage, db_path);

    info!(
        address = %config.bind_address(),
        storage = ?config.storage(),
        "Starting Strictly 2048 HTTP server"
    );

    let store = open_store(&config)?;
    let service = GameService::new(store);

    serve(&config, service).await?;
    Ok(())
}

/// Apply pending migrations to the SQLite database
#[instrument]
fn run_migrations(db_path: String) -> Result<()> {
    let repository = GameRepository::new(db_path)?;
    let applied = repository.run_migrations()?;
    info!(applied, db_path = %repository.db_path(), "Database is up to date");
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_2048=debug,strictly_2048_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
