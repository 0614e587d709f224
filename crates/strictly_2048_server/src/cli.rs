//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_2048_server::StorageBackend;

/// Strictly 2048 - sliding-tile puzzle server
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "2048 game server with REST API", long_about = None)]
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
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (falls back to the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,

        /// Where to keep game sessions
        #[arg(long, value_enum)]
        storage: Option<StorageBackend>,

        /// Path to the SQLite database file
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Create or upgrade the SQLite schema and exit
    Migrate {
        /// Path to the SQLite database file
        #[arg(long, default_value = "strictly_2048.db")]
        db_path: String,
    },
}
