//! Strictly 2048 server library - game sessions over HTTP
//!
//! Wraps the pure [`strictly_2048`] engine with everything needed to play it
//! remotely: session storage, a service layer and a REST API.
//!
//! # Architecture
//!
//! - **Store**: [`GameStore`] implemented in memory ([`SessionManager`]) and on SQLite ([`GameRepository`])
//! - **Service**: [`GameService`] loads a game, applies a move and saves it back
//! - **Server**: axum [`router`] exposing start, fetch, move and board endpoints
//! - **Config**: [`ServerConfig`] from TOML with command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_2048_server::{GameService, SessionManager, ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = GameService::new(Arc::new(SessionManager::new()));
//! serve(&ServerConfig::default(), service).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod server;
mod service;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig, StorageBackend, default_db_path};

// Crate-level exports - Database
pub use db::{DbError, DbErrorKind, GameChanges, GameRecord, GameRepository, NewGameRecord};

// Crate-level exports - Server types
pub use server::{ApiError, GameView, MoveRequest, MoveResponse, router, serve};

// Crate-level exports - Service
pub use service::{GameService, GameServiceError};

// Crate-level exports - Session management
pub use session::{GameId, GameSession, SessionManager};

// Crate-level exports - Storage
pub use store::{GameStore, StoreError, open_store};
