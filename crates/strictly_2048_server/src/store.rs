//! Storage seam between the game service and its backends.

use crate::config::{ServerConfig, StorageBackend};
use crate::db::{DbError, GameChanges, GameRecord, GameRepository, NewGameRecord};
use crate::session::{GameId, GameSession, SessionManager};
use derive_more::{Display, Error};
use std::fmt;
use std::sync::Arc;
use strictly_2048::{Game, Grid};
use tracing::{info, instrument, warn};

/// Persists game sessions by id.
pub trait GameStore: Send + Sync + fmt::Debug {
    /// Stores a new game and assigns it an id.
    fn create_game(&self, game: &Game) -> Result<GameSession, StoreError>;

    /// Loads a game. Returns `None` if no game has this id.
    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError>;

    /// Overwrites a stored game.
    fn save_game(&self, session: &GameSession) -> Result<(), StoreError>;
}

/// Failure reading or writing stored games.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// The database rejected the operation.
    #[display("{_0}")]
    Database(DbError),
    /// A stored game could not be turned back into a valid game.
    #[display("Stored game {id} is malformed: {reason}")]
    MalformedRecord {
        /// Game id.
        id: GameId,
        /// What was wrong with it.
        reason: String,
    },
    /// A game could not be encoded for storage.
    #[display("Failed to encode game: {reason}")]
    Encoding {
        /// What went wrong.
        reason: String,
    },
    /// Tried to save a game that was never created.
    #[display("Game {id} does not exist")]
    UnknownGame {
        /// Game id.
        id: GameId,
    },
    /// The store cannot be used anymore.
    #[display("Store unavailable: {reason}")]
    Unavailable {
        /// What went wrong.
        reason: String,
    },
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Database(err)
    }
}

/// Opens the store selected by the configuration, migrating SQLite databases.
///
/// # Errors
///
/// Returns [`StoreError`] if the database cannot be opened or migrated.
#[instrument(skip(config), fields(storage = ?config.storage()))]
pub fn open_store(config: &ServerConfig) -> Result<Arc<dyn GameStore>, StoreError> {
    match config.storage() {
        StorageBackend::Memory => {
            info!("Using in-memory game store");
            Ok(Arc::new(SessionManager::new()))
        }
        StorageBackend::Sqlite => {
            info!(db_path = %config.db_path(), "Using SQLite game store");
            let repository = GameRepository::new(config.db_path().clone())?;
            repository.run_migrations()?;
            Ok(Arc::new(repository))
        }
    }
}

fn encode_board(grid: &Grid) -> Result<String, StoreError> {
    serde_json::to_string(grid).map_err(|e| StoreError::Encoding {
        reason: format!("board: {}", e),
    })
}

fn encode_score(score: u32) -> Result<i32, StoreError> {
    i32::try_from(score).map_err(|_| StoreError::Encoding {
        reason: format!("score {} exceeds storage range", score),
    })
}

fn decode_record(record: &GameRecord) -> Result<GameSession, StoreError> {
    let id = *record.id();
    let grid: Grid = serde_json::from_str(record.board()).map_err(|e| {
        warn!(game_id = id, error = %e, "Stored board is malformed");
        StoreError::MalformedRecord {
            id,
            reason: format!("board: {}", e),
        }
    })?;
    let score = u32::try_from(*record.score()).map_err(|_| StoreError::MalformedRecord {
        id,
        reason: format!("negative score {}", record.score()),
    })?;

    let game = Game::from_parts(grid, score, *record.game_over(), *record.game_clear());
    Ok(GameSession::new(id, game))
}

impl GameStore for GameRepository {
    #[instrument(skip(self, game))]
    fn create_game(&self, game: &Game) -> Result<GameSession, StoreError> {
        let record = self.insert_game(NewGameRecord::new(
            encode_board(game.grid())?,
            encode_score(game.score())?,
            game.is_over(),
            game.is_won(),
        ))?;
        decode_record(&record)
    }

    #[instrument(skip(self))]
    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError> {
        self.find_game(id)?.as_ref().map(decode_record).transpose()
    }

    #[instrument(skip(self, session), fields(game_id = session.id))]
    fn save_game(&self, session: &GameSession) -> Result<(), StoreError> {
        let game = &session.game;
        let changes = GameChanges::new(
            encode_board(game.grid())?,
            encode_score(game.score())?,
            game.is_over(),
            game.is_won(),
            chrono::Utc::now().naive_utc(),
        );

        match self.update_game(session.id, changes)? {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownGame { id: session.id }),
        }
    }
}
