//! Database repository for stored games.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, GameChanges, GameRecord, NewGameRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for game rows.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// The file is created on first connection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(DbErrorKind::Config, "Database path must not be empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to open '{}': {}", self.db_path, e),
                )
            })
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if connecting or migrating fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;

        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Inserts a new game row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(score = game.score()))]
    pub fn insert_game(&self, game: NewGameRecord) -> Result<GameRecord, DbError> {
        debug!("Inserting game");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::games::table)
            .values(&game)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = record.id(), "Game inserted");
        Ok(record)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game(&self, id: i32) -> Result<Option<GameRecord>, DbError> {
        debug!(game_id = id, "Looking up game");
        let mut conn = self.connection()?;

        let record = schema::games::table
            .find(id)
            .select(GameRecord::as_select())
            .first(&mut conn)
            .optional()?;

        if record.is_none() {
            debug!(game_id = id, "Game not found");
        }
        Ok(record)
    }

    /// Writes changes to an existing game. Returns `None` if no such game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, changes), fields(score = changes.score(), game_over = changes.game_over()))]
    pub fn update_game(&self, id: i32, changes: GameChanges) -> Result<Option<GameRecord>, DbError> {
        debug!(game_id = id, "Updating game");
        let mut conn = self.connection()?;

        let record = diesel::update(schema::games::table.find(id))
            .set(&changes)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)
            .optional()?;

        match &record {
            Some(r) => info!(game_id = r.id(), score = r.score(), "Game updated"),
            None => debug!(game_id = id, "No game to update"),
        }
        Ok(record)
    }
}
