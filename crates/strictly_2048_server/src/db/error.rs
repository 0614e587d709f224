//! Game database error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which step of talking to the game database failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The repository was given an unusable setting.
    #[display("configuration")]
    Config,
    /// The database file could not be opened.
    #[display("connection")]
    Connection,
    /// Schema migrations failed.
    #[display("migration")]
    Migration,
    /// A query against the `games` table failed.
    #[display("query")]
    Query,
}

/// Game database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game database {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failing step.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new game database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}
