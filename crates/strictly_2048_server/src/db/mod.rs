//! Database persistence layer for game sessions.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{GameChanges, GameRecord, NewGameRecord};
pub use repository::GameRepository;
