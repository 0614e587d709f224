//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// Stored game row. `board` holds the grid as a JSON array of rows.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    board: String,
    score: i32,
    game_over: bool,
    game_clear: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable game row for starting a new game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    board: String,
    score: i32,
    game_over: bool,
    game_clear: bool,
}

/// Changes written back after a move.
#[derive(Debug, Clone, AsChangeset, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameChanges {
    board: String,
    score: i32,
    game_over: bool,
    game_clear: bool,
    updated_at: NaiveDateTime,
}
