//! In-memory game session management.

use crate::store::{GameStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use strictly_2048::Game;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type GameId = i32;

/// A stored game together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Session ID.
    pub id: GameId,
    /// The game state.
    pub game: Game,
}

impl GameSession {
    /// Creates a new game session.
    pub fn new(id: GameId, game: Game) -> Self {
        Self { id, game }
    }
}

#[derive(Debug, Default)]
struct SessionTable {
    last_id: GameId,
    sessions: HashMap<GameId, GameSession>,
}

/// Manages game sessions in memory.
///
/// Clones share the same table. Ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    table: Arc<Mutex<SessionTable>>,
}

impl SessionManager {
    /// Creates a new, empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionTable>, StoreError> {
        self.table.lock().map_err(|_| {
            warn!("Session table lock poisoned");
            StoreError::Unavailable {
                reason: "session table lock poisoned".to_string(),
            }
        })
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the session table is unavailable.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.sessions.len())
    }

    /// Checks if no session is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the session table is unavailable.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl GameStore for SessionManager {
    #[instrument(skip(self, game))]
    fn create_game(&self, game: &Game) -> Result<GameSession, StoreError> {
        let mut table = self.lock()?;
        table.last_id += 1;
        let session = GameSession::new(table.last_id, game.clone());
        table.sessions.insert(session.id, session.clone());

        info!(game_id = session.id, "Created new session");
        Ok(session)
    }

    #[instrument(skip(self))]
    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError> {
        let session = self.lock()?.sessions.get(&id).cloned();
        if session.is_none() {
            debug!(game_id = id, "Session not found");
        }
        Ok(session)
    }

    #[instrument(skip(self, session), fields(game_id = session.id))]
    fn save_game(&self, session: &GameSession) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        match table.sessions.get_mut(&session.id) {
            Some(stored) => {
                *stored = session.clone();
                debug!("Session updated");
                Ok(())
            }
            None => {
                warn!("Attempted to save unknown session");
                Err(StoreError::UnknownGame { id: session.id })
            }
        }
    }
}
