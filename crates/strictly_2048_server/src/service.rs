//! Game session business logic layer.

use crate::session::{GameId, GameSession};
use crate::store::{GameStore, StoreError};
use derive_more::{Display, Error};
use rand::Rng;
use std::sync::Arc;
use strictly_2048::{Direction, Game, Grid, MoveOutcome};
use tracing::{debug, info, instrument};

/// Failure handling a game request.
#[derive(Debug, Display, Error)]
pub enum GameServiceError {
    /// No game has this id.
    #[display("Game {id} not found")]
    NotFound {
        /// Requested game id.
        id: GameId,
    },
    /// The store failed.
    #[display("{_0}")]
    Store(StoreError),
}

impl From<StoreError> for GameServiceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Service layer for starting games and applying moves.
///
/// Wraps a [`GameStore`]; the grid itself only ever travels as a value
/// between the store and the engine. Concurrent moves on the same game are
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct GameService {
    store: Arc<dyn GameStore>,
}

impl GameService {
    /// Creates a new game service backed by the given store.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        info!("Creating GameService");
        Self { store }
    }

    /// Starts and stores a new game.
    ///
    /// # Errors
    ///
    /// Returns [`GameServiceError`] if the game cannot be stored.
    #[instrument(skip(self, rng))]
    pub fn start_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GameSession, GameServiceError> {
        let game = Game::new(rng);
        let session = self.store.create_game(&game)?;
        info!(game_id = session.id, "Game started");
        Ok(session)
    }

    /// Loads a game by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameServiceError::NotFound`] if there is no such game.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: GameId) -> Result<GameSession, GameServiceError> {
        self.store.load_game(id)?.ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            GameServiceError::NotFound { id }
        })
    }

    /// Returns the current grid of a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameServiceError::NotFound`] if there is no such game.
    #[instrument(skip(self))]
    pub fn get_board(&self, id: GameId) -> Result<Grid, GameServiceError> {
        Ok(*self.get_game(id)?.game.grid())
    }

    /// Applies a move to a stored game and saves the result.
    ///
    /// # Errors
    ///
    /// Returns [`GameServiceError`] if the game does not exist or cannot be
    /// loaded or saved.
    #[instrument(skip(self, rng))]
    pub fn make_move<R: Rng + ?Sized>(
        &self,
        id: GameId,
        direction: Direction,
        rng: &mut R,
    ) -> Result<(GameSession, MoveOutcome), GameServiceError> {
        let mut session = self.get_game(id)?;
        let outcome = session.game.apply_move(direction, rng);
        self.store.save_game(&session)?;

        info!(
            game_id = id,
            score = session.game.score(),
            earned = outcome.score_delta,
            moved = outcome.moved,
            game_over = session.game.is_over(),
            game_clear = session.game.is_won(),
            "Move saved"
        );
        Ok((session, outcome))
    }
}
