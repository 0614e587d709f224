//! Game state: grid, cumulative score and sticky terminal flags.

use crate::engine::{MoveOutcome, apply_move};
use crate::spawner::init_grid;
use crate::types::{Direction, Grid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// 2048 game engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    score: u32,
    game_over: bool,
    game_won: bool,
}

impl Game {
    /// Starts a new game with two random tiles, score 0 and no flags set.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let grid = init_grid(rng);
        info!(tiles = grid.tile_count(), "New game started");
        Self::from_parts(grid, 0, false, false)
    }

    /// Restores a game from previously stored state.
    pub fn from_parts(grid: Grid, score: u32, game_over: bool, game_won: bool) -> Self {
        Self {
            grid,
            score,
            game_over,
            game_won,
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the cumulative score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game has been lost at some point.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Whether a winning tile has been reached at some point.
    pub fn is_won(&self) -> bool {
        self.game_won
    }

    /// Applies a move and folds its outcome into the game.
    ///
    /// Flags are sticky: once set they stay set. Moves are still accepted after
    /// a win or loss; on a lost grid they simply report `moved == false`.
    #[instrument(skip(self, rng), fields(score = self.score))]
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        let outcome = apply_move(&self.grid, direction, rng);

        self.grid = outcome.grid;
        self.score = self.score.saturating_add(outcome.score_delta);
        self.game_over |= outcome.game_over;
        self.game_won |= outcome.game_won;

        info!(
            ?direction,
            score_delta = outcome.score_delta,
            score = self.score,
            moved = outcome.moved,
            game_over = self.game_over,
            game_won = self.game_won,
            "Move completed"
        );

        outcome
    }
}
