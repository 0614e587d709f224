//! Strictly 2048 - the move/merge engine of a sliding-tile puzzle.
//!
//! Given a 4x4 grid and a direction, the engine computes the resulting grid,
//! the score gained and whether the game has been won or lost. It performs no
//! I/O; the only thing it consumes from its environment is a random source,
//! passed in explicitly so callers can seed it.
//!
//! # Architecture
//!
//! - **Line reducer**: compacts and merges one row or column ([`reduce_line`])
//! - **Move engine**: applies a [`Direction`] to every line ([`slide`], [`apply_move`])
//! - **Tile spawner**: drops a 2 or 4 into a random empty cell ([`spawn_tile`])
//! - **Terminal state**: loss and win detection ([`is_game_over`], [`is_game_won`])
//! - **Game**: grid plus cumulative score and sticky flags ([`Game`])
//!
//! # Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use strictly_2048::{Direction, Game};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(&mut rng);
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! let outcome = game.apply_move(Direction::Left, &mut rng);
//! assert_eq!(game.score(), outcome.score_delta);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod error;
mod game;
mod invariants;
mod line;
mod spawner;
mod status;
mod types;

// Crate-level exports - Core types
pub use error::GridError;
pub use types::{Axis, Cell, Direction, GRID_SIZE, Grid, Line, MAX_TILE, Rows, WINNING_TILE};

// Crate-level exports - Invariants
pub use invariants::{
    GridInvariants, Invariant, InvariantSet, InvariantViolation, TilesArePowersOfTwo,
    TilesWithinRange,
};

// Crate-level exports - Line reducer
pub use line::{LineReduction, compact, reduce_line, reduce_line_reversed};

// Crate-level exports - Move engine
pub use engine::{MoveOutcome, Slide, apply_move, legal_directions, slide};

// Crate-level exports - Tile spawner
pub use spawner::{FOUR_TILE_PROBABILITY, SpawnedTile, init_grid, spawn_tile};

// Crate-level exports - Terminal state
pub use status::{has_adjacent_pair, is_game_over, is_game_won};

// Crate-level exports - Game
pub use game::Game;
