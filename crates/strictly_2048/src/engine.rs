//! Move engine: applies a direction to a whole grid.

use crate::line::{LineReduction, reduce_line, reduce_line_reversed};
use crate::spawner::{SpawnedTile, spawn_tile};
use crate::status::{is_game_over, is_game_won};
use crate::types::{Axis, Direction, GRID_SIZE, Grid, Line};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Deterministic part of a move: every line slid and merged, nothing spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    /// Grid after sliding.
    pub grid: Grid,
    /// Sum of all merges produced by the slide.
    pub score_delta: u32,
    /// Whether any cell changed.
    pub moved: bool,
}

/// Everything a caller needs after one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Grid after sliding and, if it moved, spawning.
    pub grid: Grid,
    /// Sum of all merges produced by this move.
    pub score_delta: u32,
    /// Whether the slide changed the grid.
    pub moved: bool,
    /// No empty cell and no merge left.
    pub game_over: bool,
    /// A winning tile is on the board.
    pub game_won: bool,
    /// Tile added after the slide, if any.
    pub spawned: Option<SpawnedTile>,
}

/// Slides every row or column of `grid` in `direction`.
///
/// Lines are reduced independently, so the result does not depend on the
/// order they are processed in.
#[instrument(level = "debug", skip(grid))]
pub fn slide(grid: &Grid, direction: Direction) -> Slide {
    let reduce: fn(Line) -> LineReduction = if direction.is_reversed() {
        reduce_line_reversed
    } else {
        reduce_line
    };

    let mut next = *grid;
    let mut score_delta: u32 = 0;
    for index in 0..GRID_SIZE {
        let reduction = match direction.axis() {
            Axis::Rows => {
                let reduction = reduce(grid.row(index));
                next.set_row(index, reduction.line);
                reduction
            }
            Axis::Columns => {
                let reduction = reduce(grid.column(index));
                next.set_column(index, reduction.line);
                reduction
            }
        };
        score_delta = score_delta.saturating_add(reduction.score);
    }

    debug_assert_eq!(
        grid.tile_sum(),
        next.tile_sum(),
        "sliding must conserve the sum of tiles"
    );

    let moved = next != *grid;
    debug!(score_delta, moved, "Slide computed");

    Slide {
        grid: next,
        score_delta,
        moved,
    }
}

/// Applies a move: slide, spawn one tile if anything moved, then evaluate
/// loss and win on the resulting grid.
///
/// Loss is re-evaluated even when the slide changed nothing.
#[instrument(skip(grid, rng))]
pub fn apply_move<R: Rng + ?Sized>(grid: &Grid, direction: Direction, rng: &mut R) -> MoveOutcome {
    let Slide {
        grid: mut next,
        score_delta,
        moved,
    } = slide(grid, direction);

    let spawned = if moved {
        spawn_tile(&mut next, rng)
    } else {
        debug!("Grid unchanged, skipping spawn");
        None
    };

    let game_over = is_game_over(&next);
    let game_won = is_game_won(&next);

    debug!(
        score_delta,
        moved,
        game_over,
        game_won,
        spawned = ?spawned,
        "Move applied"
    );

    MoveOutcome {
        grid: next,
        score_delta,
        moved,
        game_over,
        game_won,
        spawned,
    }
}

/// Directions whose slide would change the grid.
///
/// Empty exactly when the game is lost.
pub fn legal_directions(grid: &Grid) -> Vec<Direction> {
    Direction::iter()
        .filter(|&direction| slide(grid, direction).moved)
        .collect()
}
