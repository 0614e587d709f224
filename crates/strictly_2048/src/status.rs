//! Terminal-state detection: loss and win.

use crate::types::{GRID_SIZE, Grid, MAX_TILE, WINNING_TILE};
use tracing::instrument;

/// Checks if any two horizontally or vertically adjacent cells hold the same
/// non-zero tile below [`MAX_TILE`].
pub fn has_adjacent_pair(grid: &Grid) -> bool {
    let rows = grid.rows();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let value = rows[row][col];
            if value == 0 || value >= MAX_TILE {
                continue;
            }
            if col + 1 < GRID_SIZE && rows[row][col + 1] == value {
                return true;
            }
            if row + 1 < GRID_SIZE && rows[row + 1][col] == value {
                return true;
            }
        }
    }
    false
}

/// Checks if the game is lost: no empty cell and no merge available.
#[instrument(level = "debug", skip(grid), fields(tiles = grid.tile_count()))]
pub fn is_game_over(grid: &Grid) -> bool {
    grid.is_full() && !has_adjacent_pair(grid)
}

/// Checks if the game is won: some cell holds exactly [`WINNING_TILE`].
#[instrument(level = "debug", skip(grid), fields(max_tile = grid.max_tile()))]
pub fn is_game_won(grid: &Grid) -> bool {
    grid.contains(WINNING_TILE)
}
