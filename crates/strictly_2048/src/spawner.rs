//! Random tile placement.

use crate::types::{Cell, Grid};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// A tile placed by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Where the tile landed.
    pub cell: Cell,
    /// Value of the tile (2 or 4).
    pub value: u32,
}

/// Places a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Returns `None` and leaves the grid untouched when it is full.
#[instrument(level = "debug", skip(grid, rng), fields(empty = grid.empty_count()))]
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<SpawnedTile> {
    let empty = grid.empty_cells();
    let Some(&cell) = empty.choose(rng) else {
        debug!("No empty cell, nothing to spawn");
        return None;
    };

    let value = if rng.gen_bool(FOUR_TILE_PROBABILITY) { 4 } else { 2 };
    grid.place(cell, value);

    debug!(%cell, value, "Spawned tile");
    Some(SpawnedTile { cell, value })
}

/// Creates a starting grid holding exactly two tiles.
#[instrument(skip(rng))]
pub fn init_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    let mut grid = Grid::new();
    spawn_tile(&mut grid, rng);
    spawn_tile(&mut grid, rng);
    grid
}
