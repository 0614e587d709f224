//! Core domain types for 2048.

use crate::error::GridError;
use crate::invariants::{GridInvariants, InvariantSet, TilesArePowersOfTwo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns on the board.
pub const GRID_SIZE: usize = 4;

/// Tile value that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Largest tile a grid may hold. Tiles at this value no longer merge.
pub const MAX_TILE: u32 = 1 << 30;

/// A single row or column, oriented so that sliding moves toward index 0.
pub type Line = [u32; GRID_SIZE];

/// Raw row-major cell values.
pub type Rows = [Line; GRID_SIZE];

/// Coordinates of a cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index (0 = left).
    pub col: usize,
}

impl Cell {
    /// Creates a new cell coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// 4x4 board of tiles. `0` marks an empty cell.
///
/// Serializes as a row-major array of arrays. Deserialization goes through
/// [`Grid::from_rows`], so values that are not valid tiles are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Rows", into = "Rows")]
pub struct Grid {
    cells: Rows,
}

impl Grid {
    /// Creates a new empty grid.
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Builds a grid from row-major values, validating every cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if any cell is neither empty nor a power of two
    /// no larger than [`MAX_TILE`].
    pub fn from_rows(rows: Rows) -> Result<Self, GridError> {
        <GridInvariants as InvariantSet<Rows>>::check_all(&rows).map_err(|violations| {
            let described: Vec<_> = violations.into_iter().map(|v| v.description).collect();
            GridError::new(format!("Invalid grid {:?}: {}", rows, described.join("; ")))
        })?;
        Ok(Self { cells: rows })
    }

    /// Returns all cells in row-major order.
    pub fn rows(&self) -> &Rows {
        &self.cells
    }

    /// Gets the value at the given cell, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Sets the value at the given cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the cell is out of bounds or the value is not
    /// a valid tile.
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<(), GridError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(GridError::new(format!(
                "Cell [{},{}] out of bounds (must be 0-{})",
                row,
                col,
                GRID_SIZE - 1
            )));
        }
        if !TilesArePowersOfTwo::cell_holds(value) || value > MAX_TILE {
            return Err(GridError::new(format!("{} is not a valid tile value", value)));
        }
        self.cells[row][col] = value;
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell.row, cell.col) == Some(0)
    }

    /// Returns the given row.
    pub fn row(&self, index: usize) -> Line {
        self.cells[index]
    }

    /// Returns the given column, top to bottom.
    pub fn column(&self, index: usize) -> Line {
        std::array::from_fn(|row| self.cells[row][index])
    }

    pub(crate) fn set_row(&mut self, index: usize, line: Line) {
        self.cells[index] = line;
    }

    pub(crate) fn set_column(&mut self, index: usize, line: Line) {
        for (row, value) in line.into_iter().enumerate() {
            self.cells[row][index] = value;
        }
    }

    /// Writes a tile into a cell known to be in bounds.
    pub(crate) fn place(&mut self, cell: Cell, value: u32) {
        self.cells[cell.row][cell.col] = value;
    }

    /// Lists empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| Cell::new(row, col)))
            .filter(|&cell| self.is_empty_at(cell))
            .collect()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        GRID_SIZE * GRID_SIZE - self.empty_count()
    }

    /// Checks if every cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Largest tile on the board (`0` for an empty grid).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Checks if any cell holds exactly `value`.
    pub fn contains(&self, value: u32) -> bool {
        self.cells.iter().flatten().any(|&v| v == value)
    }

    /// Formats the grid as a human-readable block, `.` for empty cells.
    pub fn display(&self) -> String {
        let width = self.max_tile().max(1).to_string().len();
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| {
                        let symbol = if v == 0 { ".".to_string() } else { v.to_string() };
                        format!("{:>width$}", symbol, width = width)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<Rows> for Grid {
    type Error = GridError;

    fn try_from(rows: Rows) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Rows {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

/// Which lines a direction slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Slide each row horizontally.
    Rows,
    /// Slide each column vertically.
    Columns,
}

/// Direction the tiles slide in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Direction {
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The axis whose lines this direction slides along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Rows,
            Direction::Up | Direction::Down => Axis::Columns,
        }
    }

    /// Whether lines must be reversed so that sliding moves toward index 0.
    pub fn is_reversed(self) -> bool {
        match self {
            Direction::Left | Direction::Up => false,
            Direction::Right | Direction::Down => true,
        }
    }
}
