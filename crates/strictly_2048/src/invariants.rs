//! Invariants every grid must satisfy.
//!
//! A cell is either empty (`0`) or holds a tile whose value is a power of two.
//! Tiles are also capped at [`MAX_TILE`]; the line reducer never merges a
//! tile at the cap, so a valid grid only ever slides into another valid grid.

use crate::types::{Grid, MAX_TILE, Rows};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every non-empty cell holds a power of two other than 1.
#[derive(Debug, Clone, Copy)]
pub struct TilesArePowersOfTwo;

impl TilesArePowersOfTwo {
    /// Checks a single cell value.
    pub fn cell_holds(value: u32) -> bool {
        value == 0 || (value >= 2 && value.is_power_of_two())
    }
}

impl Invariant<Rows> for TilesArePowersOfTwo {
    fn holds(rows: &Rows) -> bool {
        rows.iter().flatten().all(|&value| Self::cell_holds(value))
    }

    fn description() -> &'static str {
        "every tile is a power of two (2, 4, 8, ...)"
    }
}

impl Invariant<Grid> for TilesArePowersOfTwo {
    fn holds(grid: &Grid) -> bool {
        <Self as Invariant<Rows>>::holds(grid.rows())
    }

    fn description() -> &'static str {
        <Self as Invariant<Rows>>::description()
    }
}

/// No tile exceeds [`MAX_TILE`].
#[derive(Debug, Clone, Copy)]
pub struct TilesWithinRange;

impl Invariant<Rows> for TilesWithinRange {
    fn holds(rows: &Rows) -> bool {
        rows.iter().flatten().all(|&value| value <= MAX_TILE)
    }

    fn description() -> &'static str {
        "no tile exceeds 2^30"
    }
}

impl Invariant<Grid> for TilesWithinRange {
    fn holds(grid: &Grid) -> bool {
        <Self as Invariant<Rows>>::holds(grid.rows())
    }

    fn description() -> &'static str {
        <Self as Invariant<Rows>>::description()
    }
}

/// The invariants checked whenever a grid is built from raw rows.
pub type GridInvariants = (TilesArePowersOfTwo, TilesWithinRange);
