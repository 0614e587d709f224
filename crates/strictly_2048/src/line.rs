//! Single-line compaction and merging.
//!
//! Every move is built from [`reduce_line`]: the line is oriented so that
//! tiles slide toward index 0, compacted, merged pairwise from the front,
//! then compacted again.

use crate::types::{GRID_SIZE, Line, MAX_TILE};

/// Result of reducing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReduction {
    /// The line after sliding and merging.
    pub line: Line,
    /// Sum of the tiles produced by merges in this line.
    pub score: u32,
}

/// Slides all tiles toward index 0, preserving order, without merging.
pub fn compact(line: Line) -> Line {
    let mut compacted = [0; GRID_SIZE];
    for (slot, value) in compacted
        .iter_mut()
        .zip(line.into_iter().filter(|&v| v != 0))
    {
        *slot = value;
    }
    compacted
}

/// Slides and merges a line toward index 0.
///
/// Equal neighbours merge once per move: `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`, never `[8, 0, 0, 0]`. Tiles already at [`MAX_TILE`]
/// slide but never merge.
pub fn reduce_line(line: Line) -> LineReduction {
    let mut merged = compact(line);
    let mut score: u32 = 0;

    let mut i = 0;
    while i + 1 < GRID_SIZE {
        if merged[i] != 0 && merged[i] < MAX_TILE && merged[i] == merged[i + 1] {
            merged[i] *= 2;
            merged[i + 1] = 0;
            score = score.saturating_add(merged[i]);
            // A merged tile is never merged again in the same pass.
            i += 2;
        } else {
            i += 1;
        }
    }

    LineReduction {
        line: compact(merged),
        score,
    }
}

/// Slides and merges a line toward its last index.
pub fn reduce_line_reversed(line: Line) -> LineReduction {
    let mut reversed = line;
    reversed.reverse();
    let mut reduction = reduce_line(reversed);
    reduction.line.reverse();
    reduction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_preserves_order() {
        assert_eq!(compact([0, 4, 0, 2]), [4, 2, 0, 0]);
        assert_eq!(compact([8, 0, 0, 0]), [8, 0, 0, 0]);
    }

    #[test]
    fn merge_skips_freshly_merged_tile() {
        let reduction = reduce_line([4, 4, 8, 0]);
        assert_eq!(reduction.line, [8, 8, 0, 0]);
        assert_eq!(reduction.score, 8);
    }

    #[test]
    fn capped_tiles_do_not_merge() {
        let reduction = reduce_line([0, MAX_TILE, 0, MAX_TILE]);
        assert_eq!(reduction.line, [MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(reduction.score, 0);
    }

    #[test]
    fn reversed_reduction_slides_toward_end() {
        let reduction = reduce_line_reversed([2, 2, 0, 4]);
        assert_eq!(reduction.line, [0, 0, 4, 4]);
        assert_eq!(reduction.score, 4);
    }
}
