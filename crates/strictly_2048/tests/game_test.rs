//! Tests for the game aggregate and grid validation.

use rand::{rngs::StdRng, SeedableRng};
use strictly_2048::{
    legal_directions, slide, Direction, Game, Grid, GridInvariants, InvariantSet,
    TilesArePowersOfTwo, Invariant,
};

fn grid(rows: [[u32; 4]; 4]) -> Grid {
    Grid::from_rows(rows).expect("valid grid")
}

#[test]
fn test_new_game_starts_clean() {
    let mut rng = StdRng::seed_from_u64(1);
    let game = Game::new(&mut rng);
    assert_eq!(game.grid().tile_count(), 2);
    assert_eq!(game.score(), 0);
    assert!(!game.is_over());
    assert!(!game.is_won());
}

#[test]
fn test_first_move_end_to_end() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut game = Game::new(&mut rng);

    let direction = legal_directions(game.grid())[0];
    let expected = slide(game.grid(), direction);

    let outcome = game.apply_move(direction, &mut rng);
    assert!(outcome.moved);
    assert_eq!(outcome.score_delta, expected.score_delta);
    assert_eq!(game.score(), expected.score_delta);
    assert_eq!(game.grid().tile_count(), expected.grid.tile_count() + 1);
    assert_eq!(game.grid(), &outcome.grid);
}

#[test]
fn test_score_accumulates_across_moves() {
    let mut rng = StdRng::seed_from_u64(3);
    let start = grid([
        [2, 2, 0, 0],
        [4, 4, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]);
    let mut game = Game::from_parts(start, 100, false, false);

    let outcome = game.apply_move(Direction::Left, &mut rng);
    assert_eq!(outcome.score_delta, 12);
    assert_eq!(game.score(), 112);
}

#[test]
fn test_flags_are_sticky() {
    let mut rng = StdRng::seed_from_u64(4);
    let start = grid([
        [2048, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 2],
    ]);
    let mut game = Game::from_parts(start, 0, false, true);
    assert!(game.is_won());

    game.apply_move(Direction::Right, &mut rng);
    assert!(game.is_won());

    let lost = grid([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    let mut game = Game::from_parts(lost, 64, false, false);
    let outcome = game.apply_move(Direction::Up, &mut rng);
    assert!(!outcome.moved);
    assert!(game.is_over());
    assert_eq!(game.score(), 64);
}

#[test]
fn test_grid_serializes_row_major() {
    let board = grid([
        [2, 0, 0, 0],
        [0, 4, 0, 0],
        [0, 0, 8, 0],
        [0, 0, 0, 16],
    ]);
    let json = serde_json::to_string(&board).expect("serialize");
    assert_eq!(json, "[[2,0,0,0],[0,4,0,0],[0,0,8,0],[0,0,0,16]]");

    let parsed: Grid = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, board);
}

#[test]
fn test_malformed_grids_are_rejected() {
    assert!(serde_json::from_str::<Grid>("[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
    assert!(serde_json::from_str::<Grid>("[[1,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
    assert!(serde_json::from_str::<Grid>("[[2,0,0],[0,0,0],[0,0,0]]").is_err());
    assert!(serde_json::from_str::<Grid>("[[-2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());

    let too_big: [[u32; 4]; 4] = [[1 << 31, 0, 0, 0], [0; 4], [0; 4], [0; 4]];
    assert!(Grid::from_rows(too_big).is_err());
}

#[test]
fn test_invariants_report_every_violation() {
    let rows: [[u32; 4]; 4] = [[6, 0, 0, 0], [0; 4], [0; 4], [1 << 31, 0, 0, 0]];
    let violations = <GridInvariants as InvariantSet<[[u32; 4]; 4]>>::check_all(&rows)
        .expect_err("two invariants are broken");
    assert_eq!(violations.len(), 2);

    assert!(<TilesArePowersOfTwo as Invariant<Grid>>::holds(&Grid::new()));
}

#[test]
fn test_set_validates_bounds_and_values() {
    let mut board = Grid::new();
    assert!(board.set(0, 0, 8).is_ok());
    assert_eq!(board.get(0, 0), Some(8));
    assert!(board.set(4, 0, 2).is_err());
    assert!(board.set(0, 0, 12).is_err());
    assert_eq!(board.get(4, 4), None);
}

#[test]
fn test_display_marks_empty_cells() {
    let board = grid([
        [2, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 16],
    ]);
    let text = board.to_string();
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with(" 2  ."));
    assert!(text.ends_with("16"));
}
