use super::*;
use crate::grid::Cell;

fn grid20() -> Grid {
    Grid::default()
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_map_hits_nothing() {
    assert_eq!(hit_test(Point::new(5.0, 5.0), &[], &grid20()), None);
}

#[test]
fn point_inside_cell_hits_token() {
    let tokens = vec![Token::at(Cell::new(2, 1))];
    assert_eq!(hit_test(Point::new(45.0, 23.0), &tokens, &grid20()), Some(tokens[0].id()));
    assert_eq!(hit_test(Point::new(40.0, 20.0), &tokens, &grid20()), Some(tokens[0].id()));
}

#[test]
fn point_outside_cell_misses() {
    let tokens = vec![Token::at(Cell::new(2, 1))];
    assert_eq!(hit_test(Point::new(60.0, 23.0), &tokens, &grid20()), None);
    assert_eq!(hit_test(Point::new(45.0, 19.9), &tokens, &grid20()), None);
}

#[test]
fn later_token_wins_on_shared_cell() {
    let tokens = vec![Token::at(Cell::new(0, 0)), Token::at(Cell::new(0, 0))];
    assert_eq!(hit_test(Point::new(5.0, 5.0), &tokens, &grid20()), Some(tokens[1].id()));
}

#[test]
fn hit_follows_grid_offsets() {
    let tokens = vec![Token::at(Cell::new(0, 0))];
    let g = Grid { h_offset: 100, v_offset: 50, ..Grid::default() };
    assert_eq!(hit_test(Point::new(5.0, 5.0), &tokens, &g), None);
    assert_eq!(hit_test(Point::new(105.0, 55.0), &tokens, &g), Some(tokens[0].id()));
}

#[test]
fn degenerate_grid_hits_nothing() {
    let tokens = vec![Token::at(Cell::new(0, 0))];
    let g = Grid { step: 0.0, ..Grid::default() };
    assert_eq!(hit_test(Point::new(0.0, 0.0), &tokens, &g), None);
}

// =============================================================
// tokens_in
// =============================================================

#[test]
fn tokens_in_collects_overlaps_in_z_order() {
    let tokens = vec![Token::at(Cell::new(0, 0)), Token::at(Cell::new(5, 5)), Token::at(Cell::new(1, 1))];
    let hits = tokens_in(Rect::new(10.0, 10.0, 20.0, 20.0), &tokens, &grid20());
    assert_eq!(hits, vec![tokens[0].id(), tokens[2].id()]);
}

#[test]
fn tokens_in_ignores_edge_contact() {
    let tokens = vec![Token::at(Cell::new(1, 0))];
    assert!(tokens_in(Rect::new(0.0, 0.0, 20.0, 20.0), &tokens, &grid20()).is_empty());
}
