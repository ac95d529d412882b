#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect};
use crate::grid::Grid;
use crate::token::{Token, TokenId};

/// Topmost token whose cell contains `pt`, searching from the end of the
/// z-order (last drawn wins).
#[must_use]
pub fn hit_test(pt: Point, tokens: &[Token], grid: &Grid) -> Option<TokenId> {
    if grid.is_degenerate() {
        return None;
    }
    tokens
        .iter()
        .rev()
        .find(|t| grid.cell_rect(t.cell()).contains(pt))
        .map(Token::id)
}

/// Every token whose cell overlaps `area`, in z-order.
#[must_use]
pub fn tokens_in(area: Rect, tokens: &[Token], grid: &Grid) -> Vec<TokenId> {
    if grid.is_degenerate() {
        return Vec::new();
    }
    tokens
        .iter()
        .filter(|t| grid.cell_rect(t.cell()).intersects(&area))
        .map(Token::id)
        .collect()
}
