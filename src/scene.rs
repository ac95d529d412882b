//! Frame layout: everything the renderer needs, computed without a context.
//!
//! Each frame re-derives every token's rectangle from its cell and the
//! current grid. When a token is active its info card is laid out at the
//! last pointer position, and every token (the active one too) is clipped to
//! the visible area minus the card, in the token's own local coordinates.
//! The card therefore stays visible whatever order the tokens are drawn in.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::card::{InfoCard, TextMeasure};
use crate::color::Rgb;
use crate::geom::{Rect, Region};
use crate::grid::{Cell, GridLines};
use crate::map::MapCore;
use crate::token::TokenId;

/// One token as it appears in this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPlacement {
    pub id: TokenId,
    /// Canvas-space rectangle: one grid cell.
    pub rect: Rect,
    pub color: Rgb,
    /// Short label painted on the tile (first letter of the name).
    pub label: String,
    pub selected: bool,
    pub active: bool,
    /// Drawable area in token-local coordinates (origin at `rect`'s top-left).
    /// `None` when no card is showing and the token is unclipped.
    pub clip: Option<Region>,
}

/// A complete frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Rect,
    /// Where the background picture goes, if one is set and has a size.
    pub background: Option<Rect>,
    pub grid_color: Rgb,
    pub lines: GridLines,
    /// Tokens in z-order.
    pub tokens: Vec<TokenPlacement>,
    /// Active token's card, drawn after (above) every token.
    pub card: Option<InfoCard>,
    pub marquee: Option<Rect>,
}

/// Lay out `map`'s next frame.
#[must_use]
pub fn build(map: &MapCore, measure: &impl TextMeasure) -> Scene {
    let grid = map.grid();
    let viewport = map.viewport();
    let ui = map.ui();
    let card = map.active_card(measure);
    let origin = grid.cell_origin(Cell::default());
    let background = map
        .background()
        .map(|image| Rect::new(origin.x, origin.y, image.width, image.height))
        .filter(|rect| !rect.is_empty());
    let visible = card.as_ref().map(|c| Region::from_rect(viewport).subtracted(&c.rect));

    let tokens = map
        .tokens()
        .iter()
        .map(|token| {
            let rect = grid.cell_rect(token.cell());
            let clip = visible.as_ref().map(|region| region.translated(-rect.x, -rect.y));
            TokenPlacement {
                id: token.id(),
                rect,
                color: token.color(),
                label: token.name().chars().next().map(String::from).unwrap_or_default(),
                selected: ui.is_selected(token.id()),
                active: ui.active == Some(token.id()),
                clip,
            }
        })
        .collect();

    Scene {
        viewport,
        background,
        grid_color: grid.color,
        lines: grid.lines(viewport),
        tokens,
        card,
        marquee: ui.marquee,
    }
}
