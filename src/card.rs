//! Info card layout for the active token.
//!
//! Layout is pure so the map can compute the card's footprint (and from it
//! every token's clip region) without a drawing context. Text widths come
//! from a [`TextMeasure`]; the web backend measures with the real font,
//! tests use [`FixedAdvance`].

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use crate::consts::{
    CARD_BASELINE_DESCENT, CARD_LINE_HEIGHT, CARD_MIN_WIDTH, CARD_PADDING, CARD_POINTER_GAP, FALLBACK_CHAR_ADVANCE,
};
use crate::geom::{Point, Rect};
use crate::token::Token;

/// Something that can report the rendered width of a line of card text.
///
/// `kind` selects the font: rows are styled differently (the name is bold),
/// and the card must be wide enough for the text as it is actually drawn.
pub trait TextMeasure {
    fn text_width(&self, kind: RowKind, text: &str) -> f64;
}

/// Monospace approximation: every character advances by the same amount.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance(pub f64);

impl Default for FixedAdvance {
    fn default() -> Self {
        Self(FALLBACK_CHAR_ADVANCE)
    }
}

impl TextMeasure for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, _kind: RowKind, text: &str) -> f64 {
        text.chars().count() as f64 * self.0
    }
}

/// What a card row shows; the renderer styles rows by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Name,
    /// Hit points; `down` is set when current hit points are at or below zero.
    Hitpoints { down: bool },
    Condition,
}

/// One line of text on the card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRow {
    pub kind: RowKind,
    pub text: String,
    /// Left end of the text baseline, in canvas pixels.
    pub baseline: Point,
}

/// A laid-out card: its footprint and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub rect: Rect,
    pub rows: Vec<CardRow>,
}

impl InfoCard {
    /// Lay out `token`'s card with its top-left corner offset from `anchor`.
    #[must_use]
    pub fn layout(token: &Token, anchor: Point, measure: &impl TextMeasure) -> Self {
        let mut lines = Vec::with_capacity(2 + token.conditions().len());
        lines.push((RowKind::Name, token.name().to_string()));
        lines.push((
            RowKind::Hitpoints { down: token.current_hitpoints() <= 0 },
            format!("HP {}/{}", token.current_hitpoints(), token.max_hitpoints()),
        ));
        for condition in token.conditions() {
            lines.push((RowKind::Condition, condition.clone()));
        }

        let text_width = lines
            .iter()
            .map(|(kind, text)| measure.text_width(*kind, text))
            .fold(0.0_f64, f64::max);
        let width = (text_width + 2.0 * CARD_PADDING).max(CARD_MIN_WIDTH);
        #[allow(clippy::cast_precision_loss)]
        let height = lines.len() as f64 * CARD_LINE_HEIGHT + 2.0 * CARD_PADDING;

        let origin = anchor.offset(CARD_POINTER_GAP, CARD_POINTER_GAP);
        let rows = lines
            .into_iter()
            .enumerate()
            .map(|(i, (kind, text))| {
                #[allow(clippy::cast_precision_loss)]
                let baseline_y = origin.y + CARD_PADDING + (i as f64 + 1.0) * CARD_LINE_HEIGHT - CARD_BASELINE_DESCENT;
                CardRow { kind, text, baseline: Point::new(origin.x + CARD_PADDING, baseline_y) }
            })
            .collect();

        Self { rect: Rect::new(origin.x, origin.y, width, height), rows }
    }
}
