//! Rendering: paints a [`Scene`] into a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It consumes a fully laid-out scene and produces pixels; it never mutates
//! map state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::card::{FixedAdvance, InfoCard, RowKind, TextMeasure};
use crate::consts::{CARD_FONT_PX, SELECTION_DASH_PX};
use crate::geom::Rect;
use crate::grid::GridLines;
use crate::scene::{Scene, TokenPlacement};

const CARD_FILL: &str = "rgba(250, 247, 240, 0.96)";
const CARD_STROKE: &str = "#3A3530";
const CARD_TEXT: &str = "#1F1A17";
const CARD_DOWN_TEXT: &str = "#B3261E";
const SELECTION_STROKE: &str = "#1E90FF";
const MARQUEE_FILL: &str = "rgba(30, 144, 255, 0.12)";

/// CSS font for a card row. Measuring and drawing both go through here.
pub(crate) fn row_font(kind: RowKind) -> String {
    match kind {
        RowKind::Name => format!("bold {CARD_FONT_PX}px sans-serif"),
        RowKind::Hitpoints { .. } => format!("{CARD_FONT_PX}px sans-serif"),
        RowKind::Condition => format!("italic {CARD_FONT_PX}px sans-serif"),
    }
}

fn row_color(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Hitpoints { down: true } => CARD_DOWN_TEXT,
        _ => CARD_TEXT,
    }
}

/// Measures card text with the context's real font metrics.
pub struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasMeasure<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure<'_> {
    fn text_width(&self, kind: RowKind, text: &str) -> f64 {
        self.ctx.save();
        self.ctx.set_font(&row_font(kind));
        let width = match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => FixedAdvance::default().text_width(kind, text),
        };
        self.ctx.restore();
        width
    }
}

/// Draw the full frame: background picture, grid, tokens, card, rubber band.
///
/// `dpr` is the device pixel ratio; scene coordinates are CSS pixels.
/// `background` is painted into `scene.background` when both are present.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    background: Option<&HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up the device transform.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    let vp = scene.viewport;
    ctx.clear_rect(vp.x, vp.y, vp.width, vp.height);

    // Layer 2: the map picture, then the grid over it.
    if let (Some(image), Some(at)) = (background, scene.background) {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(image, at.x, at.y, at.width, at.height)?;
    }
    draw_grid(ctx, &scene.lines, vp, &scene.grid_color.css());

    // Layer 3: tokens in z-order, each clipped around the card.
    for token in &scene.tokens {
        draw_token(ctx, token)?;
    }

    // Layer 4: the card, above everything else.
    if let Some(card) = &scene.card {
        draw_card(ctx, card)?;
    }

    if let Some(m) = scene.marquee {
        draw_marquee(ctx, m)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, lines: &GridLines, vp: Rect, color: &str) {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for &y in &lines.horizontal {
        ctx.move_to(vp.x, y + 0.5);
        ctx.line_to(vp.right(), y + 0.5);
    }
    for &x in &lines.vertical {
        ctx.move_to(x + 0.5, vp.y);
        ctx.line_to(x + 0.5, vp.bottom());
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_token(ctx: &CanvasRenderingContext2d, token: &TokenPlacement) -> Result<(), JsValue> {
    let r = token.rect;
    if r.is_empty() {
        return Ok(());
    }
    ctx.save();
    ctx.translate(r.x, r.y)?;

    // Clip regions are already in token-local space.
    if let Some(clip) = &token.clip {
        ctx.begin_path();
        for band in clip.rects() {
            ctx.rect(band.x, band.y, band.width, band.height);
        }
        ctx.clip();
    }

    ctx.set_fill_style_str(&token.color.css());
    ctx.fill_rect(0.0, 0.0, r.width, r.height);

    if !token.label.is_empty() {
        let font_size = (r.height * 0.6).clamp(8.0, 48.0);
        ctx.set_fill_style_str(&token.color.contrasting().css());
        ctx.set_font(&format!("bold {font_size}px sans-serif"));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(&token.label, r.width / 2.0, r.height / 2.0)?;
    }

    if token.selected {
        let dash_array = js_sys::Array::new();
        dash_array.push(&SELECTION_DASH_PX.into());
        dash_array.push(&SELECTION_DASH_PX.into());
        ctx.set_line_dash(&dash_array)?;
        ctx.set_stroke_style_str(SELECTION_STROKE);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(1.0, 1.0, r.width - 2.0, r.height - 2.0);
        ctx.set_line_dash(&js_sys::Array::new())?;
    }

    ctx.restore();
    Ok(())
}

/// Paint an info card and return the rectangle it covers.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_card(ctx: &CanvasRenderingContext2d, card: &InfoCard) -> Result<Rect, JsValue> {
    let r = card.rect;
    ctx.save();
    ctx.set_fill_style_str(CARD_FILL);
    ctx.fill_rect(r.x, r.y, r.width, r.height);
    ctx.set_stroke_style_str(CARD_STROKE);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(r.x + 0.5, r.y + 0.5, r.width - 1.0, r.height - 1.0);

    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");
    for row in &card.rows {
        ctx.set_font(&row_font(row.kind));
        ctx.set_fill_style_str(row_color(row.kind));
        ctx.fill_text(&row.text, row.baseline.x, row.baseline.y)?;
    }
    ctx.restore();
    Ok(r)
}

fn draw_marquee(ctx: &CanvasRenderingContext2d, marquee: Rect) -> Result<(), JsValue> {
    ctx.save();
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_fill_style_str(MARQUEE_FILL);
    ctx.set_line_width(1.0);
    ctx.fill_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    ctx.stroke_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
