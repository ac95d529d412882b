//! Browser-facing engine: owns the canvas element and delegates to [`MapCore`].
//!
//! All map behavior lives in [`MapCore`] so it can be tested without a DOM.
//! `Engine` adds the pieces that need one: sizing the backing store for the
//! device pixel ratio, acquiring the 2D context, and painting a frame.

use tracing::{trace, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::color::Rgb;
use crate::config::MapConfig;
use crate::geom::{Point, Rect};
use crate::grid::GridError;
use crate::input::{Button, Key, Modifiers};
use crate::map::{Action, BackgroundImage, ContextAction, MapCore};
use crate::notify::{MapEvent, SubscriptionId};
use crate::render::{self, CanvasMeasure};
use crate::token::{Token, TokenId};

/// The full map engine. Wraps `MapCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    background: Option<HtmlImageElement>,
    dpr: f64,
    pub core: MapCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, background: None, dpr: 1.0, core: MapCore::new() }
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: &MapConfig) -> Self {
        Self { canvas, background: None, dpr: 1.0, core: MapCore::with_config(config) }
    }

    // --- Observers ---

    pub fn subscribe(&mut self, callback: impl FnMut(&MapEvent) + 'static) -> SubscriptionId {
        self.core.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core.unsubscribe(id)
    }

    // --- Tokens ---

    pub fn add_token(&mut self, token: Token) -> TokenId {
        self.core.add_token(token)
    }

    pub fn remove_token(&mut self, id: TokenId) -> bool {
        self.core.remove_token(id)
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.core.token(id)
    }

    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.core.token_mut(id)
    }

    /// Create a default token in the cell under `at`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DegenerateStep`] when the grid has no usable step.
    pub fn add_token_here(&mut self, at: Point) -> Result<TokenId, GridError> {
        self.core.add_token_here(at)
    }

    // --- Grid ---

    pub fn set_grid_step(&mut self, step: f64) {
        self.core.set_grid_step(step);
    }

    pub fn set_grid_h_offset(&mut self, offset: i32) {
        self.core.set_grid_h_offset(offset);
    }

    pub fn set_grid_v_offset(&mut self, offset: i32) {
        self.core.set_grid_v_offset(offset);
    }

    pub fn set_grid_color(&mut self, color: Rgb) {
        self.core.set_grid_color(color);
    }

    // --- Background ---

    /// Draw `image` beneath the grid at its natural size.
    ///
    /// The size is read now, so call this once the image has loaded. An image
    /// that has not loaded yet has no size and is not drawn.
    pub fn set_background_image(&mut self, image: HtmlImageElement) {
        let size = BackgroundImage {
            width: f64::from(image.natural_width()),
            height: f64::from(image.natural_height()),
        };
        if !image.complete() {
            warn!(src = %image.src(), "background image not loaded yet");
        }
        self.background = Some(image);
        self.core.set_background(Some(size));
    }

    pub fn clear_background_image(&mut self) {
        self.background = None;
        self.core.set_background(None);
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    ///
    /// The canvas backing store is resized to `css * dpr` device pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.dpr = dpr;
        self.canvas.set_width((width_css.max(0.0) * dpr).round() as u32);
        self.canvas.set_height((height_css.max(0.0) * dpr).round() as u32);
        self.core.set_viewport(width_css, height_css);
    }

    // --- Input events ---

    pub fn route_pointer_move(&mut self, pos: Point, source: TokenId) -> Vec<Action> {
        self.core.route_pointer_move(pos, source)
    }

    pub fn on_pointer_down(&mut self, pos: Point, button: Button, modifiers: Modifiers, click_count: u32) -> Vec<Action> {
        self.core.on_pointer_down(pos, button, modifiers, click_count)
    }

    pub fn on_pointer_move(&mut self, pos: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(pos, modifiers)
    }

    pub fn on_pointer_up(&mut self, pos: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(pos, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Context menu ---

    #[must_use]
    pub fn context_actions(&self, target: Option<TokenId>) -> Vec<ContextAction> {
        self.core.context_actions(target)
    }

    pub fn apply_context_action(&mut self, action: ContextAction, at: Point) -> Vec<Action> {
        self.core.apply_context_action(action, at)
    }

    // --- Render ---

    /// Whether state changed since the last frame.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.core.render_requested()
    }

    /// Draw the current state to the canvas.
    ///
    /// Returns the rectangle covered by the info card, if one was drawn.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&mut self) -> Result<Option<Rect>, JsValue> {
        let ctx = self.context()?;
        self.core.take_render_request();
        let scene = self.core.scene(&CanvasMeasure::new(&ctx));
        trace!(tokens = scene.tokens.len(), card = scene.card.is_some(), "render frame");
        render::draw(&ctx, &scene, self.background.as_ref(), self.dpr)?;
        Ok(scene.card.map(|card| card.rect))
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn active(&self) -> Option<TokenId> {
        self.core.active()
    }

    #[must_use]
    pub fn selection(&self) -> &[TokenId] {
        self.core.selection()
    }
}
