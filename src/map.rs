//! The map core: token ownership, grid state, hover/selection, and input.
//!
//! `MapCore` holds everything that does not need a drawing context, so it can
//! be driven and tested natively. [`crate::engine::Engine`] wraps it together
//! with the browser canvas element.
//!
//! Commands (`add_token`, `set_grid_step`, …) mutate state, notify
//! subscribers, and raise the render request flag. Input handlers do the same
//! and also return [`Action`]s for the host (open a context menu, open the
//! token editor, change the cursor).

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, trace, warn};

use crate::card::{InfoCard, TextMeasure};
use crate::color::Rgb;
use crate::config::MapConfig;
use crate::consts::MARQUEE_MIN_PX;
use crate::geom::{Point, Rect};
use crate::grid::{Cell, Grid, GridError};
use crate::hit;
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::notify::{MapEvent, Observers, SubscriptionId};
use crate::scene::{self, Scene};
use crate::token::{Token, TokenId, TokenSignal, TokenTemplate};

/// Requests returned from input handlers for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// State changed; schedule a frame.
    RenderNeeded,
    /// Secondary click: show a menu built from [`MapCore::context_actions`].
    ContextMenuRequested { at: Point, target: Option<TokenId> },
    /// Double click on a token: open the token editor.
    EditTokenRequested { id: TokenId },
    /// A drag or nudge moved a token to a new cell.
    TokenMoved { id: TokenId, cell: Cell },
    /// A token was created by a context action.
    TokenAdded { id: TokenId },
    /// A token was removed by a key or context action.
    TokenRemoved { id: TokenId },
    /// Change the pointer cursor (CSS cursor name).
    SetCursor(&'static str),
}

/// Entries of the map's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    /// Create a default token in the cell under the click.
    AddTokenHere,
    /// Remove the token under the click.
    RemoveToken(TokenId),
}

impl ContextAction {
    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AddTokenHere => "Add Player Here",
            Self::RemoveToken(_) => "Remove Player",
        }
    }
}

/// Natural pixel size of the map picture drawn under the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundImage {
    pub width: f64,
    pub height: f64,
}

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

/// Token collection, grid, and interaction state for one map.
pub struct MapCore {
    tokens: Vec<Token>,
    grid: Grid,
    background: Option<BackgroundImage>,
    ui: UiState,
    input: InputState,
    template: TokenTemplate,
    observers: Observers<MapEvent>,
    signal_tx: Sender<TokenSignal>,
    signal_rx: Receiver<TokenSignal>,
    viewport: Rect,
    cursor: &'static str,
    render_requested: bool,
}

impl Default for MapCore {
    fn default() -> Self {
        Self::with_config(&MapConfig::default())
    }
}

impl std::fmt::Debug for MapCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapCore")
            .field("tokens", &self.tokens.len())
            .field("grid", &self.grid)
            .field("ui", &self.ui)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl MapCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &MapConfig) -> Self {
        let (signal_tx, signal_rx) = mpsc::channel();
        Self {
            tokens: Vec::new(),
            grid: config.grid(),
            background: None,
            ui: UiState::default(),
            input: InputState::Idle,
            template: config.token.clone(),
            observers: Observers::new(),
            signal_tx,
            signal_rx,
            viewport: Rect::default(),
            cursor: CURSOR_DEFAULT,
            render_requested: true,
        }
    }

    // --- Subscriptions ---

    /// Register a listener for [`MapEvent`]s.
    pub fn subscribe(&mut self, callback: impl FnMut(&MapEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: MapEvent) {
        self.observers.notify(&event);
    }

    fn emit_tokens_changed(&mut self) {
        let ids = self.tokens.iter().map(Token::id).collect();
        self.emit(MapEvent::TokensChanged(ids));
    }

    // --- Render scheduling ---

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Whether a frame has been requested since the last [`MapCore::take_render_request`].
    #[must_use]
    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Read and clear the render request flag.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    // --- Token collection ---

    /// Append `token` on top of the z-order and take ownership of it.
    pub fn add_token(&mut self, mut token: Token) -> TokenId {
        let id = token.id();
        token.attach(self.signal_tx.clone());
        debug!(%id, cell = ?token.cell(), "token added");
        self.tokens.push(token);
        self.emit_tokens_changed();
        self.request_render();
        id
    }

    /// Remove and drop the token `id`. Returns false (and notifies nobody)
    /// when no such token is on the map.
    pub fn remove_token(&mut self, id: TokenId) -> bool {
        let Some(pos) = self.tokens.iter().position(|t| t.id() == id) else {
            return false;
        };
        self.ui.forget(id);
        if let InputState::DraggingTokens { grabbed, .. } = self.input {
            if grabbed == id {
                self.input = InputState::Idle;
            }
        }
        drop(self.tokens.remove(pos));
        debug!(%id, "token removed");
        self.emit_tokens_changed();
        self.request_render();
        true
    }

    /// Tokens in z-order (first is drawn first).
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id() == id)
    }

    /// Mutable access for token editors. Changes are announced as
    /// `TokensChanged` on the next [`MapCore::sync`].
    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id() == id)
    }

    fn contains(&self, id: TokenId) -> bool {
        self.tokens.iter().any(|t| t.id() == id)
    }

    /// Apply pending token signals: re-broadcast field updates as one
    /// `TokensChanged` and carry out deletion requests.
    pub fn sync(&mut self) {
        let signals: Vec<TokenSignal> = self.signal_rx.try_iter().collect();
        if signals.is_empty() {
            return;
        }
        let mut updated = false;
        for signal in signals {
            match signal {
                TokenSignal::Updated(id) => updated |= self.contains(id),
                TokenSignal::DeleteRequested(id) => {
                    self.remove_token(id);
                }
            }
        }
        if updated {
            self.emit_tokens_changed();
            self.request_render();
        }
    }

    // --- Grid ---

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn grid_step(&self) -> f64 {
        self.grid.step
    }

    /// Set the cell size. Not validated: a non-positive step draws no grid
    /// and blocks pixel-to-cell conversion until corrected.
    pub fn set_grid_step(&mut self, step: f64) {
        self.grid.step = step;
        debug!(step, "grid step changed");
        if self.grid.is_degenerate() {
            warn!(step, "grid step is not positive; grid hidden");
        }
        self.emit(MapEvent::GridStepChanged(step));
        self.request_render();
    }

    pub fn set_grid_h_offset(&mut self, offset: i32) {
        self.grid.h_offset = offset;
        debug!(offset, "grid horizontal offset changed");
        self.emit(MapEvent::GridHOffsetChanged(offset));
        self.request_render();
    }

    pub fn set_grid_v_offset(&mut self, offset: i32) {
        self.grid.v_offset = offset;
        debug!(offset, "grid vertical offset changed");
        self.emit(MapEvent::GridVOffsetChanged(offset));
        self.request_render();
    }

    pub fn set_grid_color(&mut self, color: Rgb) {
        self.grid.color = color;
        debug!(%color, "grid color changed");
        self.emit(MapEvent::GridColorChanged(color));
        self.request_render();
    }

    // --- Background ---

    /// Set or clear the picture drawn beneath the grid. It is placed with its
    /// top-left corner at the grid origin, so it moves with the offsets.
    pub fn set_background(&mut self, background: Option<BackgroundImage>) {
        self.background = background;
        debug!(?background, "background changed");
        self.emit(MapEvent::BackgroundChanged(background.is_some()));
        self.request_render();
    }

    #[must_use]
    pub fn background(&self) -> Option<BackgroundImage> {
        self.background
    }

    // --- Viewport / hover ---

    /// Size of the visible area in canvas pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.request_render();
    }

    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Token currently showing its info card.
    #[must_use]
    pub fn active(&self) -> Option<TokenId> {
        self.ui.active
    }

    #[must_use]
    pub fn selection(&self) -> &[TokenId] {
        &self.ui.selection
    }

    /// Report a pointer move observed over token `source`. The token becomes
    /// active and the card anchors at `pos`. Unknown tokens are ignored.
    ///
    /// `pos` is in canvas coordinates, the space `on_pointer_move` uses, not
    /// relative to the token. A host that observed a token-local position
    /// first adds `grid().cell_origin(token.cell())` to it.
    pub fn route_pointer_move(&mut self, pos: Point, source: TokenId) -> Vec<Action> {
        self.sync();
        if !self.contains(source) {
            return Vec::new();
        }
        self.hover(pos, Some(source));
        vec![Action::RenderNeeded]
    }

    /// Record the pointer and the token under it. Returns whether the card
    /// moved, appeared, or disappeared.
    fn hover(&mut self, pos: Point, over: Option<TokenId>) -> bool {
        self.ui.last_pointer = pos;
        let changed = self.ui.active != over || over.is_some();
        if self.ui.active != over {
            trace!(?over, "active token changed");
            self.ui.active = over;
        }
        if changed {
            self.request_render();
        }
        changed
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    // --- Context menu ---

    /// Menu entries for a secondary click over `target` (or empty canvas).
    #[must_use]
    pub fn context_actions(&self, target: Option<TokenId>) -> Vec<ContextAction> {
        let mut actions = vec![ContextAction::AddTokenHere];
        if let Some(id) = target.filter(|id| self.contains(*id)) {
            actions.push(ContextAction::RemoveToken(id));
        }
        actions
    }

    /// Carry out a chosen context-menu entry for a click at `at`.
    pub fn apply_context_action(&mut self, action: ContextAction, at: Point) -> Vec<Action> {
        self.sync();
        match action {
            ContextAction::AddTokenHere => match self.add_token_here(at) {
                Ok(id) => vec![Action::TokenAdded { id }, Action::RenderNeeded],
                Err(_) => Vec::new(),
            },
            ContextAction::RemoveToken(id) => {
                if self.remove_token(id) {
                    vec![Action::TokenRemoved { id }, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Create a token from the template in the cell under `at`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DegenerateStep`] while the grid step is not
    /// positive; no token is created.
    pub fn add_token_here(&mut self, at: Point) -> Result<TokenId, GridError> {
        let cell = self
            .grid
            .cell_at(at)
            .inspect_err(|err| warn!(%err, x = at.x, y = at.y, "cannot place token"))?;
        Ok(self.add_token(Token::from_template(&self.template, cell)))
    }

    // --- Input ---

    /// Pointer pressed at canvas position `pos`. `click_count` is 2 for the
    /// second press of a double click.
    pub fn on_pointer_down(&mut self, pos: Point, button: Button, modifiers: Modifiers, click_count: u32) -> Vec<Action> {
        self.sync();
        let target = hit::hit_test(pos, &self.tokens, &self.grid);
        match button {
            Button::Secondary => vec![Action::ContextMenuRequested { at: pos, target }],
            Button::Middle => Vec::new(),
            Button::Primary => match target {
                Some(id) if click_count >= 2 => {
                    self.input = InputState::Idle;
                    vec![Action::EditTokenRequested { id }]
                }
                Some(id) => self.press_token(pos, id, modifiers),
                None => {
                    let additive = modifiers.extends_selection();
                    if !additive {
                        self.ui.selection.clear();
                    }
                    self.hover(pos, None);
                    self.input = InputState::Selecting { origin: pos, additive };
                    trace!(x = pos.x, y = pos.y, "marquee started");
                    self.request_render();
                    vec![Action::RenderNeeded]
                }
            },
        }
    }

    fn press_token(&mut self, pos: Point, id: TokenId, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.extends_selection() {
            self.ui.toggle(id);
        } else if !self.ui.is_selected(id) {
            self.ui.selection = vec![id];
        }
        self.hover(pos, Some(id));
        let mut actions = vec![Action::RenderNeeded];
        self.request_render();

        if !self.ui.is_selected(id) {
            self.input = InputState::Idle;
            return actions;
        }
        self.input = InputState::DraggingTokens { grabbed: id };
        trace!(%id, "drag started");
        self.set_cursor(CURSOR_GRABBING, &mut actions);
        actions
    }

    /// Pointer moved to canvas position `pos`.
    pub fn on_pointer_move(&mut self, pos: Point, _modifiers: Modifiers) -> Vec<Action> {
        self.sync();
        let mut actions = Vec::new();
        match self.input.clone() {
            InputState::DraggingTokens { grabbed } => {
                self.hover(pos, Some(grabbed));
                actions.push(Action::RenderNeeded);
                // Tokens are one cell, so the grabbed token follows the cell under the pointer.
                let Ok(target) = self.grid.cell_at(pos) else {
                    return actions;
                };
                let Some(current) = self.token(grabbed).map(Token::cell) else {
                    return actions;
                };
                let (dx, dy) = (target.x - current.x, target.y - current.y);
                if dx != 0 || dy != 0 {
                    actions.extend(self.shift_selection(dx, dy));
                }
            }
            InputState::Selecting { origin, .. } => {
                self.ui.marquee = Some(Rect::from_corners(origin, pos));
                self.hover(pos, None);
                self.request_render();
                actions.push(Action::RenderNeeded);
            }
            InputState::Idle => {
                let over = hit::hit_test(pos, &self.tokens, &self.grid);
                if self.hover(pos, over) {
                    actions.push(Action::RenderNeeded);
                }
                self.set_cursor(if over.is_some() { CURSOR_GRAB } else { CURSOR_DEFAULT }, &mut actions);
            }
        }
        actions
    }

    /// Pointer released at canvas position `pos`.
    pub fn on_pointer_up(&mut self, pos: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.sync();
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Selecting { origin, additive } => {
                let band = Rect::from_corners(origin, pos);
                self.ui.marquee = None;
                if band.width >= MARQUEE_MIN_PX || band.height >= MARQUEE_MIN_PX {
                    let hits = hit::tokens_in(band, &self.tokens, &self.grid);
                    trace!(count = hits.len(), "marquee selected");
                    if additive {
                        for id in hits {
                            self.ui.select(id);
                        }
                    } else {
                        self.ui.selection = hits;
                    }
                }
                self.request_render();
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingTokens { grabbed, .. } => {
                trace!(%grabbed, "drag finished");
                let over = hit::hit_test(pos, &self.tokens, &self.grid);
                self.set_cursor(if over.is_some() { CURSOR_GRAB } else { CURSOR_DEFAULT }, &mut actions);
                actions.push(Action::RenderNeeded);
            }
            InputState::Idle => {}
        }
        actions
    }

    /// Pointer left the canvas: hide the card.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.sync();
        let mut actions = Vec::new();
        if self.ui.active.take().is_some() {
            self.request_render();
            actions.push(Action::RenderNeeded);
        }
        self.set_cursor(CURSOR_DEFAULT, &mut actions);
        actions
    }

    /// Key pressed while the canvas has focus.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        self.sync();
        if key.is_delete() {
            let doomed = std::mem::take(&mut self.ui.selection);
            let mut actions: Vec<Action> = doomed
                .into_iter()
                .filter(|id| self.remove_token(*id))
                .map(|id| Action::TokenRemoved { id })
                .collect();
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }
        if key.is_escape() {
            self.ui.selection.clear();
            self.ui.marquee = None;
            self.input = InputState::Idle;
            self.request_render();
            return vec![Action::RenderNeeded];
        }
        if let Some((dx, dy)) = key.arrow_delta() {
            let mut actions = self.shift_selection(dx, dy);
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }
        Vec::new()
    }

    /// Move every selected token by whole cells and announce it.
    fn shift_selection(&mut self, dx: i32, dy: i32) -> Vec<Action> {
        let mut actions = Vec::new();
        for token in &mut self.tokens {
            if self.ui.selection.contains(&token.id()) {
                let cell = token.cell().offset(dx, dy);
                token.place(cell);
                actions.push(Action::TokenMoved { id: token.id(), cell });
            }
        }
        if !actions.is_empty() {
            self.emit_tokens_changed();
            self.request_render();
        }
        actions
    }

    // --- Frame ---

    /// Card for the active token at the last pointer position, if any.
    #[must_use]
    pub fn active_card(&self, measure: &impl TextMeasure) -> Option<InfoCard> {
        let id = self.ui.active?;
        self.token(id).map(|t| t.info_card(self.ui.last_pointer, measure))
    }

    /// Lay out the next frame. Pending token signals are applied first.
    pub fn scene(&mut self, measure: &impl TextMeasure) -> Scene {
        self.sync();
        scene::build(self, measure)
    }
}
