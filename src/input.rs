//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `UiState` is the hover/selection state the renderer reads. `InputState`
//! is the gesture in progress between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Rect};
use crate::token::TokenId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether a click should add to (or toggle within) the selection rather than replace it.
    #[must_use]
    pub fn extends_selection(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    /// Right button; opens the context menu.
    Secondary,
}

/// A keyboard key name as reported by the host (e.g. `"Delete"`, `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Cell delta for arrow keys.
    #[must_use]
    pub fn arrow_delta(&self) -> Option<(i32, i32)> {
        match self.0.as_str() {
            "ArrowLeft" => Some((-1, 0)),
            "ArrowRight" => Some((1, 0)),
            "ArrowUp" => Some((0, -1)),
            "ArrowDown" => Some((0, 1)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Hover and selection state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Token whose info card is shown. Always names a token on the map.
    pub active: Option<TokenId>,
    /// Last pointer position in canvas pixels; the card anchor.
    pub last_pointer: Point,
    /// Selected tokens, in selection order.
    pub selection: Vec<TokenId>,
    /// Rubber band being dragged, if any.
    pub marquee: Option<Rect>,
}

impl UiState {
    #[must_use]
    pub fn is_selected(&self, id: TokenId) -> bool {
        self.selection.contains(&id)
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: TokenId) {
        if let Some(pos) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id);
        }
    }

    /// Add `id` unless it is already selected.
    pub fn select(&mut self, id: TokenId) {
        if !self.is_selected(id) {
            self.selection.push(id);
        }
    }

    /// Drop every reference to a token that is leaving the map.
    pub fn forget(&mut self, id: TokenId) {
        if self.active == Some(id) {
            self.active = None;
        }
        self.selection.retain(|s| *s != id);
    }
}

/// The gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving the selected tokens by dragging one of them.
    DraggingTokens {
        /// Token under the pointer when the drag began. Its current cell is
        /// the reference for every step, so nudges and edits mid-drag stay
        /// consistent with the pointer.
        grabbed: TokenId,
    },
    /// Dragging a rubber band from `origin`.
    Selecting {
        origin: Point,
        /// Whether the final hits are added to the existing selection.
        additive: bool,
    },
}
