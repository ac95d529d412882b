//! Player tokens: the colored tiles placed on the map.
//!
//! A [`Token`] is a plain mutable record. Its grid [`Cell`] is the only
//! positional state it carries; pixel geometry is derived by the map on every
//! frame. Once attached to a map, every mutator also posts a [`TokenSignal`]
//! on the map's channel so the map can re-broadcast an aggregate change
//! before the next frame.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{InfoCard, TextMeasure};
use crate::color::Rgb;
use crate::consts::{
    DEFAULT_CONDITIONS, DEFAULT_CURRENT_HITPOINTS, DEFAULT_MAX_HITPOINTS, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_SIZE,
};
use crate::geom::Point;
use crate::grid::Cell;

/// Unique identifier for a token.
pub type TokenId = Uuid;

/// Notification a token posts to its owning map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSignal {
    /// Some field changed.
    Updated(TokenId),
    /// The token asks to be removed from the map.
    DeleteRequested(TokenId),
}

/// Field values for newly created tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenTemplate {
    pub size: i32,
    pub color: Rgb,
    pub name: String,
    pub max_hitpoints: i32,
    pub current_hitpoints: i32,
    pub conditions: Vec<String>,
}

impl Default for TokenTemplate {
    fn default() -> Self {
        Self {
            size: DEFAULT_TOKEN_SIZE,
            color: Rgb::BLACK,
            name: DEFAULT_TOKEN_NAME.to_string(),
            max_hitpoints: DEFAULT_MAX_HITPOINTS,
            current_hitpoints: DEFAULT_CURRENT_HITPOINTS,
            conditions: DEFAULT_CONDITIONS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// A player token.
#[derive(Debug)]
pub struct Token {
    id: TokenId,
    cell: Cell,
    size: i32,
    color: Rgb,
    name: String,
    max_hitpoints: i32,
    current_hitpoints: i32,
    conditions: Vec<String>,
    link: Option<Sender<TokenSignal>>,
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl Token {
    /// A token at cell `(0, 0)` with the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::from_template(&TokenTemplate::default(), Cell::default())
    }

    /// A default token at `cell`.
    #[must_use]
    pub fn at(cell: Cell) -> Self {
        Self::from_template(&TokenTemplate::default(), cell)
    }

    #[must_use]
    pub fn from_template(template: &TokenTemplate, cell: Cell) -> Self {
        Self {
            id: Uuid::new_v4(),
            cell,
            size: template.size,
            color: template.color,
            name: template.name.clone(),
            max_hitpoints: template.max_hitpoints,
            current_hitpoints: template.current_hitpoints,
            conditions: template.conditions.clone(),
            link: None,
        }
    }

    // --- Map linkage ---

    /// Connect this token to its owning map's signal channel.
    pub(crate) fn attach(&mut self, link: Sender<TokenSignal>) {
        self.link = Some(link);
    }

    /// Whether the token is owned by a map.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    /// Ask the owning map to remove this token. Does nothing when detached.
    pub fn request_delete(&mut self) {
        self.post(TokenSignal::DeleteRequested(self.id));
    }

    fn touch(&mut self) {
        self.post(TokenSignal::Updated(self.id));
    }

    fn post(&mut self, signal: TokenSignal) {
        if let Some(link) = &self.link {
            if link.send(signal).is_err() {
                // Receiver gone: the map was dropped while a handle survived.
                self.link = None;
            }
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.cell.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.cell.y
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn max_hitpoints(&self) -> i32 {
        self.max_hitpoints
    }

    #[must_use]
    pub fn current_hitpoints(&self) -> i32 {
        self.current_hitpoints
    }

    #[must_use]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    // --- Mutators ---

    pub fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
        self.touch();
    }

    /// Move without signalling; for moves the map makes and announces itself.
    pub(crate) fn place(&mut self, cell: Cell) {
        self.cell = cell;
    }

    pub fn set_x(&mut self, x: i32) {
        self.cell.x = x;
        self.touch();
    }

    pub fn set_y(&mut self, y: i32) {
        self.cell.y = y;
        self.touch();
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size;
        self.touch();
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.touch();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_max_hitpoints(&mut self, max_hitpoints: i32) {
        self.max_hitpoints = max_hitpoints;
        self.touch();
    }

    /// No clamping against `max_hitpoints`; overheal and negative values are kept.
    pub fn set_current_hitpoints(&mut self, current_hitpoints: i32) {
        self.current_hitpoints = current_hitpoints;
        self.touch();
    }

    pub fn set_conditions(&mut self, conditions: Vec<String>) {
        self.conditions = conditions;
        self.touch();
    }

    // --- Overlay ---

    /// Lay out this token's info card with its top-left near `anchor`.
    ///
    /// The returned card's `rect` is in the same space as `anchor` (canvas pixels).
    #[must_use]
    pub fn info_card(&self, anchor: Point, measure: &impl TextMeasure) -> InfoCard {
        InfoCard::layout(self, anchor, measure)
    }
}
