//! Shared constants for the map crate.

// ── Grid ────────────────────────────────────────────────────────

/// Default pixel size of one grid cell.
pub const DEFAULT_GRID_STEP: f64 = 20.0;

/// Upper bound on lines drawn per axis in one frame.
pub const MAX_GRID_LINES: usize = 4096;

// ── Token defaults ──────────────────────────────────────────────

/// Edge length of a freshly constructed token, before layout overrides it.
pub const DEFAULT_TOKEN_SIZE: i32 = 80;

pub const DEFAULT_TOKEN_NAME: &str = "Jeff";

pub const DEFAULT_MAX_HITPOINTS: i32 = 10;

pub const DEFAULT_CURRENT_HITPOINTS: i32 = 8;

pub const DEFAULT_CONDITIONS: [&str; 2] = ["Charmed", "Invisible"];

// ── Info card ───────────────────────────────────────────────────

/// Font size of card text, in pixels.
pub const CARD_FONT_PX: f64 = 12.0;

/// Baseline-to-baseline distance between card rows.
pub const CARD_LINE_HEIGHT: f64 = 16.0;

/// Gap between a row's baseline and the bottom of its line box, leaving room
/// for descenders.
pub const CARD_BASELINE_DESCENT: f64 = 4.0;

/// Inner padding between the card border and its text.
pub const CARD_PADDING: f64 = 6.0;

/// Distance from the pointer to the card's top-left corner.
pub const CARD_POINTER_GAP: f64 = 12.0;

/// Narrowest card, even for very short names.
pub const CARD_MIN_WIDTH: f64 = 80.0;

/// Advance per character used by [`crate::card::FixedAdvance`].
pub const FALLBACK_CHAR_ADVANCE: f64 = 7.0;

// ── Selection ───────────────────────────────────────────────────

/// Selection outline dash length in pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;

/// Below this drag distance a rubber band counts as a plain click.
pub const MARQUEE_MIN_PX: f64 = 2.0;
