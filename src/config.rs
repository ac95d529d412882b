//! Initial map settings, from JSON or from the environment.
//!
//! Every field has a default, so `{}` is a valid configuration. Environment
//! overrides follow the same "unset or unparsable means default" rule.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::DEFAULT_GRID_STEP;
use crate::grid::Grid;
use crate::token::TokenTemplate;

/// Errors loading a [`MapConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document is malformed or a field has the wrong type.
    #[error("invalid map config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Initial grid parameters and the template for tokens created by the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub grid_step: f64,
    pub grid_h_offset: i32,
    pub grid_v_offset: i32,
    pub grid_color: Rgb,
    pub token: TokenTemplate,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            grid_h_offset: 0,
            grid_v_offset: 0,
            grid_color: Rgb::WHITE,
            token: TokenTemplate::default(),
        }
    }
}

impl MapConfig {
    /// Parse a JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields
    /// (including colors that are not `#rrggbb` / `#rgb`).
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by environment variables:
    ///
    /// - `GAMEMAP_GRID_STEP` (default 20)
    /// - `GAMEMAP_GRID_H_OFFSET`, `GAMEMAP_GRID_V_OFFSET` (default 0)
    /// - `GAMEMAP_GRID_COLOR` as `#rrggbb` (default white)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Like [`MapConfig::from_env`] but reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Self {
        let defaults = Self::default();
        Self {
            grid_step: parse_or(&lookup, "GAMEMAP_GRID_STEP", defaults.grid_step),
            grid_h_offset: parse_or(&lookup, "GAMEMAP_GRID_H_OFFSET", defaults.grid_h_offset),
            grid_v_offset: parse_or(&lookup, "GAMEMAP_GRID_V_OFFSET", defaults.grid_v_offset),
            grid_color: parse_or(&lookup, "GAMEMAP_GRID_COLOR", defaults.grid_color),
            token: defaults.token,
        }
    }

    /// The grid these settings describe.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid {
            step: self.grid_step,
            h_offset: self.grid_h_offset,
            v_offset: self.grid_v_offset,
            color: self.grid_color,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Result<String, VarError>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match lookup(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, %raw, "ignoring unparsable map setting");
                default
            }
        },
        Err(_) => default,
    }
}
