//! Configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use crate::layout::{GridSpec, LayoutConfig, LayoutPolicy};
use crate::model::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown FLOWGRAM_LAYOUT: {0} (expected 'grid' or 'preserve')")]
    UnknownLayout(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Config {
    pub layout: LayoutConfig,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `FLOWGRAM_LAYOUT`: `grid` (default) or `preserve`
    /// - `FLOWGRAM_GRID_COLUMNS`: default 3
    /// - `FLOWGRAM_COLUMN_WIDTH`: default 250
    /// - `FLOWGRAM_ROW_HEIGHT`: default 150
    /// - `FLOWGRAM_MARGIN`: default 100
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLayout`] for an unrecognized layout name.
    /// Malformed numbers fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let policy = match lookup("FLOWGRAM_LAYOUT") {
            Some(raw) => LayoutPolicy::from_name(&raw).ok_or(ConfigError::UnknownLayout(raw))?,
            None => LayoutPolicy::default(),
        };

        let defaults = GridSpec::default();
        let margin = parse_or("FLOWGRAM_MARGIN", lookup("FLOWGRAM_MARGIN"), defaults.origin.x);
        let grid = GridSpec {
            columns: parse_or("FLOWGRAM_GRID_COLUMNS", lookup("FLOWGRAM_GRID_COLUMNS"), defaults.columns).max(1),
            column_width: parse_or("FLOWGRAM_COLUMN_WIDTH", lookup("FLOWGRAM_COLUMN_WIDTH"), defaults.column_width),
            row_height: parse_or("FLOWGRAM_ROW_HEIGHT", lookup("FLOWGRAM_ROW_HEIGHT"), defaults.row_height),
            origin: Position::new(margin, margin),
        };

        Ok(Self { layout: LayoutConfig { policy, grid } })
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring malformed config value");
            default
        }
    }
}
