//! Game-specific error types.
//!
//! Configuration loading and the preload scene report failures through
//! [`GameError`]; gameplay systems never produce errors and simply skip work
//! when an expected entity is missing.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    /// A configuration value is outside the range the game can work with.
    InvalidConfig {
        /// Name of the offending field (for logging).
        field: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// An asset finished loading in a failed state.
    AssetLoad { path: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "failed to parse config '{}': {}", path, source)
            }
            GameError::InvalidConfig {
                field,
                value,
                expected,
            } => write!(
                f,
                "config field '{}' = {} is invalid (expected {})",
                field, value, expected
            ),
            GameError::AssetLoad { path } => write!(f, "asset '{}' failed to load", path),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(field: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value: value.to_string(),
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(field: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value: value.to_string(),
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error if a grid dimension is zero.
pub fn require_nonzero_count(field: &'static str, value: usize) -> GameResult<()> {
    if value == 0 {
        Err(GameError::InvalidConfig {
            field,
            value: value.to_string(),
            expected: "at least 1",
        })
    } else {
        Ok(())
    }
}
