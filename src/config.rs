//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  `main` calls [`GameConfig::load_or_default`] before
//! the app is built, so the window size and the preload scene already see the
//! final values.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about:
//!
//! ```toml
//! brick_rows = 3
//! ball_speed = 300.0
//! strict_assets = true
//! ```

use crate::constants::*;
use crate::error::{
    require_non_negative, require_nonzero_count, require_positive, GameError, GameResult,
};
use crate::field::Field;
use crate::game::bricks::BrickLayout;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Field ────────────────────────────────────────────────────────────────
    pub field_width: f32,
    pub field_height: f32,

    // ── Paddle ───────────────────────────────────────────────────────────────
    pub paddle_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_y: f32,

    // ── Ball ─────────────────────────────────────────────────────────────────
    pub ball_speed: f32,
    pub ball_size: f32,
    pub ball_attach_offset: f32,

    // ── Bricks ───────────────────────────────────────────────────────────────
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_spacing: f32,
    pub brick_height: f32,
    pub brick_top: f32,

    // ── Assets ───────────────────────────────────────────────────────────────
    pub ball_image: String,
    pub brick_image: String,
    pub hit_sound: String,
    /// Abort startup when any asset fails to load instead of falling back to
    /// plain sprites and silence.
    pub strict_assets: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,
            ball_speed: BALL_SPEED,
            ball_size: BALL_SIZE,
            ball_attach_offset: BALL_ATTACH_OFFSET,
            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_spacing: BRICK_SPACING,
            brick_height: BRICK_HEIGHT,
            brick_top: BRICK_TOP,
            ball_image: BALL_IMAGE_PATH.to_string(),
            brick_image: BRICK_IMAGE_PATH.to_string(),
            hit_sound: HIT_SOUND_PATH.to_string(),
            strict_assets: false,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|source| GameError::ConfigParse {
                path: path.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the configuration at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Option<Self>> {
        let path = path.as_ref();
        let display = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&display, &contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::ConfigRead {
                path: display,
                source,
            }),
        }
    }

    /// Load `path`, falling back to compiled defaults on any problem.
    ///
    /// Runs before Bevy's log plugin exists, so it reports on stdout/stderr.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(Some(config)) => {
                println!("✓ Loaded game config from {}", path.display());
                config
            }
            Ok(None) => {
                println!("ℹ No {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                eprintln!("⚠ {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Reject values the match cannot be built from.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        require_positive("paddle_speed", self.paddle_speed)?;
        require_positive("paddle_width", self.paddle_width)?;
        require_positive("paddle_height", self.paddle_height)?;
        require_positive("ball_speed", self.ball_speed)?;
        require_positive("ball_size", self.ball_size)?;
        require_non_negative("ball_attach_offset", self.ball_attach_offset)?;
        require_nonzero_count("brick_rows", self.brick_rows)?;
        require_nonzero_count("brick_cols", self.brick_cols)?;
        require_non_negative("brick_spacing", self.brick_spacing)?;
        require_positive("brick_height", self.brick_height)?;
        require_non_negative("brick_top", self.brick_top)?;

        if self.paddle_width > self.field_width {
            return Err(GameError::InvalidConfig {
                field: "paddle_width",
                value: self.paddle_width.to_string(),
                expected: "no wider than field_width",
            });
        }
        if !(0.0..=self.field_height).contains(&self.paddle_y) {
            return Err(GameError::InvalidConfig {
                field: "paddle_y",
                value: self.paddle_y.to_string(),
                expected: "inside [0, field_height]",
            });
        }
        require_positive("brick width", self.brick_layout().brick_size().x)
    }

    /// The play field described by this configuration.
    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    /// The brick grid geometry described by this configuration.
    pub fn brick_layout(&self) -> BrickLayout {
        BrickLayout {
            rows: self.brick_rows,
            cols: self.brick_cols,
            spacing: self.brick_spacing,
            field_width: self.field_width,
            brick_height: self.brick_height,
            top: self.brick_top,
        }
    }

    /// Paddle centre at the start of every match (field coordinates).
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.paddle_y)
    }

    pub fn paddle_half_width(&self) -> f32 {
        self.paddle_width / 2.0
    }
}
