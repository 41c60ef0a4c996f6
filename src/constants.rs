//! Centralised gameplay constants.
//!
//! These are the compiled defaults behind [`crate::config::GameConfig`].
//! Every value can be overridden from `assets/game.toml` without recompiling.
//!
//! Positions and speeds are in *field* units: pixels, origin at the top-left
//! corner of the play field, y growing downward.

// ── Field ─────────────────────────────────────────────────────────────────────

/// Width of the play field (and of the window).
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the play field (and of the window).
pub const FIELD_HEIGHT: f32 = 600.0;

/// Thickness of the invisible wall colliders placed just outside the field.
pub const WALL_THICKNESS: f32 = 20.0;

// ── Paddle ────────────────────────────────────────────────────────────────────

/// Horizontal paddle movement per frame while an arrow key is held.
pub const PADDLE_SPEED: f32 = 8.0;

pub const PADDLE_WIDTH: f32 = 120.0;
pub const PADDLE_HEIGHT: f32 = 20.0;

/// Paddle centre y; the paddle never leaves this row.
pub const PADDLE_Y: f32 = 550.0;

// ── Ball ──────────────────────────────────────────────────────────────────────

/// Ball speed in pixels per second.
///
/// Launch velocity is `(BALL_SPEED, −BALL_SPEED)`; a paddle hit rewrites only
/// the horizontal component.
pub const BALL_SPEED: f32 = 240.0;

/// Displayed diameter of the ball sprite and its collider.
pub const BALL_SIZE: f32 = 30.0;

/// Vertical distance between paddle centre and ball centre while attached.
pub const BALL_ATTACH_OFFSET: f32 = 30.0;

// ── Bricks ────────────────────────────────────────────────────────────────────

pub const BRICK_ROWS: usize = 5;
pub const BRICK_COLS: usize = 10;

/// Gap between neighbouring bricks and between the outer bricks and the
/// field's side edges.
pub const BRICK_SPACING: f32 = 5.0;

pub const BRICK_HEIGHT: f32 = 30.0;

/// Distance from the top of the field to the top edge of the first row.
pub const BRICK_TOP: f32 = 80.0;

// ── Assets ────────────────────────────────────────────────────────────────────

pub const BALL_IMAGE_PATH: &str = "nugget.png";
pub const BRICK_IMAGE_PATH: &str = "burger_brick.png";
pub const HIT_SOUND_PATH: &str = "fart.ogg";

// ── Overlay text ──────────────────────────────────────────────────────────────

pub const LOADING_FONT_SIZE: f32 = 32.0;
pub const GAME_OVER_FONT_SIZE: f32 = 72.0;
pub const PROMPT_FONT_SIZE: f32 = 36.0;

/// Vertical placement of the centred overlays, as a fraction of field height.
pub const GAME_OVER_TEXT_ROW: f32 = 0.5;
pub const RESTART_TEXT_ROW: f32 = 0.6;
pub const LAUNCH_TEXT_ROW: f32 = 0.75;
