//! Nugget Breakout
//!
//! A paddle, a nugget-shaped ball and a wall of burger bricks.  Rendering,
//! physics, input and audio come from Bevy and Rapier; this crate holds the
//! scene lifecycle and the match rules.

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod game;
pub mod graphics;
pub mod preload;
pub mod scene;
