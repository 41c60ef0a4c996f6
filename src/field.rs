//! Field ↔ world coordinate conversion.
//!
//! Gameplay rules are written in field coordinates: origin at the top-left
//! corner, x to the right, y downward, one unit per pixel.  Bevy's 2D world
//! has its origin at the window centre with y upward.  Rapier runs with
//! `pixels_per_meter(1.0)`, so the two spaces differ only by a translation and
//! a y flip.

use bevy::prelude::*;

/// Size of the rectangular play field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Field position → world position.
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// World position → field position.
    pub fn to_field(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// Field velocity → world velocity.
    pub fn velocity_to_world(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }

    /// World velocity → field velocity.
    pub fn velocity_to_field(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }

    /// Transform placing an entity at field position `p` on layer `z`.
    pub fn transform_at(&self, p: Vec2, z: f32) -> Transform {
        Transform::from_translation(self.to_world(p).extend(z))
    }
}
