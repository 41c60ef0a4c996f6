//! The match scene: paddle, ball, bricks, win/lose and restart.
//!
//! ## Systems (registered by [`MatchScene`])
//!
//! | System                          | Schedule          | Purpose                          |
//! |---------------------------------|-------------------|----------------------------------|
//! | `spawn_match`                   | `OnEnter(Match)`  | Build a fresh match              |
//! | `keyboard_to_match_input`       | `Update`          | Keyboard → [`MatchInput`]        |
//! | `ball_paddle_collision_system`  | `Update`          | Sound + deflection               |
//! | `ball_brick_collision_system`   | `Update`          | Disable brick, detect win        |
//! | `ball_out_of_bounds_system`     | `Update`          | Detect loss                      |
//! | `present_match_end`             | `Update`          | Freeze ball, show banner         |
//! | `paddle_movement_system`        | `Update`          | Arrow-key paddle movement        |
//! | `ball_attach_system`            | `Update`          | Ride on paddle, launch on Space  |
//! | `restart_input_system`          | `Update`          | Space in end state → restart     |
//! | `reset_match_system`            | `Update`          | Rebuild the fresh-match state    |
//! | `cleanup_match`                 | `OnExit(Match)`   | Despawn everything               |
//!
//! All `Update` systems run chained in the order above and only in
//! [`GameScene::Match`].

pub mod bricks;
pub mod collision;
pub mod control;
pub mod end;
pub mod spawn;
pub mod state;

pub use bricks::{Brick, BrickCell, BrickGrid, BrickLayout};
pub use state::*;

use crate::scene::{GameScene, Scene};
use bevy::prelude::*;

/// Scene that owns one match from `OnEnter(Match)` until the app closes.
pub struct MatchScene;

impl Scene for MatchScene {
    const STATE: GameScene = GameScene::Match;

    fn register(app: &mut App) {
        app.add_message::<MatchEnded>()
            .add_message::<RestartRequested>();
    }

    fn on_enter(app: &mut App) {
        app.add_systems(OnEnter(Self::STATE), spawn::spawn_match);
    }

    fn on_frame(app: &mut App) {
        app.add_systems(
            Update,
            (
                control::keyboard_to_match_input,
                collision::ball_paddle_collision_system,
                collision::ball_brick_collision_system,
                collision::ball_out_of_bounds_system,
                end::present_match_end,
                control::paddle_movement_system,
                control::ball_attach_system,
                control::restart_input_system,
                end::reset_match_system,
            )
                .chain()
                .run_if(in_state(Self::STATE)),
        );
    }

    fn on_exit(app: &mut App) {
        app.add_systems(OnExit(Self::STATE), end::cleanup_match);
    }
}
