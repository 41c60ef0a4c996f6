//! Top-level scene state machine and the [`Scene`] capability contract.
//!
//! ## States
//!
//! | State     | Description                                   |
//! |-----------|-----------------------------------------------|
//! | `Preload` | Initial state; assets requested, "Loading..." |
//! | `Match`   | Paddle, ball and bricks live; runs until exit |
//!
//! Each state is owned by exactly one [`Scene`] implementation.  A scene only
//! registers systems against its own state, so the host loop switches scenes
//! by setting `NextState<GameScene>` and nothing else.

use bevy::prelude::*;
use std::marker::PhantomData;

/// Top-level application state.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameScene {
    /// Asset loading; shown on startup.
    #[default]
    Preload,
    /// Active match.
    Match,
}

/// Lifecycle hooks every scene provides.
///
/// Implementations add their systems to `OnEnter(Self::STATE)`, to `Update`
/// gated by `in_state(Self::STATE)`, and to `OnExit(Self::STATE)`.
pub trait Scene: Send + Sync + 'static {
    /// The state this scene is active in.
    const STATE: GameScene;

    /// Resources and messages the scene needs regardless of the active state.
    fn register(_app: &mut App) {}

    /// Systems run once when the scene becomes active.
    fn on_enter(app: &mut App);

    /// Systems run every frame while the scene is active.
    fn on_frame(app: &mut App);

    /// Systems run once when the scene is left.
    fn on_exit(app: &mut App);
}

/// Installs one [`Scene`] into the app.
pub struct ScenePlugin<S: Scene>(PhantomData<S>);

impl<S: Scene> Default for ScenePlugin<S> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<S: Scene> Plugin for ScenePlugin<S> {
    fn build(&self, app: &mut App) {
        S::register(app);
        S::on_enter(app);
        S::on_frame(app);
        S::on_exit(app);
    }
}
