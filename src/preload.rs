//! Preload scene. Requests the game's assets and hands off to the match.
//!
//! ## Flow
//!
//! 1. `OnEnter(Preload)`: [`start_asset_loading`] asks the `AssetServer` for
//!    the ball image, brick image and hit sound named in [`GameConfig`], and
//!    shows a "Loading..." label.
//! 2. `Update`: [`poll_asset_loading`] classifies each handle.  While any is
//!    still pending nothing happens.
//! 3. Once all are settled, the loaded handles are published as
//!    [`GameAssets`] and the scene switches to [`GameScene::Match`].
//! 4. `OnExit(Preload)`: the label and the pending handles are dropped.
//!
//! ## Failed assets
//!
//! By default a failed asset degrades the game instead of stopping it: a
//! missing image becomes a flat coloured sprite, a missing sound is skipped.
//! With `strict_assets = true` the failure is logged as an error and the app
//! exits with a non-zero code.

use crate::config::GameConfig;
use crate::constants::LOADING_FONT_SIZE;
use crate::error::GameError;
use crate::scene::{GameScene, Scene};
use bevy::asset::LoadState;
use bevy::prelude::*;

// ── Resources & components ────────────────────────────────────────────────────

/// Handles the match scene draws from.  `None` means the asset failed to
/// load and the match uses its fallback.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameAssets {
    pub ball_image: Option<Handle<Image>>,
    pub brick_image: Option<Handle<Image>>,
    pub hit_sound: Option<Handle<AudioSource>>,
}

/// Handles requested on entry, kept alive until loading settles.
#[derive(Resource, Debug, Clone)]
pub struct PendingAssets {
    pub ball_image: Handle<Image>,
    pub brick_image: Handle<Image>,
    pub hit_sound: Handle<AudioSource>,
}

/// The "Loading..." label.
#[derive(Component)]
pub struct LoadingText;

// ── Load classification ───────────────────────────────────────────────────────

/// Coarse state of one requested asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

impl AssetStatus {
    pub fn from_load_state(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => AssetStatus::Loaded,
            Some(LoadState::Failed(_)) => AssetStatus::Failed,
            _ => AssetStatus::Pending,
        }
    }
}

/// Progress over a set of requested assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadProgress {
    /// At least one asset is still loading.
    Loading,
    /// Every asset settled; `failed` lists the indices that did not load.
    Complete { failed: Vec<usize> },
}

impl LoadProgress {
    pub fn assess(statuses: &[AssetStatus]) -> Self {
        if statuses.contains(&AssetStatus::Pending) {
            return LoadProgress::Loading;
        }
        let failed = statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == AssetStatus::Failed)
            .map(|(i, _)| i)
            .collect();
        LoadProgress::Complete { failed }
    }
}

fn keep_if_loaded<A: Asset>(handle: &Handle<A>, status: AssetStatus) -> Option<Handle<A>> {
    (status == AssetStatus::Loaded).then(|| handle.clone())
}

impl GameAssets {
    /// Publish the handles of `pending` whose status (in field order: ball,
    /// brick, sound) is `Loaded`.
    pub fn from_pending(pending: &PendingAssets, statuses: [AssetStatus; 3]) -> Self {
        Self {
            ball_image: keep_if_loaded(&pending.ball_image, statuses[0]),
            brick_image: keep_if_loaded(&pending.brick_image, statuses[1]),
            hit_sound: keep_if_loaded(&pending.hit_sound, statuses[2]),
        }
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Scene active from startup until every asset has settled.
pub struct PreloadScene;

impl Scene for PreloadScene {
    const STATE: GameScene = GameScene::Preload;

    fn register(app: &mut App) {
        app.init_resource::<GameAssets>();
    }

    fn on_enter(app: &mut App) {
        app.add_systems(OnEnter(Self::STATE), start_asset_loading);
    }

    fn on_frame(app: &mut App) {
        app.add_systems(Update, poll_asset_loading.run_if(in_state(Self::STATE)));
    }

    fn on_exit(app: &mut App) {
        app.add_systems(OnExit(Self::STATE), cleanup_preload);
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Request every asset and show the loading label.
pub fn start_asset_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    commands.insert_resource(PendingAssets {
        ball_image: asset_server.load(config.ball_image.clone()),
        brick_image: asset_server.load(config.brick_image.clone()),
        hit_sound: asset_server.load(config.hit_sound.clone()),
    });
    commands.spawn((
        LoadingText,
        Text2d::new("Loading..."),
        TextFont::from_font_size(LOADING_FONT_SIZE),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
    info!(
        "[preload] requested {}, {}, {}",
        config.ball_image, config.brick_image, config.hit_sound
    );
}

/// Wait for every asset to settle, then publish [`GameAssets`] and start the match.
pub fn poll_asset_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Res<PendingAssets>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameScene>>,
    mut exit: MessageWriter<AppExit>,
) {
    let statuses = [
        AssetStatus::from_load_state(asset_server.get_load_state(pending.ball_image.id())),
        AssetStatus::from_load_state(asset_server.get_load_state(pending.brick_image.id())),
        AssetStatus::from_load_state(asset_server.get_load_state(pending.hit_sound.id())),
    ];
    let LoadProgress::Complete { failed } = LoadProgress::assess(&statuses) else {
        return;
    };

    let paths = [&config.ball_image, &config.brick_image, &config.hit_sound];
    let errors: Vec<GameError> = failed
        .iter()
        .map(|&i| GameError::AssetLoad {
            path: paths[i].clone(),
        })
        .collect();

    if config.strict_assets && !errors.is_empty() {
        for e in &errors {
            error!("[preload] {e}");
        }
        exit.write(AppExit::error());
        return;
    }
    for e in &errors {
        warn!("[preload] {e}; continuing with a fallback");
    }

    commands.insert_resource(GameAssets::from_pending(&pending, statuses));
    next_state.set(GameScene::Match);
    info!("[preload] complete ({} missing)", errors.len());
}

/// Remove the loading label and drop the pending handles.
pub fn cleanup_preload(mut commands: Commands, query: Query<Entity, With<LoadingText>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<PendingAssets>();
}
