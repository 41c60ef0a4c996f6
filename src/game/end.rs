//! End-state presentation, reset and scene teardown.

use super::bricks::{Brick, BrickGrid};
use super::spawn::spawn_bricks;
use super::state::*;
use crate::config::GameConfig;
use crate::preload::GameAssets;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

type BallFilter = (With<Ball>, Without<RestartPrompt>, Without<LaunchPrompt>, Without<Paddle>);
type RestartFilter = (With<RestartPrompt>, Without<Ball>, Without<LaunchPrompt>);
type LaunchFilter = (With<LaunchPrompt>, Without<Ball>, Without<RestartPrompt>);

/// Freeze and hide the ball, show the banner and the restart prompt.
pub fn present_match_end(
    mut commands: Commands,
    mut ended: MessageReader<MatchEnded>,
    mut ball: Query<(Entity, &mut Velocity, &mut Visibility), BallFilter>,
    mut banner: Query<(&mut Text2d, &mut TextColor), With<GameOverText>>,
    mut restart_prompt: Query<&mut Visibility, RestartFilter>,
    mut launch_prompt: Query<&mut Visibility, LaunchFilter>,
) {
    for MatchEnded(outcome) in ended.read() {
        if let Ok((entity, mut velocity, mut visibility)) = ball.single_mut() {
            *velocity = Velocity::zero();
            *visibility = Visibility::Hidden;
            commands.entity(entity).insert(RigidBodyDisabled);
        }
        for (mut text, mut color) in banner.iter_mut() {
            text.0 = outcome.banner().to_string();
            *color = TextColor(outcome.banner_color());
        }
        for mut visibility in restart_prompt.iter_mut() {
            *visibility = Visibility::Visible;
        }
        for mut visibility in launch_prompt.iter_mut() {
            *visibility = Visibility::Hidden;
        }
        info!("[match] {}", outcome.banner());
    }
}

/// Put every entity and flag back to how [`super::spawn::spawn_match`] left them.
///
/// Acts only on a [`RestartRequested`] while the match is over.
#[allow(clippy::too_many_arguments)]
pub fn reset_match_system(
    mut commands: Commands,
    mut requests: MessageReader<RestartRequested>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    mut state: ResMut<MatchState>,
    mut grid: ResMut<BrickGrid>,
    bricks: Query<Entity, With<Brick>>,
    mut paddle: Query<&mut Transform, (With<Paddle>, Without<Ball>)>,
    mut ball: Query<(Entity, &mut Transform, &mut Velocity, &mut Visibility), BallFilter>,
    mut banner: Query<&mut Text2d, With<GameOverText>>,
    mut restart_prompt: Query<&mut Visibility, RestartFilter>,
    mut launch_prompt: Query<&mut Visibility, LaunchFilter>,
) {
    if requests.read().count() == 0 || !state.game_over() {
        return;
    }

    let field = config.field();
    state.reset();

    if let Ok(mut transform) = paddle.single_mut() {
        *transform = field.transform_at(config.paddle_start(), transform.translation.z);
    }

    if let Ok((entity, mut transform, mut velocity, mut visibility)) = ball.single_mut() {
        let pos = attached_ball_position(config.paddle_start(), config.ball_attach_offset);
        *transform = field.transform_at(pos, transform.translation.z);
        *velocity = Velocity::zero();
        *visibility = Visibility::Visible;
        commands.entity(entity).remove::<RigidBodyDisabled>();
    }

    for entity in bricks.iter() {
        commands.entity(entity).despawn();
    }
    grid.rebuild();
    spawn_bricks(&mut commands, &grid, field, assets.brick_image.as_ref());

    for mut text in banner.iter_mut() {
        text.0.clear();
    }
    for mut visibility in restart_prompt.iter_mut() {
        *visibility = Visibility::Hidden;
    }
    for mut visibility in launch_prompt.iter_mut() {
        *visibility = Visibility::Visible;
    }

    info!(
        "[match] reset, {}/{} bricks standing",
        grid.active_count(),
        grid.cells().len()
    );
}

// ── OnExit(Match) ─────────────────────────────────────────────────────────────

/// Despawn every match entity and drop the per-match resources.
pub fn cleanup_match(mut commands: Commands, query: Query<Entity, With<MatchScoped>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<BrickGrid>();
    commands.remove_resource::<MatchState>();
    commands.remove_resource::<MatchInput>();
}
