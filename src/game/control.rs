//! Per-frame match logic.
//!
//! ## Pipeline (steps 2 to 4 run after the collision handlers every frame)
//!
//! 1. [`keyboard_to_match_input`]: translates arrow keys / Space into [`MatchInput`].
//! 2. [`paddle_movement_system`]: moves and clamps the paddle.
//! 3. [`ball_attach_system`]: keeps an unlaunched ball on the paddle; launches it.
//! 4. [`restart_input_system`]: in an end state, turns Space into [`RestartRequested`].
//!
//! Steps 2 and 3 do nothing once the match is over; step 4 does nothing
//! while it is running.

use super::state::*;
use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Read the keyboard into [`MatchInput`].
///
/// - **←** held → `left`
/// - **→** held → `right`
/// - **Space** pressed this frame → `launch_pressed`
pub fn keyboard_to_match_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<MatchInput>) {
    *input = MatchInput {
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
        launch_pressed: keys.just_pressed(KeyCode::Space),
    };
}

/// Move the paddle by `paddle_speed` toward the held arrow key.
///
/// The kinematic body follows the `Transform`, so writing the translation is
/// enough to move the collider.
pub fn paddle_movement_system(
    config: Res<GameConfig>,
    state: Res<MatchState>,
    input: Res<MatchInput>,
    mut paddle: Query<&mut Transform, With<Paddle>>,
) {
    if state.game_over() {
        return;
    }
    let Ok(mut transform) = paddle.single_mut() else {
        return;
    };
    let field = config.field();
    let pos = field.to_field(transform.translation.truncate());
    let x = step_paddle_x(
        pos.x,
        &input,
        config.paddle_speed,
        config.paddle_half_width(),
        config.field_width,
    );
    if x != pos.x {
        transform.translation.x = field.to_world(Vec2::new(x, pos.y)).x;
    }
}

/// Hold an unlaunched ball above the paddle and launch it on Space.
pub fn ball_attach_system(
    config: Res<GameConfig>,
    mut state: ResMut<MatchState>,
    input: Res<MatchInput>,
    paddle: Query<&Transform, (With<Paddle>, Without<Ball>)>,
    mut ball: Query<(&mut Transform, &mut Velocity), (With<Ball>, Without<Paddle>)>,
    mut launch_prompt: Query<&mut Visibility, With<LaunchPrompt>>,
) {
    if state.game_over() || state.ball_launched() {
        return;
    }
    let (Ok(paddle), Ok((mut transform, mut velocity))) = (paddle.single(), ball.single_mut())
    else {
        return;
    };

    let field = config.field();
    let paddle_pos = field.to_field(paddle.translation.truncate());
    let world = field.to_world(attached_ball_position(
        paddle_pos,
        config.ball_attach_offset,
    ));
    transform.translation.x = world.x;
    transform.translation.y = world.y;
    *velocity = Velocity::zero();

    if input.launch_pressed && state.launch() {
        velocity.linvel = field.velocity_to_world(launch_velocity(config.ball_speed));
        for mut visibility in launch_prompt.iter_mut() {
            *visibility = Visibility::Hidden;
        }
        info!("[match] ball launched from x = {:.1}", paddle_pos.x);
    }
}

/// Ask for a reset when Space is pressed in an end state.
pub fn restart_input_system(
    state: Res<MatchState>,
    input: Res<MatchInput>,
    mut restart: MessageWriter<RestartRequested>,
) {
    if state.game_over() && input.launch_pressed {
        restart.write(RestartRequested);
    }
}
