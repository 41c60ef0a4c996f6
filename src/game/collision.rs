//! Collision responses, driven by Rapier's [`CollisionEvent`] messages.
//!
//! Rapier steps in `PostUpdate`; the messages it writes are read here at the
//! start of the next `Update`, before paddle movement and launch logic, so
//! every frame sees settled brick and end-state bookkeeping.
//!
//! | Pair                    | Response                                        |
//! |-------------------------|-------------------------------------------------|
//! | ball ↔ paddle           | sound, horizontal deflection                    |
//! | ball ↔ brick            | brick disabled; last brick wins the match       |
//! | ball ↔ bottom sensor    | match lost (once)                               |
//!
//! Only `Started` events matter; `Stopped` is ignored.

use super::bricks::{Brick, BrickGrid};
use super::state::*;
use crate::config::GameConfig;
use crate::preload::GameAssets;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// If `ball` is one side of a started contact, return the other side.
fn ball_partner(event: &CollisionEvent, ball: Entity) -> Option<Entity> {
    let (e1, e2) = match event {
        CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
        CollisionEvent::Stopped(..) => return None,
    };
    if e1 == ball {
        Some(e2)
    } else if e2 == ball {
        Some(e1)
    } else {
        None
    }
}

/// Paddle hit: play the hit sound and steer the ball by contact offset.
///
/// Only the horizontal velocity is rewritten; Rapier's restitution response
/// has already reversed the vertical component.
pub fn ball_paddle_collision_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    paddle: Query<(Entity, &Transform), (With<Paddle>, Without<Ball>)>,
    mut ball: Query<(Entity, &Transform, &mut Velocity), (With<Ball>, Without<Paddle>)>,
) {
    let (Ok((paddle_entity, paddle_transform)), Ok((ball_entity, ball_transform, mut velocity))) =
        (paddle.single(), ball.single_mut())
    else {
        collision_events.clear();
        return;
    };

    for event in collision_events.read() {
        if ball_partner(event, ball_entity) != Some(paddle_entity) {
            continue;
        }

        if let Some(sound) = &assets.hit_sound {
            commands.spawn((
                HitSound,
                MatchScoped,
                AudioPlayer::new(sound.clone()),
                PlaybackSettings::DESPAWN,
            ));
        }

        let deflection = paddle_deflection(
            ball_transform.translation.x,
            paddle_transform.translation.x,
            config.paddle_half_width(),
        );
        velocity.linvel.x = deflection * config.ball_speed;
        debug!("[match] paddle hit, deflection {deflection:.2}");
    }
}

/// Brick hit: disable the brick; clearing the last one wins the match.
///
/// Disabled bricks keep their entity (collider off, sprite hidden) until the
/// next reset rebuilds the grid.
pub fn ball_brick_collision_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    mut grid: ResMut<BrickGrid>,
    mut state: ResMut<MatchState>,
    ball: Query<Entity, With<Ball>>,
    bricks: Query<&Brick>,
    mut ended: MessageWriter<MatchEnded>,
) {
    let Ok(ball_entity) = ball.single() else {
        collision_events.clear();
        return;
    };

    for event in collision_events.read() {
        let Some(other) = ball_partner(event, ball_entity) else {
            continue;
        };
        let Ok(brick) = bricks.get(other) else {
            continue;
        };
        let Some(remaining) = grid.deactivate(brick.index) else {
            continue;
        };

        commands
            .entity(other)
            .insert((ColliderDisabled, Visibility::Hidden));
        debug!("[match] brick {} down, {} left", brick.index, remaining);

        if remaining == 0 && state.finish(Outcome::Won) {
            info!("[match] last brick cleared");
            ended.write(MatchEnded(Outcome::Won));
        }
    }
}

/// Ball reached the bottom sensor: the match is lost.
///
/// Rapier may report the contact more than once for one exit; the
/// [`MatchState::finish`] guard turns repeats into no-ops.
pub fn ball_out_of_bounds_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut state: ResMut<MatchState>,
    ball: Query<Entity, With<Ball>>,
    sensor: Query<(), With<OutOfBoundsSensor>>,
    mut ended: MessageWriter<MatchEnded>,
) {
    let Ok(ball_entity) = ball.single() else {
        collision_events.clear();
        return;
    };

    for event in collision_events.read() {
        let Some(other) = ball_partner(event, ball_entity) else {
            continue;
        };
        if !sensor.contains(other) {
            continue;
        }
        if state.finish(Outcome::Lost) {
            info!("[match] ball fell off the bottom");
            ended.write(MatchEnded(Outcome::Lost));
        } else {
            debug!("[match] ignoring out-of-bounds after game over");
        }
    }
}
