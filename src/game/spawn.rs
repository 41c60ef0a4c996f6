use super::bricks::{Brick, BrickGrid};
use super::state::*;
use crate::config::GameConfig;
use crate::constants::*;
use crate::field::Field;
use crate::preload::GameAssets;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Fallback fill when an image asset failed to load.
fn ball_fallback() -> Color {
    Color::srgb(0.95, 0.72, 0.25)
}
fn brick_fallback() -> Color {
    Color::srgb(0.72, 0.42, 0.18)
}

/// Image sprite at `size`, or a flat rectangle when the image is unavailable.
fn sprite_or_fill(image: Option<&Handle<Image>>, fallback: Color, size: Vec2) -> Sprite {
    match image {
        Some(image) => Sprite {
            image: image.clone(),
            custom_size: Some(size),
            ..default()
        },
        None => Sprite::from_color(fallback, size),
    }
}

/// Perfectly elastic, frictionless contact regardless of the other body.
fn bouncy() -> (Restitution, Friction) {
    (
        Restitution {
            coefficient: 1.0,
            combine_rule: CoefficientCombineRule::Max,
        },
        Friction {
            coefficient: 0.0,
            combine_rule: CoefficientCombineRule::Min,
        },
    )
}

// ── OnEnter(Match) ────────────────────────────────────────────────────────────

/// Build a fresh match: resources, walls, paddle, ball, bricks and overlays.
pub fn spawn_match(mut commands: Commands, config: Res<GameConfig>, assets: Res<GameAssets>) {
    let field = config.field();
    let grid = BrickGrid::new(config.brick_layout());

    spawn_walls(&mut commands, &config);
    spawn_paddle(&mut commands, &config);
    spawn_ball(&mut commands, &config, &assets);
    spawn_bricks(&mut commands, &grid, field, assets.brick_image.as_ref());
    spawn_overlays(&mut commands, &config);

    info!(
        "[match] started: {}×{} bricks, ball speed {}",
        config.brick_rows, config.brick_cols, config.ball_speed
    );

    commands.insert_resource(grid);
    commands.insert_resource(MatchState::default());
    commands.insert_resource(MatchInput::default());
}

/// Left, top and right walls just outside the field, plus the bottom sensor.
fn spawn_walls(commands: &mut Commands, config: &GameConfig) {
    let field = config.field();
    let (w, h, t) = (field.width, field.height, WALL_THICKNESS);

    let walls = [
        (Vec2::new(-t / 2.0, h / 2.0), Vec2::new(t, h + 2.0 * t)),
        (Vec2::new(w + t / 2.0, h / 2.0), Vec2::new(t, h + 2.0 * t)),
        (Vec2::new(w / 2.0, -t / 2.0), Vec2::new(w + 2.0 * t, t)),
    ];
    for (center, size) in walls {
        commands.spawn((
            Wall,
            MatchScoped,
            field.transform_at(center, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            bouncy(),
        ));
    }

    commands.spawn((
        OutOfBoundsSensor,
        MatchScoped,
        field.transform_at(Vec2::new(w / 2.0, h + t / 2.0), 0.0),
        RigidBody::Fixed,
        Collider::cuboid(w / 2.0 + t, t / 2.0),
        Sensor,
    ));
}

fn spawn_paddle(commands: &mut Commands, config: &GameConfig) {
    let field = config.field();
    let size = Vec2::new(config.paddle_width, config.paddle_height);
    commands.spawn((
        Paddle,
        MatchScoped,
        Sprite::from_color(Color::WHITE, size),
        field.transform_at(config.paddle_start(), 1.0),
        RigidBody::KinematicPositionBased,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        bouncy(),
    ));
}

fn spawn_ball(commands: &mut Commands, config: &GameConfig, assets: &GameAssets) {
    let field = config.field();
    let pos = attached_ball_position(config.paddle_start(), config.ball_attach_offset);
    commands.spawn((
        (
            Ball,
            MatchScoped,
            sprite_or_fill(
                assets.ball_image.as_ref(),
                ball_fallback(),
                Vec2::splat(config.ball_size),
            ),
            field.transform_at(pos, 2.0),
            Visibility::Visible,
        ),
        (
            RigidBody::Dynamic,
            Collider::ball(config.ball_size / 2.0),
            bouncy(),
            LockedAxes::ROTATION_LOCKED,
            Ccd::enabled(),
            Sleeping::disabled(),
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
        ),
    ));
}

/// Spawn one fixed collider per active cell of `grid`.
pub fn spawn_bricks(
    commands: &mut Commands,
    grid: &BrickGrid,
    field: Field,
    image: Option<&Handle<Image>>,
) {
    for (index, cell) in grid.cells().iter().enumerate() {
        if !grid.is_active(index) {
            continue;
        }
        commands.spawn((
            Brick { index },
            MatchScoped,
            sprite_or_fill(image, brick_fallback(), cell.size),
            field.transform_at(cell.center, 1.0),
            Visibility::Visible,
            RigidBody::Fixed,
            Collider::cuboid(cell.size.x / 2.0, cell.size.y / 2.0),
            bouncy(),
        ));
    }
}

/// Game-over banner (empty), restart prompt (hidden), launch prompt (shown).
fn spawn_overlays(commands: &mut Commands, config: &GameConfig) {
    let field = config.field();
    let at_row = |row: f32| field.transform_at(Vec2::new(field.width / 2.0, field.height * row), 10.0);

    commands.spawn((
        GameOverText,
        MatchScoped,
        Text2d::new(""),
        TextFont::from_font_size(GAME_OVER_FONT_SIZE),
        TextColor(Color::WHITE),
        at_row(GAME_OVER_TEXT_ROW),
        Visibility::Visible,
    ));
    commands.spawn((
        RestartPrompt,
        MatchScoped,
        Text2d::new("Press SPACE to play again"),
        TextFont::from_font_size(PROMPT_FONT_SIZE),
        TextColor(Color::WHITE),
        at_row(RESTART_TEXT_ROW),
        Visibility::Hidden,
    ));
    commands.spawn((
        LaunchPrompt,
        MatchScoped,
        Text2d::new("Press SPACE to launch"),
        TextFont::from_font_size(PROMPT_FONT_SIZE),
        TextColor(Color::WHITE),
        at_row(LAUNCH_TEXT_ROW),
        Visibility::Visible,
    ));
}
