//! Headless tests for the match lifecycle.
//!
//! The match scene runs under [`MinimalPlugins`] + [`StatesPlugin`] with no
//! window, renderer, audio or Rapier.  Input is fed through
//! `ButtonInput<KeyCode>` and contacts are hand-written `CollisionEvent`s, the
//! same messages Rapier would emit.
//!
//! Covered scenarios:
//! 1. Fresh entry: ball attached, prompts, full brick grid.
//! 2. Launch on Space.
//! 3. Clearing every brick wins exactly once, on the last brick.
//! 4. Repeated out-of-bounds contacts lose exactly once.
//! 5. Reset from either end state reproduces the fresh-entry state.
//! 6. Paddle deflection and hit sound.
//! 7. Scene teardown.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use nugget_breakout::config::GameConfig;
use nugget_breakout::game::{
    Ball, Brick, BrickGrid, GameOverText, HitSound, LaunchPrompt, MatchEnded, MatchPhase,
    MatchScene, MatchScoped, MatchState, OutOfBoundsSensor, Paddle, RestartPrompt,
};
use nugget_breakout::preload::GameAssets;
use nugget_breakout::scene::{GameScene, ScenePlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct EndCount(usize);

fn count_endings(mut reader: MessageReader<MatchEnded>, mut count: ResMut<EndCount>) {
    count.0 += reader.read().count();
}

fn match_app_with_assets(assets: GameAssets) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.add_message::<CollisionEvent>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(GameConfig::default());
    app.insert_resource(assets);
    app.insert_state(GameScene::Match);
    app.add_plugins(ScenePlugin::<MatchScene>::default());
    app.init_resource::<EndCount>();
    app.add_systems(Last, count_endings);
    app.update(); // OnEnter(Match) spawns the match
    app
}

/// Build an app already inside a fresh match.
fn match_app() -> App {
    match_app_with_assets(GameAssets::default())
}

/// Press and release `key` over one frame (edge-triggered press).
fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn entity_with<M: Component>(app: &mut App) -> Entity {
    let world = app.world_mut();
    let entity = world
        .query_filtered::<Entity, With<M>>()
        .single(world)
        .expect("exactly one entity");
    entity
}

fn component_of<C: Component + Clone, M: Component>(app: &mut App) -> C {
    let world = app.world_mut();
    let value = world
        .query_filtered::<&C, With<M>>()
        .single(world)
        .expect("exactly one entity")
        .clone();
    value
}

fn bricks(app: &mut App) -> Vec<(Entity, usize)> {
    let world = app.world_mut();
    let mut bricks: Vec<_> = world
        .query::<(Entity, &Brick)>()
        .iter(world)
        .map(|(e, b)| (e, b.index))
        .collect();
    bricks.sort_by_key(|(_, index)| *index);
    bricks
}

fn collide(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionEvent::Started(
        a,
        b,
        CollisionEventFlags::empty(),
    ));
}

fn state(app: &App) -> MatchState {
    *app.world().resource::<MatchState>()
}

fn end_count(app: &App) -> usize {
    app.world().resource::<EndCount>().0
}

/// Field-space view of ball velocity.
fn ball_velocity(app: &mut App) -> Vec2 {
    let field = GameConfig::default().field();
    field.velocity_to_field(component_of::<Velocity, Ball>(app).linvel)
}

/// Everything a player could observe about the match.
#[derive(Debug, PartialEq)]
struct Snapshot {
    paddle: Vec2,
    ball: Vec2,
    ball_velocity: Vec2,
    ball_visibility: Visibility,
    state: MatchState,
    active_bricks: usize,
    brick_entities: usize,
    visible_bricks: usize,
    banner: String,
    restart_prompt: Visibility,
    launch_prompt: Visibility,
}

fn snapshot(app: &mut App) -> Snapshot {
    let field = GameConfig::default().field();
    let paddle = component_of::<Transform, Paddle>(app).translation.truncate();
    let ball = component_of::<Transform, Ball>(app).translation.truncate();
    let world = app.world_mut();
    let visible_bricks = world
        .query_filtered::<&Visibility, With<Brick>>()
        .iter(world)
        .filter(|v| **v != Visibility::Hidden)
        .count();
    Snapshot {
        paddle: field.to_field(paddle),
        ball: field.to_field(ball),
        ball_velocity: ball_velocity(app),
        ball_visibility: component_of::<Visibility, Ball>(app),
        state: state(app),
        active_bricks: app.world().resource::<BrickGrid>().active_count(),
        brick_entities: bricks(app).len(),
        visible_bricks,
        banner: component_of::<Text2d, GameOverText>(app).0,
        restart_prompt: component_of::<Visibility, RestartPrompt>(app),
        launch_prompt: component_of::<Visibility, LaunchPrompt>(app),
    }
}

fn clear_all_bricks(app: &mut App) {
    let ball = entity_with::<Ball>(app);
    for (brick, _) in bricks(app) {
        collide(app, ball, brick);
    }
    app.update();
}

// ── Fresh entry ───────────────────────────────────────────────────────────────

#[test]
fn fresh_match_has_attached_ball_and_full_grid() {
    let mut app = match_app();
    let snap = snapshot(&mut app);

    assert_eq!(snap.paddle, Vec2::new(400.0, 550.0));
    assert_eq!(snap.ball, Vec2::new(400.0, 520.0));
    assert_eq!(snap.ball_velocity, Vec2::ZERO);
    assert_eq!(snap.ball_visibility, Visibility::Visible);
    assert_eq!(snap.state.phase(), MatchPhase::Attached);
    assert_eq!(snap.active_bricks, 50);
    assert_eq!(snap.brick_entities, 50);
    assert_eq!(snap.visible_bricks, 50);
    assert_eq!(snap.banner, "");
    assert_eq!(snap.restart_prompt, Visibility::Hidden);
    assert_eq!(snap.launch_prompt, Visibility::Visible);
}

#[test]
fn attached_ball_follows_paddle() {
    let mut app = match_app();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowLeft);
    for _ in 0..5 {
        app.update();
    }
    let snap = snapshot(&mut app);
    assert_eq!(snap.paddle, Vec2::new(360.0, 550.0));
    assert_eq!(snap.ball, Vec2::new(360.0, 520.0));
    assert_eq!(snap.ball_velocity, Vec2::ZERO);
}

// ── Launch ────────────────────────────────────────────────────────────────────

#[test]
fn space_launches_ball_up_and_right() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);

    assert_eq!(ball_velocity(&mut app), Vec2::new(240.0, -240.0));
    assert!(state(&app).ball_launched());
    assert_eq!(
        component_of::<Visibility, LaunchPrompt>(&mut app),
        Visibility::Hidden
    );
}

#[test]
fn holding_space_does_not_relaunch() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);

    // Ball gets deflected; a held (not re-pressed) Space must not touch it.
    let ball = entity_with::<Ball>(&mut app);
    app.world_mut()
        .get_mut::<Velocity>(ball)
        .unwrap()
        .linvel = Vec2::new(-50.0, 240.0);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear(); // held, but not just pressed
    app.update();

    assert_eq!(ball_velocity(&mut app), Vec2::new(-50.0, -240.0));
}

// ── Win ───────────────────────────────────────────────────────────────────────

#[test]
fn clearing_every_brick_wins_once() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    clear_all_bricks(&mut app);

    let snap = snapshot(&mut app);
    assert_eq!(snap.state.phase(), MatchPhase::Won);
    assert!(snap.state.game_over() && snap.state.won());
    assert_eq!(snap.active_bricks, 0);
    assert_eq!(snap.visible_bricks, 0);
    assert_eq!(snap.banner, "YOU WIN!");
    assert_eq!(snap.restart_prompt, Visibility::Visible);
    assert_eq!(snap.launch_prompt, Visibility::Hidden);
    assert_eq!(snap.ball_visibility, Visibility::Hidden);
    assert_eq!(snap.ball_velocity, Vec2::ZERO);
    assert_eq!(end_count(&app), 1);

    let ball = entity_with::<Ball>(&mut app);
    assert!(app.world().get::<RigidBodyDisabled>(ball).is_some());
}

#[test]
fn win_triggers_on_last_brick_in_any_order() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);

    let mut order = bricks(&mut app);
    // Interleave from both ends: 0, 49, 1, 48, ...
    let mut shuffled = Vec::with_capacity(order.len());
    while !order.is_empty() {
        shuffled.push(order.remove(0));
        if let Some(last) = order.pop() {
            shuffled.push(last);
        }
    }

    let total = shuffled.len();
    for (i, (brick, _)) in shuffled.into_iter().enumerate() {
        collide(&mut app, ball, brick);
        app.update();
        if i + 1 < total {
            assert!(!state(&app).game_over(), "won early after {} bricks", i + 1);
        }
    }

    assert_eq!(state(&app).phase(), MatchPhase::Won);
    assert_eq!(end_count(&app), 1);
}

#[test]
fn repeated_hits_on_one_brick_count_once() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let (brick, index) = bricks(&mut app)[3];

    collide(&mut app, ball, brick);
    collide(&mut app, brick, ball);
    app.update();
    collide(&mut app, ball, brick);
    app.update();

    let grid = app.world().resource::<BrickGrid>();
    assert_eq!(grid.active_count(), 49);
    assert!(!grid.is_active(index));
    assert_eq!(
        app.world().get::<Visibility>(brick).copied(),
        Some(Visibility::Hidden)
    );
    assert!(app.world().get::<ColliderDisabled>(brick).is_some());
}

// ── Loss ──────────────────────────────────────────────────────────────────────

#[test]
fn out_of_bounds_loses_exactly_once() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let sensor = entity_with::<OutOfBoundsSensor>(&mut app);

    collide(&mut app, ball, sensor);
    collide(&mut app, sensor, ball);
    app.update();
    assert_eq!(end_count(&app), 1);

    collide(&mut app, ball, sensor);
    app.update();
    assert_eq!(end_count(&app), 1, "second exit must not re-enter the end state");

    assert_eq!(state(&app).phase(), MatchPhase::Lost);
    assert_eq!(component_of::<Text2d, GameOverText>(&mut app).0, "GAME OVER");
    assert_eq!(
        component_of::<TextColor, GameOverText>(&mut app).0,
        Color::WHITE
    );
}

#[test]
fn losing_after_winning_is_ignored() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    clear_all_bricks(&mut app);

    let ball = entity_with::<Ball>(&mut app);
    let sensor = entity_with::<OutOfBoundsSensor>(&mut app);
    collide(&mut app, ball, sensor);
    app.update();

    assert_eq!(state(&app).phase(), MatchPhase::Won);
    assert_eq!(component_of::<Text2d, GameOverText>(&mut app).0, "YOU WIN!");
    assert_eq!(end_count(&app), 1);
}

#[test]
fn input_other_than_space_is_ignored_when_over() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let sensor = entity_with::<OutOfBoundsSensor>(&mut app);
    collide(&mut app, ball, sensor);
    app.update();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowRight);
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(snapshot(&mut app).paddle, Vec2::new(400.0, 550.0));
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_after_win_matches_fresh_entry() {
    let mut app = match_app();
    let fresh = snapshot(&mut app);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowRight);
    for _ in 0..4 {
        app.update();
    }
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::ArrowRight);
        keys.clear();
    }
    tap(&mut app, KeyCode::Space);
    clear_all_bricks(&mut app);
    assert!(state(&app).game_over());

    tap(&mut app, KeyCode::Space);
    assert_eq!(snapshot(&mut app), fresh);

    let ball = entity_with::<Ball>(&mut app);
    assert!(app.world().get::<RigidBodyDisabled>(ball).is_none());
}

#[test]
fn reset_after_loss_matches_fresh_entry() {
    let mut app = match_app();
    let fresh = snapshot(&mut app);

    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let sensor = entity_with::<OutOfBoundsSensor>(&mut app);
    let (brick, _) = bricks(&mut app)[0];
    collide(&mut app, ball, brick);
    collide(&mut app, ball, sensor);
    app.update();
    assert_eq!(state(&app).phase(), MatchPhase::Lost);

    tap(&mut app, KeyCode::Space);
    assert_eq!(snapshot(&mut app), fresh);
}

#[test]
fn reset_match_can_be_played_again() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    clear_all_bricks(&mut app);
    tap(&mut app, KeyCode::Space);

    tap(&mut app, KeyCode::Space);
    assert_eq!(state(&app).phase(), MatchPhase::Launched);

    clear_all_bricks(&mut app);
    assert_eq!(state(&app).phase(), MatchPhase::Won);
    assert_eq!(end_count(&app), 2);
}

// ── Paddle hits ───────────────────────────────────────────────────────────────

#[test]
fn paddle_hit_deflects_by_contact_offset() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);

    let field = GameConfig::default().field();
    let ball = entity_with::<Ball>(&mut app);
    let paddle = entity_with::<Paddle>(&mut app);
    // Paddle at x = 400, half width 60; contact at x = 430.
    app.world_mut()
        .get_mut::<Transform>(ball)
        .unwrap()
        .translation
        .x = field.to_world(Vec2::new(430.0, 530.0)).x;

    collide(&mut app, paddle, ball);
    app.update();

    let velocity = ball_velocity(&mut app);
    assert!((velocity.x - 120.0).abs() < 1e-4, "got {velocity:?}");
    assert_eq!(velocity.y, -240.0, "vertical component left to the physics");
}

#[test]
fn paddle_hit_plays_sound_when_available() {
    let mut app = match_app_with_assets(GameAssets {
        hit_sound: Some(Handle::default()),
        ..Default::default()
    });
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let paddle = entity_with::<Paddle>(&mut app);

    collide(&mut app, ball, paddle);
    app.update();

    let world = app.world_mut();
    let sounds: usize = world
        .query_filtered::<Entity, With<HitSound>>()
        .iter(world)
        .count();
    assert_eq!(sounds, 1);
}

#[test]
fn paddle_hit_without_sound_asset_is_silent() {
    let mut app = match_app();
    tap(&mut app, KeyCode::Space);
    let ball = entity_with::<Ball>(&mut app);
    let paddle = entity_with::<Paddle>(&mut app);

    collide(&mut app, ball, paddle);
    app.update();

    let world = app.world_mut();
    let sounds: usize = world
        .query_filtered::<Entity, With<HitSound>>()
        .iter(world)
        .count();
    assert_eq!(sounds, 0);
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[test]
fn leaving_match_despawns_everything() {
    let mut app = match_app();
    app.world_mut()
        .resource_mut::<NextState<GameScene>>()
        .set(GameScene::Preload);
    app.update();

    let world = app.world_mut();
    let remaining = world
        .query_filtered::<Entity, With<MatchScoped>>()
        .iter(world)
        .count();
    assert_eq!(remaining, 0);
    assert!(app.world().get_resource::<BrickGrid>().is_none());
    assert!(app.world().get_resource::<MatchState>().is_none());
}
