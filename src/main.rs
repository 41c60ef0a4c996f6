use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use nugget_breakout::config::{GameConfig, CONFIG_PATH};
use nugget_breakout::game::MatchScene;
use nugget_breakout::graphics;
use nugget_breakout::preload::PreloadScene;
use nugget_breakout::scene::{GameScene, ScenePlugin};

/// Configure Rapier physics: no gravity, the ball only moves by its velocity.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    // Read before the app exists so the window and the preload scene see the
    // final values.
    let config = GameConfig::load_or_default(CONFIG_PATH);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Nugget Game".into(),
                resolution: WindowResolution::new(
                    config.field_width as u32,
                    config.field_height as u32,
                ),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(0x14, 0x1e, 0x32)))
        // pixels_per_meter(1.0) keeps Rapier units identical to field pixels,
        // so ball_speed is pixels per second.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .insert_resource(config)
        .init_state::<GameScene>()
        .add_plugins((
            ScenePlugin::<PreloadScene>::default(),
            ScenePlugin::<MatchScene>::default(),
        ))
        .add_systems(Startup, (graphics::setup_camera, setup_physics_config))
        .run();
}
