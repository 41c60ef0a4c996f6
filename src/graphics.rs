use bevy::prelude::*;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one window pixel, so the whole
    // field is visible with the origin at the window centre.
    commands.spawn(Camera2d);
    info!("[setup] camera spawned");
}
