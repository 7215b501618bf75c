use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` maps one world unit to one pixel with the origin at
/// the window centre, which is where the bowl sits.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}
