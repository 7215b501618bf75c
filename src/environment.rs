//! Startup checks and physics-world configuration.
//!
//! The game needs a window to draw into and the Rapier backend to simulate the
//! broth.  If either is missing at startup the app logs why and exits with an
//! error code instead of running a blank or frozen bowl.

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

/// Decide whether the app can run.  Window problems are reported first.
pub fn check_environment(has_window: bool, has_physics: bool) -> GameResult<()> {
    if !has_window {
        return Err(GameError::MissingWindow);
    }
    if !has_physics {
        return Err(GameError::MissingPhysics);
    }
    Ok(())
}

/// Startup system: abort with [`AppExit::error`] if the window or physics is missing.
pub fn verify_environment_system(
    windows: Query<(), With<PrimaryWindow>>,
    physics: Query<(), With<RapierConfiguration>>,
    mut exit: MessageWriter<AppExit>,
) {
    match check_environment(!windows.is_empty(), !physics.is_empty()) {
        Ok(()) => info!("[SETUP] Window and physics backend present"),
        Err(err) => {
            error!("Cannot start: {err}");
            exit.write(AppExit::error());
        }
    }
}

/// Configure Rapier: weak downward gravity so buoyancy can win.
pub fn configure_gravity_system(mut rapier: Query<&mut RapierConfiguration>, config: Res<GameConfig>) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, -config.gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_window_takes_precedence() {
        assert_eq!(check_environment(false, false), Err(GameError::MissingWindow));
        assert_eq!(check_environment(true, false), Err(GameError::MissingPhysics));
        assert_eq!(check_environment(true, true), Ok(()));
    }

    #[test]
    fn headless_app_is_asked_to_exit() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Startup, verify_environment_system);
        app.update();

        let exits = app.world().resource::<Messages<AppExit>>();
        let mut cursor = exits.get_cursor();
        let sent: Vec<&AppExit> = cursor.read(exits).collect();
        assert!(sent.iter().any(|e| e.is_error()), "expected an error exit, got {sent:?}");
    }
}
