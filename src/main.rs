use alphabet_soup::config::{self, GameConfig};
use alphabet_soup::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use alphabet_soup::game::{SoupGamePlugin, SoupSetup};
use alphabet_soup::hud::HudPlugin;
use alphabet_soup::input::SoupInputPlugin;
use alphabet_soup::rendering::SoupRenderPlugin;
use alphabet_soup::{bowl, environment, graphics};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Alphabet Soup".into(),
            resolution: WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.96, 0.92, 0.84)))
    // Compiled defaults; load_game_config overwrites them from assets/soup.toml
    // (if present) before anything else reads them.
    .insert_resource(GameConfig::default())
    // One world unit per pixel so the configured accelerations read as px/s².
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins((SoupGamePlugin, SoupInputPlugin, SoupRenderPlugin, HudPlugin))
    .add_systems(
        Startup,
        (
            (
                config::load_game_config,
                environment::verify_environment_system,
                environment::configure_gravity_system,
            )
                .chain()
                .in_set(SoupSetup::Config),
            (graphics::setup_camera, bowl::spawn_bowl_walls).in_set(SoupSetup::World),
        ),
    );

    app.run();
}
