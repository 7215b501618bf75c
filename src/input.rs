//! Pointer and keyboard input.
//!
//! Pressing the left mouse button over a letter grabs it and writes a
//! [`LetterPicked`] message; while held, a spring pulls the letter toward the
//! cursor.  Rules live in [`crate::game`]; this module only translates input.
//!
//! | Input            | Effect                        |
//! |------------------|-------------------------------|
//! | Left press       | Grab + pick letter under cursor |
//! | Left drag        | Letter follows cursor         |
//! | `R`              | [`ResetRequested`]            |
//! | `N`              | [`ChangeWordRequested`]       |
//! | `Esc`            | Quit                          |

use crate::config::GameConfig;
use crate::fluid::fluid_force_system;
use crate::game::{ChangeWordRequested, LetterPicked, ResetRequested};
use crate::letters::Letter;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

/// The letter currently held by the pointer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub grabbed: Option<Grab>,
    /// Last cursor position seen inside the window, in world space.
    pub cursor: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub entity: Entity,
    /// Cursor position minus letter centre at the moment of grabbing.
    pub offset: Vec2,
}

pub struct SoupInputPlugin;

impl Plugin for SoupInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (
                // The speed cap in the fluid step must see the drag velocity.
                (pointer_grab_system, drag_follow_system)
                    .chain()
                    .before(fluid_force_system),
                keyboard_shortcut_system,
            ),
        );
    }
}

/// Cursor position in world space, if the cursor is inside the window.
pub fn cursor_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.iter().next()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Nearest letter whose disc contains `point`.
pub fn letter_under_point(
    point: Vec2,
    letters: impl IntoIterator<Item = (Entity, Vec2)>,
    radius: f32,
) -> Option<Entity> {
    letters
        .into_iter()
        .map(|(entity, pos)| (entity, pos.distance_squared(point)))
        .filter(|(_, d2)| *d2 <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Grab on press, release on button up.
pub fn pointer_grab_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    letters: Query<(Entity, &Transform), With<Letter>>,
    mut drag: ResMut<DragState>,
    mut picks: MessageWriter<LetterPicked>,
    config: Res<GameConfig>,
) {
    if let Some(cursor) = cursor_world_position(&windows, &cameras) {
        drag.cursor = Some(cursor);
    }
    if buttons.just_released(MouseButton::Left) {
        drag.grabbed = None;
    }
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = drag.cursor else {
        return;
    };

    let candidates = letters
        .iter()
        .map(|(e, t)| (e, t.translation.truncate()));
    if let Some(entity) = letter_under_point(cursor, candidates, config.letter_radius) {
        let centre = letters
            .get(entity)
            .map(|(_, t)| t.translation.truncate())
            .unwrap_or(cursor);
        drag.grabbed = Some(Grab {
            entity,
            offset: cursor - centre,
        });
        picks.write(LetterPicked(entity));
    }
}

/// Spring the grabbed letter toward the cursor by setting its velocity.
pub fn drag_follow_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut letters: Query<(&Transform, &mut Velocity), With<Letter>>,
    mut drag: ResMut<DragState>,
    config: Res<GameConfig>,
) {
    let Some(grab) = drag.grabbed else {
        return;
    };
    if !buttons.pressed(MouseButton::Left) {
        drag.grabbed = None;
        return;
    }
    // Letter vanished under us (rebuild after a word change).
    let Ok((transform, mut velocity)) = letters.get_mut(grab.entity) else {
        drag.grabbed = None;
        return;
    };
    let Some(cursor) = drag.cursor else {
        return;
    };

    velocity.linvel = drag_velocity(
        transform.translation.truncate(),
        cursor - grab.offset,
        config.drag_stiffness,
    );
}

/// Velocity that closes `stiffness` of the gap per 60 Hz tick.
pub fn drag_velocity(position: Vec2, target: Vec2, stiffness: f32) -> Vec2 {
    (target - position) * stiffness * 60.0
}

pub fn keyboard_shortcut_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut resets: MessageWriter<ResetRequested>,
    mut changes: MessageWriter<ChangeWordRequested>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        resets.write(ResetRequested);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        changes.write(ChangeWordRequested);
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_nearest_letter_within_radius() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let letters = [(a, Vec2::new(0.0, 0.0)), (b, Vec2::new(20.0, 0.0))];

        assert_eq!(letter_under_point(Vec2::new(15.0, 0.0), letters, 30.0), Some(b));
        assert_eq!(letter_under_point(Vec2::new(2.0, 0.0), letters, 30.0), Some(a));
        assert_eq!(letter_under_point(Vec2::new(100.0, 0.0), letters, 30.0), None);
    }

    #[test]
    fn drag_velocity_points_at_target() {
        let v = drag_velocity(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.2);
        assert!((v - Vec2::new(120.0, 0.0)).length() < 1e-4);
        assert_eq!(drag_velocity(Vec2::ONE, Vec2::ONE, 0.2), Vec2::ZERO);
    }

    #[test]
    fn dragged_letter_still_respects_speed_cap() {
        use crate::game::SoupGamePlugin;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        app.insert_resource(buttons);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins((SoupGamePlugin, SoupInputPlugin));
        app.update();

        let mut query = app.world_mut().query_filtered::<Entity, With<Letter>>();
        let letter = query
            .iter(app.world())
            .next()
            .expect("startup spawns letters");
        // Far enough away that the raw spring velocity is well over the cap.
        *app.world_mut().resource_mut::<DragState>() = DragState {
            grabbed: Some(Grab {
                entity: letter,
                offset: Vec2::ZERO,
            }),
            cursor: Some(Vec2::new(200.0, 0.0)),
        };

        for _ in 0..3 {
            app.update();
            let speed = app.world().get::<Velocity>(letter).unwrap().linvel.length();
            let max = app.world().resource::<GameConfig>().max_speed;
            assert!(speed <= max + 1e-3, "speed {speed} exceeds cap {max}");
        }
    }

    #[test]
    fn shortcut_keys_write_requests() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<ResetRequested>()
            .add_message::<ChangeWordRequested>()
            .add_message::<AppExit>();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyR);
        keys.press(KeyCode::KeyN);
        app.insert_resource(keys);
        app.add_systems(Update, keyboard_shortcut_system);

        app.update();

        let resets = app.world().resource::<Messages<ResetRequested>>();
        let changes = app.world().resource::<Messages<ChangeWordRequested>>();
        assert_eq!(resets.len(), 1);
        assert_eq!(changes.len(), 1);
    }
}
