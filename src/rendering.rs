//! Drawing the soup: bowl, broth, waves, bubbles, steam and letters.
//!
//! ## Layer model (back to front)
//!
//! | z     | Layer                 | Technology |
//! |-------|-----------------------|------------|
//! | -3.0  | Bowl drop shadow      | `Mesh2d`   |
//! | -2.0  | Dark rim              | `Mesh2d`   |
//! | -1.0  | Broth gradient        | `Mesh2d`   |
//! | -0.9  | Liquid highlight      | `Mesh2d`   |
//! | -0.8  | Rim highlight ring    | `Mesh2d`   |
//! | -0.5  | Bubbles               | `Mesh2d` + gizmo outline |
//! |  -    | Waves, letter outlines| Gizmos     |
//! |  1.0  | Letters (+ children)  | `Mesh2d` + `Text2d` |
//! |  5.0  | Steam                 | `Mesh2d`   |
//!
//! Everything here reads game state and never writes it.

use crate::config::GameConfig;
use crate::game::Flash;
use crate::letters::Letter;
use crate::meshes::{disc_mesh, gradient_disc_mesh, gradient_disc_mesh_offset, ring_mesh, GradientStop};
use crate::selection::Selection;
use crate::steam::{spawn_steam_pool, steam_update_system, SteamParticle};
use bevy::prelude::*;
use std::f32::consts::TAU;

// ── Palette ───────────────────────────────────────────────────────────────────

const BOWL_RIM: Srgba = Srgba::rgb(0.396, 0.263, 0.129); // #654321
const RIM_HIGHLIGHT: Srgba = Srgba::new(0.545, 0.271, 0.075, 0.8);
const WAVE: Srgba = Srgba::new(1.0, 0.784, 0.392, 0.3);
const BUBBLE_FILL: Srgba = Srgba::new(1.0, 1.0, 1.0, 0.4);
const BUBBLE_EDGE: Srgba = Srgba::new(1.0, 1.0, 1.0, 0.6);
const LETTER_EDGE: Srgba = Srgba::rgb(0.855, 0.647, 0.125); // #DAA520
const LETTER_EDGE_SELECTED: Srgba = Srgba::rgb(1.0, 0.388, 0.278); // #FF6347
const LETTER_TEXT: Srgba = Srgba::rgb(0.2, 0.2, 0.2);

fn broth_stops() -> [GradientStop; 4] {
    [
        GradientStop::new(0.0, Srgba::rgb(1.0, 0.894, 0.710)),  // #FFE4B5
        GradientStop::new(0.5, Srgba::rgb(0.957, 0.839, 0.627)), // #F4D6A0
        GradientStop::new(0.8, Srgba::rgb(0.910, 0.753, 0.439)), // #E8C070
        GradientStop::new(1.0, Srgba::rgb(0.871, 0.722, 0.529)), // #DEB887
    ]
}

fn liquid_stops() -> [GradientStop; 3] {
    [
        GradientStop::new(0.0, Srgba::new(1.0, 1.0, 1.0, 0.3)),
        GradientStop::new(0.5, Srgba::new(1.0, 0.922, 0.706, 0.2)),
        GradientStop::new(1.0, Srgba::new(1.0, 0.784, 0.392, 0.1)),
    ]
}

fn letter_stops() -> [GradientStop; 2] {
    [
        GradientStop::new(0.0, Srgba::rgb(1.0, 0.980, 0.804)), // #FFFACD
        GradientStop::new(1.0, Srgba::rgb(0.941, 0.902, 0.549)), // #F0E68C
    ]
}

fn selected_letter_stops() -> [GradientStop; 2] {
    [
        GradientStop::new(0.0, Srgba::rgb(1.0, 0.843, 0.0)), // #FFD700
        GradientStop::new(1.0, Srgba::rgb(1.0, 0.647, 0.0)), // #FFA500
    ]
}

// ── Resources & components ────────────────────────────────────────────────────

/// Material of the broth layers; tinted during the flash.
#[derive(Resource, Debug, Clone)]
pub struct BrothMaterial(pub Handle<ColorMaterial>);

/// Shared meshes and materials for letter discs.
#[derive(Resource, Debug, Clone)]
pub struct LetterAssets {
    pub disc: Handle<Mesh>,
    pub disc_selected: Handle<Mesh>,
    pub shadow: Handle<Mesh>,
    pub white: Handle<ColorMaterial>,
    pub shadow_material: Handle<ColorMaterial>,
}

/// Shared circle mesh and materials for steam and bubbles.
#[derive(Resource, Debug, Clone)]
pub struct PuffAssets {
    pub unit_disc: Handle<Mesh>,
    pub bubble_material: Handle<ColorMaterial>,
}

/// Per-puff material so each steam particle fades on its own.
#[derive(Component, Debug, Clone)]
pub struct SteamMaterial(pub Handle<ColorMaterial>);

/// Decorative bubble orbiting in the broth.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bubble {
    pub index: u32,
}

/// The order-number text child of a letter.
#[derive(Component, Debug, Clone, Copy)]
pub struct LetterBadge;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SoupRenderPlugin;

impl Plugin for SoupRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                setup_bowl_visuals,
                setup_letter_assets,
                spawn_steam_pool,
                spawn_bubbles,
            )
                .in_set(crate::game::SoupSetup::World),
        )
        .add_systems(
            Update,
            (
                attach_letter_visuals_system,
                letter_selection_visual_system,
                attach_steam_visuals_system,
                steam_update_system,
                steam_fade_system,
                bubble_system,
                flash_visual_system,
                gizmo_rendering_system,
            )
                .chain(),
        );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the static bowl layers.
pub fn setup_bowl_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
) {
    let r = config.bowl_radius;

    let shadow = materials.add(ColorMaterial::from_color(Color::srgba(0.0, 0.0, 0.0, 0.3)));
    commands.spawn((
        Mesh2d(meshes.add(disc_mesh(r + 20.0, 96))),
        MeshMaterial2d(shadow),
        Transform::from_xyz(0.0, -10.0, -3.0),
    ));

    let rim = materials.add(ColorMaterial::from_color(Color::from(BOWL_RIM)));
    commands.spawn((
        Mesh2d(meshes.add(disc_mesh(r + 15.0, 96))),
        MeshMaterial2d(rim),
        Transform::from_xyz(0.0, 0.0, -2.0),
    ));

    let broth = materials.add(ColorMaterial::from_color(Color::WHITE));
    commands.spawn((
        Mesh2d(meshes.add(gradient_disc_mesh(r, 96, &broth_stops()))),
        MeshMaterial2d(broth.clone()),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
    // Highlight focus sits 50 px above centre.
    commands.spawn((
        Mesh2d(meshes.add(gradient_disc_mesh_offset(
            r,
            96,
            Vec2::new(0.0, 50.0 / r),
            &liquid_stops(),
        ))),
        MeshMaterial2d(broth.clone()),
        Transform::from_xyz(0.0, 0.0, -0.9),
    ));

    let highlight = materials.add(ColorMaterial::from_color(Color::from(RIM_HIGHLIGHT)));
    commands.spawn((
        Mesh2d(meshes.add(ring_mesh(r + 10.0, 5.0, 128))),
        MeshMaterial2d(highlight),
        Transform::from_xyz(0.0, 0.0, -0.8),
    ));

    commands.insert_resource(BrothMaterial(broth));
    info!("[SETUP] Bowl visuals spawned");
}

pub fn setup_letter_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
) {
    let r = config.letter_radius;
    // Unselected letters are lit from the upper left, a third of the radius off-centre.
    let focus = Vec2::new(-10.0, 10.0) / r;
    commands.insert_resource(LetterAssets {
        disc: meshes.add(gradient_disc_mesh_offset(r, 48, focus, &letter_stops())),
        disc_selected: meshes.add(gradient_disc_mesh(r, 48, &selected_letter_stops())),
        shadow: meshes.add(disc_mesh(r, 48)),
        white: materials.add(ColorMaterial::from_color(Color::WHITE)),
        shadow_material: materials.add(ColorMaterial::from_color(Color::srgba(0.0, 0.0, 0.0, 0.2))),
    });

    let unit_disc = meshes.add(disc_mesh(1.0, 24));
    let bubble_material = materials.add(ColorMaterial::from_color(Color::from(BUBBLE_FILL)));
    commands.insert_resource(PuffAssets {
        unit_disc,
        bubble_material,
    });
}

pub fn spawn_bubbles(mut commands: Commands, config: Res<GameConfig>) {
    for index in 0..config.bubble_count {
        commands.spawn((
            Bubble { index },
            Transform::from_xyz(0.0, 0.0, -0.5),
            Visibility::default(),
        ));
    }
}

// ── Pure animation helpers ────────────────────────────────────────────────────

/// Centre and radius of bubble `index` of `count` at time `t`.
pub fn bubble_state(index: u32, count: u32, t: f32) -> (Vec2, f32) {
    let i = index as f32;
    let angle = i / count.max(1) as f32 * TAU + t * 0.5;
    let orbit = 80.0 + (t * 2.0 + i).sin() * 40.0;
    let bob = (t * 3.0 + i).sin() * 10.0;
    let size = 3.0 + (t * 4.0 + i).sin() * 2.0;
    (Vec2::from_angle(angle) * orbit + Vec2::new(0.0, bob), size)
}

/// Closed outline of wave `index` at time `t`, sampled every 0.1 rad.
pub fn wave_points(bowl_radius: f32, index: u32, t: f32) -> Vec<Vec2> {
    let i = index as f32;
    let base = bowl_radius - 50.0 - i * 20.0;
    let steps = (TAU / 0.1).ceil() as usize;
    let mut points: Vec<Vec2> = (0..steps)
        .map(|k| {
            let angle = k as f32 * 0.1;
            let radius = base + (angle * 5.0 + t + i).sin() * 3.0;
            Vec2::from_angle(angle) * radius
        })
        .collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Give freshly spawned letters their disc, shadow, glyph and badge.
pub fn attach_letter_visuals_system(
    mut commands: Commands,
    assets: Option<Res<LetterAssets>>,
    query: Query<(Entity, &Letter), Added<Letter>>,
    config: Res<GameConfig>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, letter) in query.iter() {
        commands
            .entity(entity)
            .insert((
                Mesh2d(assets.disc.clone()),
                MeshMaterial2d(assets.white.clone()),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh2d(assets.shadow.clone()),
                    MeshMaterial2d(assets.shadow_material.clone()),
                    Transform::from_xyz(2.0, -2.0, -0.1),
                ));
                parent.spawn((
                    Text2d::new(letter.glyph.to_string()),
                    TextFont {
                        font_size: config.letter_font_size,
                        ..default()
                    },
                    TextColor(Color::from(LETTER_TEXT)),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
                parent.spawn((
                    LetterBadge,
                    Text2d::new(""),
                    TextFont {
                        font_size: config.badge_font_size,
                        ..default()
                    },
                    TextColor(Color::from(LETTER_EDGE_SELECTED)),
                    Transform::from_xyz(
                        config.letter_radius - 8.0,
                        config.letter_radius - 8.0,
                        0.2,
                    ),
                ));
            });
    }
}

/// Swap the disc gradient and badge text to reflect the selection.
pub fn letter_selection_visual_system(
    selection: Res<Selection>,
    assets: Option<Res<LetterAssets>>,
    mut letters: Query<(Entity, &mut Mesh2d, &Children), With<Letter>>,
    mut badges: Query<&mut Text2d, With<LetterBadge>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, mut mesh, children) in letters.iter_mut() {
        let order = selection.order_of(entity);
        let wanted = if order.is_some() {
            &assets.disc_selected
        } else {
            &assets.disc
        };
        if mesh.0 != *wanted {
            mesh.0 = wanted.clone();
        }

        let label = order.map(|n| n.to_string()).unwrap_or_default();
        for child in children.iter() {
            if let Ok(mut text) = badges.get_mut(child) {
                if text.0 != label {
                    text.0 = label.clone();
                }
            }
        }
    }
}

/// Give each steam puff its disc mesh and a private fading material.
pub fn attach_steam_visuals_system(
    mut commands: Commands,
    assets: Option<Res<PuffAssets>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<(Entity, &SteamParticle), Added<SteamParticle>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, puff) in query.iter() {
        let material = materials.add(ColorMaterial::from_color(Color::srgba(
            1.0,
            1.0,
            1.0,
            puff.opacity.clamp(0.0, 1.0),
        )));
        commands.entity(entity).insert((
            Mesh2d(assets.unit_disc.clone()),
            MeshMaterial2d(material.clone()),
            SteamMaterial(material),
        ));
    }
}

pub fn steam_fade_system(
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<(&SteamParticle, &SteamMaterial)>,
) {
    for (puff, material) in query.iter() {
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = Color::srgba(1.0, 1.0, 1.0, puff.opacity.clamp(0.0, 1.0));
        }
    }
}

/// Move bubbles along their orbits; attaches the shared mesh on first sight.
pub fn bubble_system(
    mut commands: Commands,
    time: Res<Time>,
    assets: Option<Res<PuffAssets>>,
    config: Res<GameConfig>,
    mut query: Query<(Entity, &Bubble, &mut Transform, Option<&Mesh2d>)>,
) {
    let t = time.elapsed_secs();
    for (entity, bubble, mut transform, mesh) in query.iter_mut() {
        let (pos, size) = bubble_state(bubble.index, config.bubble_count, t);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        transform.scale = Vec3::splat(size.max(0.1));

        if mesh.is_none() {
            if let Some(assets) = assets.as_deref() {
                commands.entity(entity).insert((
                    Mesh2d(assets.unit_disc.clone()),
                    MeshMaterial2d(assets.bubble_material.clone()),
                ));
            }
        }
    }
}

/// Brighten the broth while a flash is running.
pub fn flash_visual_system(
    flash: Res<Flash>,
    broth: Option<Res<BrothMaterial>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
) {
    if !flash.is_changed() {
        return;
    }
    let Some(broth) = broth else {
        return;
    };
    if let Some(mat) = materials.get_mut(&broth.0) {
        let b = flash.brightness(&config);
        mat.color = Color::LinearRgba(LinearRgba::new(b, b, b, 1.0));
    }
}

/// Immediate-mode overlays: broth waves, bubble rims and letter outlines.
pub fn gizmo_rendering_system(
    mut gizmos: Gizmos,
    time: Res<Time>,
    config: Res<GameConfig>,
    selection: Res<Selection>,
    letters: Query<(Entity, &Transform), With<Letter>>,
    bubbles: Query<&Transform, With<Bubble>>,
) {
    let t = time.elapsed_secs();

    for i in 0..config.wave_count {
        gizmos.linestrip_2d(wave_points(config.bowl_radius, i, t), Color::from(WAVE));
    }

    for transform in bubbles.iter() {
        gizmos.circle_2d(
            transform.translation.truncate(),
            transform.scale.x,
            Color::from(BUBBLE_EDGE),
        );
    }

    for (entity, transform) in letters.iter() {
        let color = if selection.contains(entity) {
            LETTER_EDGE_SELECTED
        } else {
            LETTER_EDGE
        };
        gizmos.circle_2d(
            transform.translation.truncate(),
            config.letter_radius,
            Color::from(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubbles_stay_inside_broth() {
        for step in 0..100 {
            let t = step as f32 * 0.37;
            for i in 0..8 {
                let (pos, size) = bubble_state(i, 8, t);
                assert!(pos.length() <= 80.0 + 40.0 + 10.0 + 1e-3);
                assert!((1.0..=5.0).contains(&size));
            }
        }
    }

    #[test]
    fn waves_are_closed_and_near_their_base_radius() {
        let points = wave_points(280.0, 1, 3.0);
        assert_eq!(points.first(), points.last());
        for p in &points {
            assert!((p.length() - 210.0).abs() <= 3.0 + 1e-3);
        }
    }

    #[test]
    fn selection_swaps_disc_and_badge() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Selection>();

        let (disc, disc_selected, shadow) = {
            let mut meshes = app.world_mut().resource_mut::<Assets<Mesh>>();
            (
                meshes.add(disc_mesh(30.0, 8)),
                meshes.add(disc_mesh(30.0, 8)),
                meshes.add(disc_mesh(30.0, 8)),
            )
        };
        app.insert_resource(LetterAssets {
            disc: disc.clone(),
            disc_selected: disc_selected.clone(),
            shadow,
            white: Handle::default(),
            shadow_material: Handle::default(),
        });

        let letter = app
            .world_mut()
            .spawn((Letter { glyph: 'S', id: 0 }, Mesh2d(disc.clone())))
            .id();
        let badge = app
            .world_mut()
            .spawn((LetterBadge, Text2d::new(""), ChildOf(letter)))
            .id();

        app.world_mut().resource_mut::<Selection>().push(letter);
        app.add_systems(Update, letter_selection_visual_system);
        app.update();

        assert_eq!(app.world().get::<Mesh2d>(letter).unwrap().0, disc_selected);
        assert_eq!(app.world().get::<Text2d>(badge).unwrap().0, "1");

        app.world_mut().resource_mut::<Selection>().clear();
        app.update();
        assert_eq!(app.world().get::<Mesh2d>(letter).unwrap().0, disc);
        assert_eq!(app.world().get::<Text2d>(badge).unwrap().0, "");
    }
}
