//! Static bowl boundary: a ring of fixed cuboid colliders approximating a circle.

use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::f32::consts::TAU;

/// Marker for one static wall segment of the bowl.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BowlWall;

/// Geometry of a single chord wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    /// Centre of the chord in world space.
    pub midpoint: Vec2,
    /// Chord length.
    pub length: f32,
    /// Rotation of the chord about Z (radians).
    pub angle: f32,
}

/// Split a circle of `radius` around `center` into `segments` chords.
///
/// Chord `i` joins the points at angles `i/n·τ` and `(i+1)/n·τ`.
pub fn bowl_wall_segments(center: Vec2, radius: f32, segments: u32) -> Vec<WallSegment> {
    let n = segments.max(3);
    (0..n)
        .map(|i| {
            let a0 = i as f32 / n as f32 * TAU;
            let a1 = (i + 1) as f32 / n as f32 * TAU;
            let p0 = center + Vec2::from_angle(a0) * radius;
            let p1 = center + Vec2::from_angle(a1) * radius;
            let delta = p1 - p0;
            WallSegment {
                midpoint: (p0 + p1) * 0.5,
                length: delta.length(),
                angle: delta.y.atan2(delta.x),
            }
        })
        .collect()
}

/// Startup system: spawn the fixed wall colliders once.  They are never touched again.
pub fn spawn_bowl_walls(mut commands: Commands, config: Res<GameConfig>) {
    let segments = bowl_wall_segments(Vec2::ZERO, config.bowl_radius, config.wall_segments);
    // Push each wall outward by half its thickness so the inner face sits on the circle.
    let half_thickness = config.wall_thickness * 0.5;
    for segment in &segments {
        let outward = segment.midpoint.normalize_or_zero() * half_thickness;
        commands.spawn((
            BowlWall,
            RigidBody::Fixed,
            // Slight overlap closes the gaps at the outer corners.
            Collider::cuboid(segment.length * 0.5 + half_thickness, half_thickness),
            Friction::coefficient(config.letter_friction),
            Transform::from_translation((segment.midpoint + outward).extend(0.0))
                .with_rotation(Quat::from_rotation_z(segment.angle)),
            GlobalTransform::default(),
        ));
    }
    info!("[SETUP] Bowl walls spawned ({} segments)", segments.len());
}
