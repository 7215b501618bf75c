//! Synthetic broth forces: buoyancy, swirl current and a speed cap.
//!
//! Rapier knows nothing about fluids.  Every frame [`fluid_force_system`]
//! overwrites each submerged letter's `ExternalForce` with a bobbing upward lift
//! plus a tangential current, then clamps its speed.  Letters that have been
//! pushed past the active radius (usually by a drag) get no force at all and
//! rely on the bowl walls to bring them back.

use crate::config::GameConfig;
use crate::letters::Letter;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Fluid acceleration on a letter at `offset` from the bowl centre.
///
/// `jitter_sample` is a uniform sample in `[-0.5, 0.5)` supplied by the caller
/// so the function itself stays deterministic.  Returns `None` when the letter
/// is not strictly inside `bowl_radius - letter_radius`.
pub fn fluid_acceleration(
    offset: Vec2,
    elapsed_secs: f32,
    id: u32,
    jitter_sample: f32,
    config: &GameConfig,
) -> Option<Vec2> {
    let active_radius = config.bowl_radius - config.letter_radius;
    if offset.length() >= active_radius {
        return None;
    }

    let wobble = (elapsed_secs * config.buoyancy_frequency + id as f32 * config.buoyancy_phase_step)
        .sin()
        * config.buoyancy_wobble;
    let buoyancy = Vec2::new(
        jitter_sample * config.current_jitter,
        config.buoyancy_lift + wobble,
    );

    // Perpendicular to the radius: counter-clockwise swirl around the centre.
    let angle = offset.y.atan2(offset.x);
    let current = Vec2::new(-angle.sin(), angle.cos()) * config.current_strength;

    Some(buoyancy + current)
}

/// Rescale `velocity` so its length does not exceed `max_speed`.
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Apply broth forces and the speed cap to every letter.
///
/// Forces are *assigned*, not accumulated: the previous frame's value is
/// replaced so nothing builds up while Rapier is paused.
pub fn fluid_force_system(
    mut query: Query<(&Letter, &Transform, &mut ExternalForce, &mut Velocity)>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let mut rng = rand::thread_rng();
    let elapsed = time.elapsed_secs();
    let mass = config.letter_mass();

    for (letter, transform, mut force, mut velocity) in query.iter_mut() {
        let offset = transform.translation.truncate();
        let jitter = rng.gen_range(-0.5_f32..0.5_f32);

        match fluid_acceleration(offset, elapsed, letter.id, jitter, &config) {
            Some(accel) => {
                force.force = accel * mass;
                velocity.linvel = clamp_speed(velocity.linvel, config.max_speed);
            }
            None => {
                force.force = Vec2::ZERO;
            }
        }
    }
}
