//! Letter bodies: building the letter set for a target word and spawning the
//! Rapier bodies that float in the broth.
//!
//! The set always holds every character of the target word plus random filler
//! letters up to [`GameConfig::letter_count`], shuffled so the target never
//! appears in order around the spawn ring.  Visual components are attached
//! separately by [`crate::rendering::attach_letter_visuals_system`] so the
//! bodies can be spawned in headless tests.

use crate::config::GameConfig;
use crate::words::word_len;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

/// A floating letter body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    /// Character printed on the disc.
    pub glyph: char,
    /// Position in the spawn order; offsets the buoyancy phase so letters bob
    /// out of step with each other.
    pub id: u32,
}

/// Characters for one bowl: the target's letters plus filler, shuffled.
///
/// Always returns `max(len(word), count)` characters and contains every
/// character of `word` with its multiplicity.  An empty `alphabet` yields no
/// filler.
pub fn build_letter_set(word: &str, count: usize, alphabet: &str, rng: &mut impl Rng) -> Vec<char> {
    let filler: Vec<char> = alphabet.chars().collect();
    let mut letters: Vec<char> = word.chars().collect();
    let target = word_len(word).max(count);

    while letters.len() < target {
        match filler.choose(rng) {
            Some(&c) => letters.push(c),
            None => break,
        }
    }

    letters.shuffle(rng);
    letters
}

/// Initial position of letter `index` of `total` on a ragged ring around `center`.
pub fn letter_spawn_position(
    center: Vec2,
    index: usize,
    total: usize,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec2 {
    let angle = index as f32 / total.max(1) as f32 * TAU;
    let dist = rng.gen_range(config.letter_spawn_min_dist..config.letter_spawn_max_dist);
    center + Vec2::from_angle(angle) * dist
}

/// Spawn one body per character; returns the new entities in spawn order.
pub fn spawn_letter_set(
    commands: &mut Commands,
    target: &str,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let glyphs = build_letter_set(target, config.letter_count, &config.filler_alphabet, rng);
    let total = glyphs.len();
    let half_speed = config.letter_initial_speed * 0.5;

    glyphs
        .into_iter()
        .enumerate()
        .map(|(index, glyph)| {
            let position = letter_spawn_position(Vec2::ZERO, index, total, config, rng);
            let velocity = if half_speed > 0.0 {
                Vec2::new(
                    rng.gen_range(-half_speed..half_speed),
                    rng.gen_range(-half_speed..half_speed),
                )
            } else {
                Vec2::ZERO
            };

            commands
                .spawn((
                    (
                        Letter {
                            glyph,
                            id: index as u32,
                        },
                        Transform::from_translation(position.extend(1.0)),
                        GlobalTransform::default(),
                        Visibility::default(),
                    ),
                    (
                        RigidBody::Dynamic,
                        Collider::ball(config.letter_radius),
                        ColliderMassProperties::Density(config.letter_density),
                        Restitution::coefficient(config.letter_restitution),
                        Friction::coefficient(config.letter_friction),
                        Damping {
                            linear_damping: config.letter_linear_damping,
                            angular_damping: 0.0,
                        },
                        // Glyphs are drawn upright; a spinning disc would be invisible anyway.
                        LockedAxes::ROTATION_LOCKED,
                        Velocity::linear(velocity),
                        ExternalForce::default(),
                        ExternalImpulse::default(),
                        Sleeping::disabled(),
                    ),
                ))
                .id()
        })
        .collect()
}

/// Despawn every existing letter and spawn a fresh set for `target`.
///
/// The caller owns clearing the selection; stale entity ids must not survive
/// a rebuild.
pub fn rebuild_letters(
    commands: &mut Commands,
    existing: impl IntoIterator<Item = Entity>,
    target: &str,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    for entity in existing {
        commands.entity(entity).despawn();
    }
    spawn_letter_set(commands, target, config, rng)
}
