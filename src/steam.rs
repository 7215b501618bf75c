//! Steam rising off the broth.
//!
//! A fixed pool of [`SteamParticle`] entities is spawned once.  Each frame a
//! particle rises, drifts sideways, fades and grows; when it leaves the top of
//! the play field or fades out completely it is re-seeded just above the bowl
//! rim.  Particles are never despawned.

use crate::config::GameConfig;
use bevy::prelude::*;
use rand::Rng;

/// One puff of steam.  Position lives in the entity's `Transform`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SteamParticle {
    /// Radius of the puff.
    pub size: f32,
    /// 0 = invisible, 1 = opaque white.
    pub opacity: f32,
    /// Rise speed (px/s).
    pub speed: f32,
    /// Horizontal drift (px/s).
    pub drift: f32,
}

/// Fresh puff near the top edge of the bowl.
///
/// `band` is how far below the rim the puff may start; `initial` selects the
/// fainter opacity range used when the pool is first filled.
pub fn seed_steam(config: &GameConfig, band: f32, initial: bool, rng: &mut impl Rng) -> (Vec2, SteamParticle) {
    let r = config.bowl_radius;
    let position = Vec2::new(rng.gen_range(-r..r), r - rng.gen_range(0.0..band));
    let opacity = if initial {
        rng.gen_range(0.0..0.3)
    } else {
        rng.gen_range(0.1..0.4)
    };
    let half_drift = config.steam_drift * 0.5;
    let particle = SteamParticle {
        size: rng.gen_range(10.0..30.0),
        opacity,
        speed: rng.gen_range(config.steam_min_speed..config.steam_max_speed),
        drift: if half_drift > 0.0 {
            rng.gen_range(-half_drift..half_drift)
        } else {
            0.0
        },
    };
    (position, particle)
}

/// Advance one puff by `dt`; re-seeds it in place when it is spent.
///
/// Returns `true` if the puff was recycled.
pub fn advance_steam(
    position: &mut Vec2,
    particle: &mut SteamParticle,
    dt: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> bool {
    position.y += particle.speed * dt;
    position.x += particle.drift * dt;
    particle.opacity -= config.steam_fade_rate * dt;
    particle.size += config.steam_growth_rate * dt;

    let top = config.field_height * 0.5;
    if position.y > top || particle.opacity <= 0.0 {
        let (p, fresh) = seed_steam(config, 30.0, false, rng);
        *position = p;
        *particle = fresh;
        return true;
    }
    false
}

/// Startup system: fill the steam pool.
pub fn spawn_steam_pool(mut commands: Commands, config: Res<GameConfig>) {
    let mut rng = rand::thread_rng();
    for _ in 0..config.steam_particles {
        let (position, particle) = seed_steam(&config, 50.0, true, &mut rng);
        commands.spawn((
            particle,
            // Above letters (z = 1) and the badge text.
            Transform::from_translation(position.extend(5.0)).with_scale(Vec3::splat(particle.size)),
            Visibility::default(),
        ));
    }
}

pub fn steam_update_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(&mut Transform, &mut SteamParticle)>,
) {
    let mut rng = rand::thread_rng();
    let dt = time.delta_secs();
    for (mut transform, mut particle) in query.iter_mut() {
        let mut position = transform.translation.truncate();
        advance_steam(&mut position, &mut particle, dt, &config, &mut rng);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.scale = Vec3::splat(particle.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn puff_rises_fades_and_grows() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut pos = Vec2::new(0.0, 200.0);
        let mut puff = SteamParticle {
            size: 10.0,
            opacity: 0.3,
            speed: 60.0,
            drift: 10.0,
        };
        let recycled = advance_steam(&mut pos, &mut puff, 0.5, &config, &mut rng);
        assert!(!recycled);
        assert_eq!(pos, Vec2::new(5.0, 230.0));
        assert!((puff.opacity - (0.3 - config.steam_fade_rate * 0.5)).abs() < 1e-6);
        assert!(puff.size > 10.0);
    }

    #[test]
    fn faded_puff_is_reseeded_at_rim() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut pos = Vec2::new(0.0, 0.0);
        let mut puff = SteamParticle {
            size: 40.0,
            opacity: 0.001,
            speed: 60.0,
            drift: 0.0,
        };
        assert!(advance_steam(&mut pos, &mut puff, 0.1, &config, &mut rng));
        assert!(pos.y <= config.bowl_radius && pos.y > config.bowl_radius - 30.0);
        assert!(puff.opacity >= 0.1 && puff.size < 30.0);
    }

    #[test]
    fn puff_above_field_is_reseeded() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut pos = Vec2::new(0.0, config.field_height * 0.5 - 1.0);
        let mut puff = SteamParticle {
            size: 12.0,
            opacity: 0.9,
            speed: 60.0,
            drift: 0.0,
        };
        assert!(advance_steam(&mut pos, &mut puff, 0.1, &config, &mut rng));
    }

    #[test]
    fn pool_size_never_changes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig {
            steam_fade_rate: 1000.0,
            ..Default::default()
        });
        app.add_systems(Startup, spawn_steam_pool);
        app.add_systems(Update, steam_update_system);

        for _ in 0..10 {
            app.update();
        }

        let mut query = app.world_mut().query::<&SteamParticle>();
        assert_eq!(query.iter(app.world()).count(), GameConfig::default().steam_particles);
    }
}
