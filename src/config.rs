//! Runtime game configuration loaded from `assets/soup.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/soup.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! letter_count = 24
//! words = ["SOPA", "FIDEO", "CALDO"]
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{require_non_negative, require_positive, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/soup.toml";

/// Runtime-tunable gameplay, physics and rendering configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Play field ────────────────────────────────────────────────────────────
    pub field_width: f32,
    pub field_height: f32,

    // ── Bowl ──────────────────────────────────────────────────────────────────
    pub bowl_radius: f32,
    pub wall_segments: u32,
    pub wall_thickness: f32,

    // ── Letters ───────────────────────────────────────────────────────────────
    pub letter_radius: f32,
    pub letter_count: usize,
    pub letter_restitution: f32,
    pub letter_friction: f32,
    pub letter_linear_damping: f32,
    pub letter_density: f32,
    pub letter_initial_speed: f32,
    pub letter_spawn_min_dist: f32,
    pub letter_spawn_max_dist: f32,

    // ── Fluid forces ──────────────────────────────────────────────────────────
    pub gravity: f32,
    pub buoyancy_lift: f32,
    pub buoyancy_wobble: f32,
    pub buoyancy_frequency: f32,
    pub buoyancy_phase_step: f32,
    pub current_jitter: f32,
    pub current_strength: f32,
    pub max_speed: f32,

    // ── Selection & celebration ───────────────────────────────────────────────
    pub advance_delay_secs: f32,
    pub flash_secs: f32,
    pub flash_brightness: f32,
    pub celebration_speed: f32,
    pub drag_stiffness: f32,

    // ── Steam ─────────────────────────────────────────────────────────────────
    pub steam_particles: usize,
    pub steam_fade_rate: f32,
    pub steam_growth_rate: f32,
    pub steam_min_speed: f32,
    pub steam_max_speed: f32,
    pub steam_drift: f32,

    // ── Decoration / HUD ──────────────────────────────────────────────────────
    pub bubble_count: u32,
    pub wave_count: u32,
    pub hud_font_size: f32,
    pub letter_font_size: f32,
    pub badge_font_size: f32,

    // ── Words ─────────────────────────────────────────────────────────────────
    pub words: Vec<String>,
    pub filler_alphabet: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Play field
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            // Bowl
            bowl_radius: BOWL_RADIUS,
            wall_segments: WALL_SEGMENTS,
            wall_thickness: WALL_THICKNESS,
            // Letters
            letter_radius: LETTER_RADIUS,
            letter_count: LETTER_COUNT,
            letter_restitution: LETTER_RESTITUTION,
            letter_friction: LETTER_FRICTION,
            letter_linear_damping: LETTER_LINEAR_DAMPING,
            letter_density: LETTER_DENSITY,
            letter_initial_speed: LETTER_INITIAL_SPEED,
            letter_spawn_min_dist: LETTER_SPAWN_MIN_DIST,
            letter_spawn_max_dist: LETTER_SPAWN_MAX_DIST,
            // Fluid forces
            gravity: GRAVITY,
            buoyancy_lift: BUOYANCY_LIFT,
            buoyancy_wobble: BUOYANCY_WOBBLE,
            buoyancy_frequency: BUOYANCY_FREQUENCY,
            buoyancy_phase_step: BUOYANCY_PHASE_STEP,
            current_jitter: CURRENT_JITTER,
            current_strength: CURRENT_STRENGTH,
            max_speed: MAX_LETTER_SPEED,
            // Selection & celebration
            advance_delay_secs: ADVANCE_DELAY_SECS,
            flash_secs: FLASH_SECS,
            flash_brightness: FLASH_BRIGHTNESS,
            celebration_speed: CELEBRATION_SPEED,
            drag_stiffness: DRAG_STIFFNESS,
            // Steam
            steam_particles: STEAM_PARTICLES,
            steam_fade_rate: STEAM_FADE_RATE,
            steam_growth_rate: STEAM_GROWTH_RATE,
            steam_min_speed: STEAM_MIN_SPEED,
            steam_max_speed: STEAM_MAX_SPEED,
            steam_drift: STEAM_DRIFT,
            // Decoration / HUD
            bubble_count: BUBBLE_COUNT,
            wave_count: WAVE_COUNT,
            hud_font_size: HUD_FONT_SIZE,
            letter_font_size: LETTER_FONT_SIZE,
            badge_font_size: BADGE_FONT_SIZE,
            // Words
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            filler_alphabet: FILLER_ALPHABET.to_string(),
        }
    }
}

impl GameConfig {
    /// Check every value that would break the simulation if misconfigured.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        require_positive("bowl_radius", self.bowl_radius)?;
        require_positive("wall_thickness", self.wall_thickness)?;
        require_positive("letter_radius", self.letter_radius)?;
        require_positive("letter_density", self.letter_density)?;
        require_positive("max_speed", self.max_speed)?;
        require_non_negative("letter_linear_damping", self.letter_linear_damping)?;
        require_non_negative("letter_spawn_min_dist", self.letter_spawn_min_dist)?;
        require_non_negative("advance_delay_secs", self.advance_delay_secs)?;
        require_non_negative("flash_secs", self.flash_secs)?;
        require_non_negative("steam_min_speed", self.steam_min_speed)?;

        if self.wall_segments < 3 {
            return Err(GameError::InvalidConfig {
                name: "wall_segments",
                value: self.wall_segments as f32,
                expected: "[3, ∞)",
            });
        }
        if self.letter_radius >= self.bowl_radius {
            return Err(GameError::InvalidConfig {
                name: "letter_radius",
                value: self.letter_radius,
                expected: "(0.0, bowl_radius)",
            });
        }
        if self.letter_spawn_max_dist <= self.letter_spawn_min_dist {
            return Err(GameError::InvalidConfig {
                name: "letter_spawn_max_dist",
                value: self.letter_spawn_max_dist,
                expected: "(letter_spawn_min_dist, ∞)",
            });
        }
        // Letters must start fully inside the walls.
        if self.letter_spawn_max_dist + self.letter_radius >= self.bowl_radius {
            return Err(GameError::InvalidConfig {
                name: "letter_spawn_max_dist",
                value: self.letter_spawn_max_dist,
                expected: "(letter_spawn_min_dist, bowl_radius - letter_radius)",
            });
        }
        if self.steam_max_speed <= self.steam_min_speed {
            return Err(GameError::InvalidConfig {
                name: "steam_max_speed",
                value: self.steam_max_speed,
                expected: "(steam_min_speed, ∞)",
            });
        }
        if self.filler_alphabet.chars().next().is_none() {
            return Err(GameError::InvalidConfig {
                name: "filler_alphabet",
                value: 0.0,
                expected: "at least one character",
            });
        }
        if !self.words.iter().any(|w| !w.trim().is_empty()) {
            return Err(GameError::EmptyWordBank);
        }
        Ok(())
    }

    /// Mass of one letter disc, used to turn configured accelerations into forces.
    pub fn letter_mass(&self) -> f32 {
        self.letter_density * std::f32::consts::PI * self.letter_radius * self.letter_radius
    }
}

/// Parse a TOML document into a validated [`GameConfig`].
pub fn parse_game_config(contents: &str) -> Result<GameConfig, String> {
    let loaded = toml::from_str::<GameConfig>(contents).map_err(|e| e.to_string())?;
    loaded.validate().map_err(|e| e.to_string())?;
    Ok(loaded)
}

/// Startup system: attempt to load `assets/soup.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// A missing file is not an error.  Parse or validation errors are logged and
/// the compiled defaults stay in place.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match parse_game_config(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[SETUP] Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Failed to load {CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("[SETUP] No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
