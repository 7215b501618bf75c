//! Centralised gameplay, physics and rendering constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  [`crate::config::GameConfig::default`] mirrors every value; the
//! runtime copy can be overridden from `assets/soup.toml`.
//!
//! ## Units
//!
//! World units are pixels (`pixels_per_meter(1.0)`), time is seconds.  Fluid
//! "forces" are expressed as accelerations (px/s²) and scaled by body mass when
//! applied, so retuning the letter density does not change how the broth feels.

// ── Play field ────────────────────────────────────────────────────────────────

/// Window / play-field width in pixels.
pub const FIELD_WIDTH: f32 = 800.0;

/// Window / play-field height in pixels.
pub const FIELD_HEIGHT: f32 = 600.0;

// ── Bowl ──────────────────────────────────────────────────────────────────────

/// Inner radius of the bowl boundary.
pub const BOWL_RADIUS: f32 = 280.0;

/// Number of static chord segments approximating the bowl circle.
///
/// 32 is enough that a letter of radius 30 can never slip between two walls.
pub const WALL_SEGMENTS: u32 = 32;

/// Thickness of each wall cuboid.
pub const WALL_THICKNESS: f32 = 20.0;

// ── Letters ───────────────────────────────────────────────────────────────────

/// Collider / visual radius of a letter disc.
pub const LETTER_RADIUS: f32 = 30.0;

/// Minimum number of letters in the bowl; filler letters pad the target word
/// up to this count.
pub const LETTER_COUNT: usize = 20;

/// Letter bounciness.
pub const LETTER_RESTITUTION: f32 = 0.4;

/// Letter surface friction.
pub const LETTER_FRICTION: f32 = 0.1;

/// Linear damping standing in for broth drag.
///
/// A Matter-style per-tick air friction of 0.08 at 60 Hz decays velocity by
/// `0.92^60` per second, which is an exponential rate of about 5.0.
pub const LETTER_LINEAR_DAMPING: f32 = 5.0;

/// Very low density so letters feel like pasta afloat.
pub const LETTER_DENSITY: f32 = 0.0005;

/// Initial per-axis speed spread (px/s); each axis is drawn from ±half of this.
pub const LETTER_INITIAL_SPEED: f32 = 60.0;

/// Inner and outer distance of the initial spawn ring from the bowl centre.
pub const LETTER_SPAWN_MIN_DIST: f32 = 50.0;
pub const LETTER_SPAWN_MAX_DIST: f32 = 150.0;

// ── Fluid forces ──────────────────────────────────────────────────────────────

/// Downward gravity (px/s²).  Kept weak: the broth is meant to hold letters up.
pub const GRAVITY: f32 = 30.0;

/// Constant upward buoyancy acceleration (px/s²).
pub const BUOYANCY_LIFT: f32 = 36.0;

/// Amplitude of the time-varying buoyancy term (px/s²).
pub const BUOYANCY_WOBBLE: f32 = 48.0;

/// Angular frequency of the buoyancy wobble (rad/s).
pub const BUOYANCY_FREQUENCY: f32 = 0.8;

/// Per-letter phase offset of the wobble (rad per letter id).
pub const BUOYANCY_PHASE_STEP: f32 = 0.5;

/// Full width of the random horizontal jitter (px/s²).
pub const CURRENT_JITTER: f32 = 12.0;

/// Magnitude of the tangential swirl (px/s²).
pub const CURRENT_STRENGTH: f32 = 6.0;

/// Hard cap on letter speed inside the broth (px/s).
pub const MAX_LETTER_SPEED: f32 = 180.0;

// ── Selection & celebration ───────────────────────────────────────────────────

/// Delay between spelling the word and advancing to the next one.
pub const ADVANCE_DELAY_SECS: f32 = 1.5;

/// Duration of the brightness flash after a completed word.
pub const FLASH_SECS: f32 = 0.2;

/// Brightness multiplier applied to the broth during the flash.
pub const FLASH_BRIGHTNESS: f32 = 1.3;

/// Velocity change (px/s) imparted to every letter on a completed word.
pub const CELEBRATION_SPEED: f32 = 240.0;

/// Stiffness of the drag spring pulling a grabbed letter to the cursor.
///
/// Fraction of the remaining gap closed per 60 Hz tick.
pub const DRAG_STIFFNESS: f32 = 0.2;

// ── Steam ─────────────────────────────────────────────────────────────────────

/// Size of the recycled steam particle pool.
pub const STEAM_PARTICLES: usize = 15;

/// Opacity lost per second.
pub const STEAM_FADE_RATE: f32 = 0.12;

/// Radius gained per second.
pub const STEAM_GROWTH_RATE: f32 = 12.0;

/// Rise speed range (px/s).
pub const STEAM_MIN_SPEED: f32 = 30.0;
pub const STEAM_MAX_SPEED: f32 = 90.0;

/// Full width of the horizontal drift range (px/s).
pub const STEAM_DRIFT: f32 = 30.0;

// ── Decoration ────────────────────────────────────────────────────────────────

/// Number of orbiting bubbles drawn in the broth.
pub const BUBBLE_COUNT: u32 = 8;

/// Number of animated wave outlines.
pub const WAVE_COUNT: u32 = 3;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size of the score / target HUD.
pub const HUD_FONT_SIZE: f32 = 22.0;

/// Font size of a letter's glyph.
pub const LETTER_FONT_SIZE: f32 = 24.0;

/// Font size of the selection order badge.
pub const BADGE_FONT_SIZE: f32 = 12.0;

// ── Words ─────────────────────────────────────────────────────────────────────

/// Built-in candidate target words.
pub const DEFAULT_WORDS: &[&str] = &[
    "REQUISITOS",
    "ANALISIS",
    "DISEÑO",
    "IMPLEMENTACION",
    "PRUEBAS",
    "DESPLIEGUE",
    "MANTENIMIENTO",
];

/// Alphabet filler letters are drawn from.
pub const FILLER_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
