//! Game-specific error types.
//!
//! Startup checks and config validation return these instead of panicking, so
//! the app can log a readable message and exit cleanly.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// No primary window exists, so there is nothing to draw into.
    MissingWindow,

    /// The Rapier physics backend was not registered with the app.
    MissingPhysics,

    /// The configured word list has no usable entries.
    EmptyWordBank,

    /// A configuration value is outside its usable range.
    InvalidConfig {
        /// Name of the config field (as written in `soup.toml`).
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingWindow => write!(f, "no primary window found; cannot draw the bowl"),
            GameError::MissingPhysics => write!(
                f,
                "physics backend not initialised (RapierPhysicsPlugin missing)"
            ),
            GameError::EmptyWordBank => write!(f, "word list is empty; nothing to spell"),
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(f, "config '{}' = {} is outside range {}", name, value, expected),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(require_positive("bowl_radius", 0.0).is_err());
        assert!(require_positive("bowl_radius", f32::NAN).is_err());
        assert!(require_positive("bowl_radius", 1.0).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(require_non_negative("advance_delay_secs", 0.0).is_ok());
        assert!(require_non_negative("advance_delay_secs", -0.1).is_err());
    }

    #[test]
    fn invalid_config_message_names_field() {
        let err = GameError::InvalidConfig {
            name: "max_speed",
            value: -1.0,
            expected: "(0.0, ∞)",
        };
        assert!(err.to_string().contains("max_speed"));
    }
}
