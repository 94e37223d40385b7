//! Game configuration
//!
//! Tuning values for a session. Loaded from JSON (partial files override only
//! the named fields) and validated before any session is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that cannot produce a playable session
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Arena ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Health ===
    pub max_health: u32,
    /// Grace window after a hit during which collisions are ignored
    pub invulnerability_seconds: f32,

    // === Player ===
    pub player_radius: f32,
    /// Degrees per second
    pub player_turn_speed: f32,
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    pub shoot_cooldown_seconds: f32,

    // === Shots ===
    pub shot_radius: f32,
    pub shot_speed: f32,
    pub shot_lifetime_seconds: f32,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    /// Number of size classes; a spawned asteroid has radius `min_radius * k`, k in 1..=kinds
    pub asteroid_kinds: u32,
    pub asteroid_spawn_interval: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub spawn_angle_jitter_degrees: f32,
    pub split_angle_min_degrees: f32,
    pub split_angle_max_degrees: f32,
    pub split_speed_multiplier: f32,

    // === Effects ===
    pub explosion_duration_seconds: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            max_health: MAX_HEALTH,
            invulnerability_seconds: INVULNERABILITY_SECONDS,

            player_radius: PLAYER_RADIUS,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            shoot_cooldown_seconds: PLAYER_SHOOT_COOLDOWN_SECONDS,

            shot_radius: SHOT_RADIUS,
            shot_speed: SHOT_SPEED,
            shot_lifetime_seconds: SHOT_LIFETIME_SECONDS,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            asteroid_spawn_interval: ASTEROID_SPAWN_INTERVAL,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            spawn_angle_jitter_degrees: SPAWN_ANGLE_JITTER_DEGREES,
            split_angle_min_degrees: SPLIT_ANGLE_MIN_DEGREES,
            split_angle_max_degrees: SPLIT_ANGLE_MAX_DEGREES,
            split_speed_multiplier: SPLIT_SPEED_MULTIPLIER,

            explosion_duration_seconds: EXPLOSION_DURATION_SECONDS,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

impl Config {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject anything that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("screen_width", self.screen_width)?;
        require_positive("screen_height", self.screen_height)?;

        if self.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: "must be at least 1",
            });
        }
        require_non_negative("invulnerability_seconds", self.invulnerability_seconds)?;

        require_positive("player_radius", self.player_radius)?;
        require_non_negative("player_turn_speed", self.player_turn_speed)?;
        require_non_negative("player_acceleration", self.player_acceleration)?;
        require_positive("player_max_speed", self.player_max_speed)?;
        require_non_negative("shoot_cooldown_seconds", self.shoot_cooldown_seconds)?;

        require_positive("shot_radius", self.shot_radius)?;
        require_positive("shot_speed", self.shot_speed)?;
        require_positive("shot_lifetime_seconds", self.shot_lifetime_seconds)?;

        require_positive("asteroid_min_radius", self.asteroid_min_radius)?;
        if self.asteroid_kinds == 0 {
            return Err(ConfigError::Invalid {
                field: "asteroid_kinds",
                reason: "must be at least 1",
            });
        }
        require_positive("asteroid_spawn_interval", self.asteroid_spawn_interval)?;
        require_positive("asteroid_min_speed", self.asteroid_min_speed)?;
        require_positive("asteroid_max_speed", self.asteroid_max_speed)?;
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::Invalid {
                field: "asteroid_min_speed",
                reason: "must not exceed asteroid_max_speed",
            });
        }
        require_non_negative("spawn_angle_jitter_degrees", self.spawn_angle_jitter_degrees)?;
        require_non_negative("split_angle_min_degrees", self.split_angle_min_degrees)?;
        require_non_negative("split_angle_max_degrees", self.split_angle_max_degrees)?;
        if self.split_angle_min_degrees > self.split_angle_max_degrees {
            return Err(ConfigError::Invalid {
                field: "split_angle_min_degrees",
                reason: "must not exceed split_angle_max_degrees",
            });
        }
        require_positive("split_speed_multiplier", self.split_speed_multiplier)?;

        require_positive("explosion_duration_seconds", self.explosion_duration_seconds)?;
        Ok(())
    }

    /// Playfield bounds used for screen wrapping and spawning
    pub fn arena(&self) -> Arena {
        Arena::new(self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arena(), Arena::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    }

    #[test]
    fn test_partial_json_overrides_named_fields() {
        let config = Config::from_json_str(r#"{ "max_health": 5, "screen_width": 800 }"#)
            .expect("valid config");
        assert_eq!(config.max_health, 5);
        assert_eq!(config.screen_width, 800.0);
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let config = Config {
            asteroid_min_radius: 0.0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "asteroid_min_radius"),
            other => panic!("expected invalid radius, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_health() {
        let err = Config::from_json_str(r#"{ "max_health": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_health",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_health_as_parse_error() {
        let err = Config::from_json_str(r#"{ "max_health": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let config = Config {
            asteroid_min_speed: 120.0,
            asteroid_max_speed: 60.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            split_angle_min_degrees: 60.0,
            split_angle_max_degrees: 10.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = Config {
            shot_speed: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/asteroids-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
