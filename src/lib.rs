//! Asteroids - A screen-wrapping arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state machine)
//! - `config`: Validated game tuning, loadable from JSON
//! - `assets`: Texture provisioning contract with primitive fallback
//! - `render`: Read-only rendering contract

pub mod assets;
pub mod config;
pub mod render;
pub mod sim;

pub use config::{Config, ConfigError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player health and post-hit grace window
    pub const MAX_HEALTH: u32 = 3;
    pub const INVULNERABILITY_SECONDS: f32 = 2.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_TURN_SPEED: f32 = 300.0; // degrees per second
    pub const PLAYER_ACCELERATION: f32 = 400.0;
    pub const PLAYER_MAX_SPEED: f32 = 350.0;
    pub const PLAYER_SHOOT_COOLDOWN_SECONDS: f32 = 0.3;

    /// Shots
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_SPEED: f32 = 500.0;
    pub const SHOT_LIFETIME_SECONDS: f32 = 1.2;

    /// Asteroids
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_SPAWN_INTERVAL: f32 = 0.8;
    pub const ASTEROID_MIN_SPEED: f32 = 40.0;
    pub const ASTEROID_MAX_SPEED: f32 = 100.0;
    /// Spawn heading deviates from the inward edge normal by up to this many degrees
    pub const SPAWN_ANGLE_JITTER_DEGREES: f32 = 30.0;

    /// Fragmentation
    pub const SPLIT_ANGLE_MIN_DEGREES: f32 = 20.0;
    pub const SPLIT_ANGLE_MAX_DEGREES: f32 = 50.0;
    pub const SPLIT_SPEED_MULTIPLIER: f32 = 1.2;

    /// Explosion lifetime when no animated asset supplies its own
    pub const EXPLOSION_DURATION_SECONDS: f32 = 0.45;
}

/// Rotate a vector counter-clockwise by `degrees`
///
/// A zero vector stays zero.
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit forward vector for a heading in degrees (0 = +Y)
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    rotate_degrees(Vec2::Y, rotation)
}

/// Rescale `v` to exactly `max` length if it is longer, keeping direction
#[inline]
pub fn clamp_speed(v: Vec2, max: f32) -> Vec2 {
    if v.length_squared() > max * max {
        v.normalize_or_zero() * max
    } else {
        v
    }
}
