//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Arena, Body};
use super::shot::Shot;
use super::tick::TickInput;
use crate::config::Config;
use crate::{clamp_speed, heading};

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Heading in degrees (0 = +Y)
    pub rotation: f32,
    /// Seconds until the next shot is allowed (never negative)
    pub shoot_cooldown_remaining: f32,
    invulnerable: bool,
    /// Time spent invulnerable, for blink effects (presentation only)
    invulnerable_visual_time: f32,
}

impl Player {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(position, radius),
            rotation: 0.0,
            shoot_cooldown_remaining: 0.0,
            invulnerable: false,
            invulnerable_visual_time: 0.0,
        }
    }

    /// Turn by `turn_speed * dt` degrees (negative dt turns the other way)
    pub fn rotate(&mut self, dt: f32, turn_speed: f32) {
        self.rotation += turn_speed * dt;
    }

    /// Accelerate along the current heading (negative dt thrusts backward)
    pub fn thrust(&mut self, dt: f32, acceleration: f32) {
        self.body.velocity += heading(self.rotation) * acceleration * dt;
    }

    /// Fire along the current heading if the cooldown allows it
    pub fn shoot(&mut self, config: &Config) -> Option<Shot> {
        if self.shoot_cooldown_remaining > 0.0 {
            return None;
        }
        self.shoot_cooldown_remaining = config.shoot_cooldown_seconds;
        Some(Shot::new(
            self.body.position,
            heading(self.rotation) * config.shot_speed,
            config.shot_radius,
            config.shot_lifetime_seconds,
        ))
    }

    /// Advance one tick: rotate, thrust, clamp, move, fire, wrap
    ///
    /// Firing happens after rotation so the shot follows this tick's heading.
    pub fn update(&mut self, dt: f32, input: &TickInput, config: &Config, arena: Arena) -> Option<Shot> {
        self.shoot_cooldown_remaining = (self.shoot_cooldown_remaining - dt).max(0.0);
        if self.invulnerable {
            self.invulnerable_visual_time += dt;
        }

        if input.rotate_left {
            self.rotate(-dt, config.player_turn_speed);
        }
        if input.rotate_right {
            self.rotate(dt, config.player_turn_speed);
        }
        if input.reverse {
            self.thrust(-dt, config.player_acceleration);
        }
        if input.thrust {
            self.thrust(dt, config.player_acceleration);
        }
        self.body.velocity = clamp_speed(self.body.velocity, config.player_max_speed);
        self.body.advance(dt);

        let shot = if input.fire { self.shoot(config) } else { None };

        self.body.wrap_around(arena);
        shot
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn set_invulnerable(&mut self, active: bool) {
        self.invulnerable = active;
        if !active {
            self.invulnerable_visual_time = 0.0;
        }
    }

    pub fn invulnerable_visual_time(&self) -> f32 {
        self.invulnerable_visual_time
    }
}
