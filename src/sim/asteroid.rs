//! Drifting asteroid and its fragmentation rule

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Arena, Body};
use crate::rotate_degrees;

/// Parameters for [`Asteroid::split`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRule {
    /// Radius at or below which an asteroid shatters without children;
    /// also the amount each generation shrinks by
    pub min_radius: f32,
    pub angle_min_degrees: f32,
    pub angle_max_degrees: f32,
    pub speed_multiplier: f32,
}

impl Default for SplitRule {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            min_radius: ASTEROID_MIN_RADIUS,
            angle_min_degrees: SPLIT_ANGLE_MIN_DEGREES,
            angle_max_degrees: SPLIT_ANGLE_MAX_DEGREES,
            speed_multiplier: SPLIT_SPEED_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    /// Shape/texture variation for the renderer; never read by the simulation
    pub visual_seed: u64,
}

impl Asteroid {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2, visual_seed: u64) -> Self {
        Self {
            body: Body::new(position, radius).with_velocity(velocity),
            visual_seed,
        }
    }

    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.body.advance(dt);
        self.body.wrap_around(arena);
    }

    /// Destroy this asteroid, returning two smaller fragments if it is big enough
    ///
    /// Fragments spawn at the parent's position with radius reduced by
    /// `min_radius`, velocities rotated by `±θ` (θ uniform in the rule's angle
    /// range) and scaled by the speed multiplier.
    pub fn split<R: Rng>(&mut self, rng: &mut R, rule: &SplitRule) -> Option<[Asteroid; 2]> {
        self.body.kill();
        if self.body.radius <= rule.min_radius {
            return None;
        }

        let angle = rng.random_range(rule.angle_min_degrees..=rule.angle_max_degrees);
        let v1 = rotate_degrees(self.body.velocity, angle) * rule.speed_multiplier;
        let v2 = rotate_degrees(self.body.velocity, -angle) * rule.speed_multiplier;
        let radius = self.body.radius - rule.min_radius;
        let position = self.body.position;

        log::debug!(
            "Asteroid split: r={} -> 2x r={} (angle {:.1})",
            self.body.radius,
            radius,
            angle
        );

        Some([
            Asteroid::new(position, radius, v1, rng.random()),
            Asteroid::new(position, radius, v2, rng.random()),
        ])
    }
}
