//! Physical body shared by every collidable entity
//!
//! Position, velocity, radius and liveness, plus the toroidal screen wrap and
//! circle-vs-circle overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangular playfield `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A moving circle in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    pub radius: f32,
    alive: bool,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            alive: true,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Integrate position over `dt`
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Re-enter from the opposite edge once fully past one
    ///
    /// Leaving past `dimension + radius` lands at `-radius` and vice versa.
    /// Coordinates exactly on a wrap boundary are left alone, so a second call
    /// without movement is a no-op.
    pub fn wrap_around(&mut self, arena: Arena) {
        let r = self.radius;

        if self.position.x < -r {
            self.position.x = arena.width + r;
        } else if self.position.x > arena.width + r {
            self.position.x = -r;
        }

        if self.position.y < -r {
            self.position.y = arena.height + r;
        } else if self.position.y > arena.height + r {
            self.position.y = -r;
        }
    }

    /// True when the circles overlap or touch
    pub fn collides_with(&self, other: &Body) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Flag for removal at the end of the tick
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
