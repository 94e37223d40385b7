//! Player projectile with a finite lifetime

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Arena, Body};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub body: Body,
    /// Seconds until the shot expires
    pub life_remaining: f32,
}

impl Shot {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, lifetime: f32) -> Self {
        Self {
            body: Body::new(position, radius).with_velocity(velocity),
            life_remaining: lifetime,
        }
    }

    /// Burn lifetime, then move and wrap if still alive
    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.life_remaining -= dt;
        if self.life_remaining <= 0.0 {
            self.body.kill();
            return;
        }
        self.body.advance(dt);
        self.body.wrap_around(arena);
    }
}
