//! Transient explosion effect
//!
//! Visual only: explosions never collide. They exist so the renderer can
//! animate the burst, and they expire on their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub position: Vec2,
    pub radius: f32,
    /// Seconds since spawn
    pub elapsed: f32,
    pub duration: f32,
    alive: bool,
}

impl Explosion {
    pub fn new(position: Vec2, radius: f32, duration: f32) -> Self {
        Self {
            position,
            radius,
            elapsed: 0.0,
            duration,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.alive = false;
        }
    }

    /// Animation progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.max(1e-6)).min(1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_expires_at_duration() {
        let mut e = Explosion::new(Vec2::ZERO, 30.0, 0.5);
        e.update(0.25);
        assert!(e.is_alive());
        assert!((e.progress() - 0.5).abs() < 1e-6);
        e.update(0.25);
        assert!(!e.is_alive());
        assert_eq!(e.progress(), 1.0);
    }
}
