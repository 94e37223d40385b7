//! Asteroid field spawner
//!
//! Every `asteroid_spawn_interval` seconds a new asteroid enters from a random
//! point just outside one of the four edges, heading inward with some jitter.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use crate::config::Config;
use crate::rotate_degrees;

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit direction pointing into the arena
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }

    /// Spawn point `t` in `[0, 1]` along this edge, pushed `margin` outside it
    pub fn spawn_point(self, t: f32, width: f32, height: f32, margin: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-margin, t * height),
            Edge::Right => Vec2::new(width + margin, t * height),
            Edge::Top => Vec2::new(t * width, -margin),
            Edge::Bottom => Vec2::new(t * width, height + margin),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsteroidField {
    spawn_timer: f32,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spawn timer; returns a new asteroid when the interval elapses
    pub fn update<R: Rng>(&mut self, dt: f32, config: &Config, rng: &mut R) -> Option<Asteroid> {
        self.spawn_timer += dt;
        if self.spawn_timer <= config.asteroid_spawn_interval {
            return None;
        }
        self.spawn_timer = 0.0;
        Some(Self::spawn(config, rng))
    }

    /// Roll edge, size class, speed and heading for a fresh asteroid
    pub fn spawn<R: Rng>(config: &Config, rng: &mut R) -> Asteroid {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let kind = rng.random_range(1..=config.asteroid_kinds);
        let radius = config.asteroid_min_radius * kind as f32;

        let speed = rng.random_range(config.asteroid_min_speed..=config.asteroid_max_speed);
        let jitter = config.spawn_angle_jitter_degrees;
        let angle = rng.random_range(-jitter..=jitter);
        let velocity = rotate_degrees(edge.inward() * speed, angle);

        // Fully off-screen but still inside this asteroid's own wrap bounds
        let position = edge.spawn_point(
            rng.random_range(0.0..=1.0),
            config.screen_width,
            config.screen_height,
            radius,
        );

        Asteroid::new(position, radius, velocity, rng.random())
    }
}
