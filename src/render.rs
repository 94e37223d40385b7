//! Rendering contract
//!
//! Renderers receive read-only snapshots and never feed anything back into
//! the simulation.

use crate::sim::{EntityKind, EntityView};

pub trait Renderer {
    /// Draw one frame's entities, in snapshot order
    fn draw_entities(&mut self, entities: &[EntityView]);

    /// Draw the health display
    fn draw_hud(&mut self, health: u32, max_health: u32);
}

/// Health bar as text, e.g. `HP [##-] 2/3`
pub fn hud_text(health: u32, max_health: u32) -> String {
    let filled = health.min(max_health) as usize;
    let empty = max_health as usize - filled;
    format!("HP [{}{}] {}/{}", "#".repeat(filled), "-".repeat(empty), health, max_health)
}

/// Headless renderer that summarizes frames through the `log` facade
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn draw_entities(&mut self, entities: &[EntityView]) {
        self.frames += 1;
        let count = |kind: EntityKind| entities.iter().filter(|e| e.kind == kind).count();
        log::trace!(
            "frame {}: {} asteroids, {} shots, {} explosions",
            self.frames,
            count(EntityKind::Asteroid),
            count(EntityKind::Shot),
            count(EntityKind::Explosion)
        );
    }

    fn draw_hud(&mut self, health: u32, max_health: u32) {
        log::trace!("{}", hud_text(health, max_health));
    }
}
