//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` and commands only
//! - Seeded RNG only
//! - Update, then resolve collisions, then prune dead entities
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod body;
pub mod explosion;
pub mod field;
pub mod player;
pub mod shot;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, SplitRule};
pub use body::{Arena, Body};
pub use explosion::Explosion;
pub use field::{AsteroidField, Edge};
pub use player::Player;
pub use shot::Shot;
pub use state::{
    EntitiesByKind, Entity, EntityKind, EntityView, GameEvent, GameState, MenuOption, Session,
    Simulated,
};
pub use tick::{Command, TickInput};
