//! Session state and entity bookkeeping
//!
//! The `Session` owns every live entity, the player's health and the
//! Menu / Playing / GameOver state. It is the only thing that mutates them;
//! per-tick logic lives in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, SplitRule};
use super::body::Arena;
use super::explosion::Explosion;
use super::field::AsteroidField;
use super::player::Player;
use super::shot::Shot;
use crate::config::{Config, ConfigError};
use crate::render::Renderer;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Title menu, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Health ran out; entities frozen until restart
    GameOver,
}

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuOption {
    #[default]
    Start,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 2] = [MenuOption::Start, MenuOption::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Start => "Start",
            MenuOption::Quit => "Quit",
        }
    }

    fn index(self) -> usize {
        match self {
            MenuOption::Start => 0,
            MenuOption::Quit => 1,
        }
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let i = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[i as usize]
    }
}

/// Something that happened during a tick or transition, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted,
    AsteroidSpawned { radius: f32 },
    ShotFired,
    AsteroidSplit { radius: f32 },
    AsteroidDestroyed { radius: f32 },
    PlayerHit { health: u32 },
    GameOver,
    ReturnedToMenu,
    QuitRequested,
}

/// Entity category, for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Asteroid,
    Shot,
    Explosion,
}

/// Read-only snapshot of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub radius: f32,
    /// Heading in degrees (player only, 0 otherwise)
    pub rotation: f32,
    pub invulnerable: bool,
    /// Asteroid shape seed (0 for other kinds)
    pub visual_seed: u64,
    /// Explosion animation progress in `[0, 1]` (0 for other kinds)
    pub progress: f32,
}

/// Capability shared by every simulated entity
pub trait Entity {
    fn is_alive(&self) -> bool;
    fn view(&self) -> EntityView;
}

/// Entities that advance on their own each tick
///
/// The player is not one of them: it is driven by the tick's input.
pub trait Simulated: Entity {
    fn update(&mut self, dt: f32, arena: Arena);
}

impl Simulated for Asteroid {
    fn update(&mut self, dt: f32, arena: Arena) {
        Asteroid::update(self, dt, arena);
    }
}

impl Simulated for Shot {
    fn update(&mut self, dt: f32, arena: Arena) {
        Shot::update(self, dt, arena);
    }
}

impl Simulated for Explosion {
    fn update(&mut self, dt: f32, _arena: Arena) {
        Explosion::update(self, dt);
    }
}

impl Entity for Player {
    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn view(&self) -> EntityView {
        EntityView {
            kind: EntityKind::Player,
            position: self.body.position,
            radius: self.body.radius,
            rotation: self.rotation,
            invulnerable: self.is_invulnerable(),
            visual_seed: 0,
            progress: 0.0,
        }
    }
}

impl Entity for Asteroid {
    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn view(&self) -> EntityView {
        EntityView {
            kind: EntityKind::Asteroid,
            position: self.body.position,
            radius: self.body.radius,
            rotation: 0.0,
            invulnerable: false,
            visual_seed: self.visual_seed,
            progress: 0.0,
        }
    }
}

impl Entity for Shot {
    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn view(&self) -> EntityView {
        EntityView {
            kind: EntityKind::Shot,
            position: self.body.position,
            radius: self.body.radius,
            rotation: self.body.velocity.to_angle().to_degrees() - 90.0,
            invulnerable: false,
            visual_seed: 0,
            progress: 0.0,
        }
    }
}

impl Entity for Explosion {
    fn is_alive(&self) -> bool {
        Explosion::is_alive(self)
    }

    fn view(&self) -> EntityView {
        EntityView {
            kind: EntityKind::Explosion,
            position: self.position,
            radius: self.radius,
            rotation: 0.0,
            invulnerable: false,
            visual_seed: 0,
            progress: self.progress(),
        }
    }
}

/// Borrowed view of every live collection, grouped by kind
#[derive(Debug, Clone, Copy)]
pub struct EntitiesByKind<'a> {
    pub player: Option<&'a Player>,
    pub asteroids: &'a [Asteroid],
    pub shots: &'a [Shot],
    pub explosions: &'a [Explosion],
}

/// Advance every entity in a collection, in order
pub(crate) fn update_all<T: Simulated>(entities: &mut [T], dt: f32, arena: Arena) {
    for entity in entities {
        entity.update(dt, arena);
    }
}

/// Drop every entity flagged dead
pub(crate) fn prune<T: Entity>(entities: &mut Vec<T>) {
    entities.retain(|e| e.is_alive());
}

/// One play session: menu, runs, game over, repeat
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: Config,
    pub(crate) arena: Arena,
    pub(crate) split_rule: SplitRule,
    pub(crate) rng: Pcg32,
    pub(crate) state: GameState,
    pub(crate) selected_option: MenuOption,
    pub(crate) quit_requested: bool,
    pub(crate) health: u32,
    /// Seconds of post-hit grace left
    pub(crate) invuln_remaining: f32,
    pub(crate) player: Option<Player>,
    pub(crate) asteroids: Vec<Asteroid>,
    pub(crate) shots: Vec<Shot>,
    pub(crate) explosions: Vec<Explosion>,
    pub(crate) field: AsteroidField,
    pub(crate) events: Vec<GameEvent>,
    /// Playing ticks since the current game started
    pub(crate) time_ticks: u64,
}

impl Session {
    /// Build a session in the Menu state
    ///
    /// Fails if the config would break simulation invariants.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let split_rule = SplitRule {
            min_radius: config.asteroid_min_radius,
            angle_min_degrees: config.split_angle_min_degrees,
            angle_max_degrees: config.split_angle_max_degrees,
            speed_multiplier: config.split_speed_multiplier,
        };
        Ok(Self {
            arena: config.arena(),
            split_rule,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::Menu,
            selected_option: MenuOption::Start,
            quit_requested: false,
            health: config.max_health,
            invuln_remaining: 0.0,
            player: None,
            asteroids: Vec::new(),
            shots: Vec::new(),
            explosions: Vec::new(),
            field: AsteroidField::new(),
            events: Vec::new(),
            time_ticks: 0,
            config,
        })
    }

    // === Queries ===

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.config.max_health
    }

    pub fn invuln_remaining(&self) -> f32 {
        self.invuln_remaining
    }

    pub fn selected_option(&self) -> MenuOption {
        self.selected_option
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn entities_by_kind(&self) -> EntitiesByKind<'_> {
        EntitiesByKind {
            player: self.player.as_ref(),
            asteroids: &self.asteroids,
            shots: &self.shots,
            explosions: &self.explosions,
        }
    }

    /// Flat snapshot in draw order: player, asteroids, shots, explosions
    pub fn snapshot(&self) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(
            1 + self.asteroids.len() + self.shots.len() + self.explosions.len(),
        );
        views.extend(self.player.iter().map(Entity::view));
        views.extend(self.asteroids.iter().map(Entity::view));
        views.extend(self.shots.iter().map(Entity::view));
        views.extend(self.explosions.iter().map(Entity::view));
        views
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand the current frame to a renderer
    pub fn present<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw_entities(&self.snapshot());
        renderer.draw_hud(self.health, self.config.max_health);
    }

    // === Commands ===

    /// Menu -> Playing with a fresh world
    pub fn start_new_game(&mut self) {
        if self.state != GameState::Menu {
            log::warn!("start_new_game ignored in {:?}", self.state);
            return;
        }

        self.clear_entities();
        self.player = Some(Player::new(self.arena.center(), self.config.player_radius));
        self.health = self.config.max_health;
        self.invuln_remaining = 0.0;
        self.field = AsteroidField::new();
        self.time_ticks = 0;
        self.state = GameState::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("New game started (health {})", self.health);
    }

    /// Ask the host loop to shut down
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            self.quit_requested = true;
            self.events.push(GameEvent::QuitRequested);
            log::info!("Quit requested from {:?}", self.state);
        }
    }

    /// GameOver -> Menu, discarding the finished run
    pub fn restart_to_menu(&mut self) {
        if self.state != GameState::GameOver {
            log::warn!("restart_to_menu ignored in {:?}", self.state);
            return;
        }

        self.clear_entities();
        self.selected_option = MenuOption::Start;
        self.state = GameState::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu");
    }

    pub fn select_next(&mut self) {
        if self.state == GameState::Menu {
            self.selected_option = self.selected_option.offset(1);
        }
    }

    pub fn select_previous(&mut self) {
        if self.state == GameState::Menu {
            self.selected_option = self.selected_option.offset(-1);
        }
    }

    /// Activate the highlighted menu entry
    pub fn confirm_selection(&mut self) {
        if self.state != GameState::Menu {
            log::warn!("confirm_selection ignored in {:?}", self.state);
            return;
        }
        match self.selected_option {
            MenuOption::Start => self.start_new_game(),
            MenuOption::Quit => self.request_quit(),
        }
    }

    fn clear_entities(&mut self) {
        self.player = None;
        self.asteroids.clear();
        self.shots.clear();
        self.explosions.clear();
    }

    /// Remove everything flagged dead this tick
    pub(crate) fn prune_dead(&mut self) {
        if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
            self.player = None;
        }
        prune(&mut self.asteroids);
        prune(&mut self.shots);
        prune(&mut self.explosions);
    }

    /// Insert an asteroid directly (scripted waves, tests)
    pub fn spawn_asteroid(&mut self, asteroid: Asteroid) {
        self.events.push(GameEvent::AsteroidSpawned {
            radius: asteroid.body.radius,
        });
        self.asteroids.push(asteroid);
    }
}
