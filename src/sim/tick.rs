//! Per-tick simulation step
//!
//! Order matters and is fixed: grace timer, entity updates, collision
//! resolution, then removal of everything flagged dead.

use serde::{Deserialize, Serialize};

use super::explosion::Explosion;
use super::state::{GameEvent, GameState, Session, update_all};

/// Discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Thrust,
    Reverse,
    Fire,
}

/// Commands held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub reverse: bool,
    pub fire: bool,
}

impl TickInput {
    pub fn with(mut self, command: Command) -> Self {
        match command {
            Command::RotateLeft => self.rotate_left = true,
            Command::RotateRight => self.rotate_right = true,
            Command::Thrust => self.thrust = true,
            Command::Reverse => self.reverse = true,
            Command::Fire => self.fire = true,
        }
        self
    }

    pub fn contains(&self, command: Command) -> bool {
        match command {
            Command::RotateLeft => self.rotate_left,
            Command::RotateRight => self.rotate_right,
            Command::Thrust => self.thrust,
            Command::Reverse => self.reverse,
            Command::Fire => self.fire,
        }
    }
}

impl FromIterator<Command> for TickInput {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

impl Session {
    /// Advance the simulation by `dt` seconds
    ///
    /// Does nothing outside `Playing`.
    pub fn tick(&mut self, dt: f32, input: &TickInput) {
        if self.state != GameState::Playing {
            return;
        }
        self.time_ticks += 1;

        self.invuln_remaining = (self.invuln_remaining - dt).max(0.0);
        let invulnerable = self.invuln_remaining > 0.0;
        if let Some(player) = &mut self.player {
            player.set_invulnerable(invulnerable);
        }

        self.update_entities(dt, input);

        let game_over = !invulnerable && self.resolve_player_hits();
        if !game_over {
            self.resolve_shot_hits();
        }

        self.prune_dead();
    }

    /// Move everything; spawns from this pass join their collections afterward
    fn update_entities(&mut self, dt: f32, input: &TickInput) {
        let arena = self.arena;

        let new_shot = self
            .player
            .as_mut()
            .and_then(|player| player.update(dt, input, &self.config, arena));

        update_all(&mut self.asteroids, dt, arena);
        update_all(&mut self.shots, dt, arena);
        update_all(&mut self.explosions, dt, arena);

        let new_asteroid = self.field.update(dt, &self.config, &mut self.rng);

        if let Some(shot) = new_shot {
            self.events.push(GameEvent::ShotFired);
            self.shots.push(shot);
        }
        if let Some(asteroid) = new_asteroid {
            log::debug!(
                "Asteroid spawned at {:?} (r={})",
                asteroid.body.position,
                asteroid.body.radius
            );
            self.spawn_asteroid(asteroid);
        }
    }

    /// At most one hit per tick; returns true if the run just ended
    fn resolve_player_hits(&mut self) -> bool {
        let Some(player) = &mut self.player else {
            return false;
        };

        let hit = self
            .asteroids
            .iter()
            .any(|a| a.body.is_alive() && a.body.collides_with(&player.body));
        if !hit {
            return false;
        }

        self.health = self.health.saturating_sub(1);
        self.events.push(GameEvent::PlayerHit {
            health: self.health,
        });
        log::debug!("Player hit, health {}/{}", self.health, self.config.max_health);

        if self.health == 0 {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over after {} ticks", self.time_ticks);
            return true;
        }

        self.invuln_remaining = self.config.invulnerability_seconds;
        player.set_invulnerable(self.invuln_remaining > 0.0);
        false
    }

    /// Each shot destroys at most one asteroid; fragments join after the pass
    fn resolve_shot_hits(&mut self) {
        let mut fragments = Vec::new();

        for asteroid in &mut self.asteroids {
            if !asteroid.body.is_alive() {
                continue;
            }
            for shot in &mut self.shots {
                if !shot.body.is_alive() || !asteroid.body.collides_with(&shot.body) {
                    continue;
                }

                self.explosions.push(Explosion::new(
                    asteroid.body.position,
                    asteroid.body.radius,
                    self.config.explosion_duration_seconds,
                ));
                shot.body.kill();

                let radius = asteroid.body.radius;
                match asteroid.split(&mut self.rng, &self.split_rule) {
                    Some(children) => {
                        self.events.push(GameEvent::AsteroidSplit { radius });
                        fragments.extend(children);
                    }
                    None => self.events.push(GameEvent::AsteroidDestroyed { radius }),
                }
                break;
            }
        }

        self.asteroids.extend(fragments);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::Config;
    use crate::consts::*;
    use crate::sim::{Asteroid, Shot};

    fn playing() -> Session {
        // Spawner pushed out of reach so tests control every asteroid
        let config = Config {
            asteroid_spawn_interval: 1.0e6,
            ..Default::default()
        };
        let mut s = Session::new(config, 12345).expect("valid config");
        s.start_new_game();
        s.drain_events();
        s
    }

    fn asteroid_on_player(s: &Session) -> Asteroid {
        let pos = s.player().expect("player").body.position;
        Asteroid::new(pos, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0)
    }

    fn shot_at(pos: Vec2) -> Shot {
        Shot::new(pos, Vec2::ZERO, SHOT_RADIUS, SHOT_LIFETIME_SECONDS)
    }

    #[test]
    fn test_tick_input_from_commands() {
        let input: TickInput = [Command::Thrust, Command::Fire].into_iter().collect();
        assert!(input.thrust && input.fire);
        assert!(!input.rotate_left && !input.rotate_right && !input.reverse);
        assert!(input.contains(Command::Fire));
        assert!(!input.contains(Command::Reverse));
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut s = Session::new(Config::default(), 1).expect("valid config");
        s.tick(SIM_DT, &TickInput::default());
        assert_eq!(s.state(), GameState::Menu);
        assert_eq!(s.time_ticks(), 0);
    }

    #[test]
    fn test_last_health_hit_ends_game() {
        let mut s = playing();
        s.health = 1;
        let a = asteroid_on_player(&s);
        s.spawn_asteroid(a);

        s.tick(SIM_DT, &TickInput::default());

        assert_eq!(s.state(), GameState::GameOver);
        assert_eq!(s.health(), 0);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::GameOver));

        // Frozen until restart
        s.tick(SIM_DT, &TickInput::default());
        assert_eq!(s.state(), GameState::GameOver);
    }

    #[test]
    fn test_hit_grants_invulnerability() {
        let mut s = playing();
        s.health = 2;
        let a = asteroid_on_player(&s);
        s.spawn_asteroid(a);

        s.tick(SIM_DT, &TickInput::default());

        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.health(), 1);
        assert_eq!(s.invuln_remaining(), INVULNERABILITY_SECONDS);
        assert!(s.player().expect("player").is_invulnerable());

        // Still overlapping, but the grace window absorbs it
        s.tick(SIM_DT, &TickInput::default());
        assert_eq!(s.health(), 1);
        assert_eq!(s.state(), GameState::Playing);
    }

    #[test]
    fn test_invulnerability_expires() {
        let mut s = playing();
        s.invuln_remaining = 0.1;
        s.tick(0.05, &TickInput::default());
        assert!(s.player().expect("player").is_invulnerable());
        s.tick(0.1, &TickInput::default());
        assert!(!s.player().expect("player").is_invulnerable());
        assert_eq!(s.invuln_remaining(), 0.0);
    }

    #[test]
    fn test_at_most_one_health_loss_per_tick() {
        let mut s = playing();
        let start = s.health();
        for _ in 0..3 {
            let a = asteroid_on_player(&s);
            s.spawn_asteroid(a);
        }
        s.tick(SIM_DT, &TickInput::default());
        assert_eq!(s.health(), start - 1);
    }

    #[test]
    fn test_collision_uses_post_update_positions() {
        let mut s = playing();
        let center = s.player().expect("player").body.position;
        // 90 apart, closing at 100 u/s: touching (40 = 20 + 20) only after moving
        s.spawn_asteroid(Asteroid::new(
            center - Vec2::new(90.0, 0.0),
            ASTEROID_MIN_RADIUS,
            Vec2::new(100.0, 0.0),
            0,
        ));

        s.tick(0.5, &TickInput::default());

        assert_eq!(s.health(), 2);
        assert_eq!(s.state(), GameState::Playing);
    }

    #[test]
    fn test_overlap_before_update_is_not_a_hit() {
        let mut s = playing();
        let center = s.player().expect("player").body.position;
        // Overlapping now, 80 apart after moving away
        s.spawn_asteroid(Asteroid::new(
            center - Vec2::new(30.0, 0.0),
            ASTEROID_MIN_RADIUS,
            Vec2::new(-100.0, 0.0),
            0,
        ));

        s.tick(0.5, &TickInput::default());

        assert_eq!(s.health(), s.max_health());
    }

    #[test]
    fn test_shot_hits_after_both_move() {
        let mut s = playing();
        s.spawn_asteroid(Asteroid::new(
            Vec2::new(100.0, 100.0),
            ASTEROID_MIN_RADIUS,
            Vec2::new(20.0, 0.0),
            0,
        ));
        s.shots.push(Shot::new(
            Vec2::new(300.0, 100.0),
            Vec2::new(-360.0, 0.0),
            SHOT_RADIUS,
            SHOT_LIFETIME_SECONDS,
        ));
        s.drain_events();

        // 200 apart now; 10 apart after 0.5 s
        s.tick(0.5, &TickInput::default());

        assert!(s.asteroids().is_empty());
        assert!(s.shots().is_empty());
        assert_eq!(s.explosions()[0].position, Vec2::new(110.0, 100.0));
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::AsteroidDestroyed {
                radius: ASTEROID_MIN_RADIUS
            }]
        );
    }

    #[test]
    fn test_shot_destroys_at_most_one_asteroid() {
        let mut s = playing();
        let target = Vec2::new(100.0, 100.0);
        s.spawn_asteroid(Asteroid::new(target, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0));
        s.spawn_asteroid(Asteroid::new(target, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0));
        s.shots.push(shot_at(target));
        s.drain_events();

        s.tick(0.0, &TickInput::default());

        assert_eq!(s.asteroids().len(), 1);
        assert!(s.shots().is_empty());
        assert_eq!(s.explosions().len(), 1);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::AsteroidDestroyed {
                radius: ASTEROID_MIN_RADIUS
            }]
        );
    }

    #[test]
    fn test_shot_splits_large_asteroid() {
        let mut s = playing();
        let target = Vec2::new(100.0, 100.0);
        s.spawn_asteroid(Asteroid::new(
            target,
            ASTEROID_MIN_RADIUS * 3.0,
            Vec2::new(50.0, 0.0),
            0,
        ));
        s.shots.push(shot_at(target));

        s.tick(0.0, &TickInput::default());

        assert_eq!(s.asteroids().len(), 2);
        for child in s.asteroids() {
            assert_eq!(child.body.radius, ASTEROID_MIN_RADIUS * 2.0);
            assert_eq!(child.body.position, target);
            assert!((child.body.speed() - 60.0).abs() < 1e-3);
        }
        let explosion = &s.explosions()[0];
        assert_eq!(explosion.position, target);
        assert_eq!(explosion.radius, ASTEROID_MIN_RADIUS * 3.0);
    }

    #[test]
    fn test_two_shots_two_asteroids() {
        let mut s = playing();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(400.0, 100.0);
        s.spawn_asteroid(Asteroid::new(a, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0));
        s.spawn_asteroid(Asteroid::new(b, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0));
        s.shots.push(shot_at(a));
        s.shots.push(shot_at(b));

        s.tick(0.0, &TickInput::default());

        assert!(s.asteroids().is_empty());
        assert!(s.shots().is_empty());
        assert_eq!(s.explosions().len(), 2);
    }

    #[test]
    fn test_expired_shot_removed_same_tick() {
        let mut s = playing();
        let mut shot = shot_at(Vec2::new(100.0, 100.0));
        shot.life_remaining = 0.5;
        s.shots.push(shot);

        s.tick(0.5 + 1e-3, &TickInput::default());

        assert!(s.shots().is_empty());
    }

    #[test]
    fn test_expired_shot_cannot_hit() {
        let mut s = playing();
        let target = Vec2::new(100.0, 100.0);
        s.spawn_asteroid(Asteroid::new(target, ASTEROID_MIN_RADIUS, Vec2::ZERO, 0));
        let mut shot = shot_at(target);
        shot.life_remaining = 0.01;
        s.shots.push(shot);

        s.tick(0.02, &TickInput::default());

        assert_eq!(s.asteroids().len(), 1);
        assert!(s.explosions().is_empty());
    }

    #[test]
    fn test_fire_spawns_shot_at_player() {
        let mut s = playing();
        let input = TickInput::default().with(Command::Fire);
        s.tick(SIM_DT, &input);

        assert_eq!(s.shots().len(), 1);
        let shot = &s.shots()[0];
        let player = s.player().expect("player");
        assert_eq!(shot.body.position, player.body.position);
        assert!(s.drain_events().contains(&GameEvent::ShotFired));
    }

    #[test]
    fn test_explosions_expire() {
        let mut s = playing();
        s.explosions
            .push(Explosion::new(Vec2::ZERO, 10.0, EXPLOSION_DURATION_SECONDS));
        s.tick(EXPLOSION_DURATION_SECONDS, &TickInput::default());
        assert!(s.explosions().is_empty());
    }

    #[test]
    fn test_field_spawns_while_playing() {
        let mut s = Session::new(Config::default(), 5).expect("valid config");
        s.start_new_game();
        let ticks = (ASTEROID_SPAWN_INTERVAL * 3.5 / SIM_DT) as usize;
        for _ in 0..ticks {
            s.tick(SIM_DT, &TickInput::default());
        }
        assert!(s.asteroids().len() >= 3);
    }

    #[test]
    fn test_full_cycle_menu_play_gameover_menu() {
        let mut s = playing();
        s.health = 1;
        let a = asteroid_on_player(&s);
        s.spawn_asteroid(a);
        s.tick(SIM_DT, &TickInput::default());
        assert_eq!(s.state(), GameState::GameOver);

        s.restart_to_menu();
        assert_eq!(s.state(), GameState::Menu);
        assert!(s.snapshot().is_empty());

        s.start_new_game();
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.health(), s.max_health());
    }

    #[test]
    fn test_determinism() {
        let mut s1 = Session::new(Config::default(), 99999).expect("valid config");
        let mut s2 = Session::new(Config::default(), 99999).expect("valid config");
        s1.start_new_game();
        s2.start_new_game();

        let inputs = [
            TickInput::default().with(Command::RotateLeft),
            TickInput::default().with(Command::Thrust).with(Command::Fire),
            TickInput::default().with(Command::RotateRight).with(Command::Fire),
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                s1.tick(SIM_DT, input);
                s2.tick(SIM_DT, input);
            }
        }

        assert_eq!(s1.state(), s2.state());
        assert_eq!(s1.health(), s2.health());
        assert_eq!(s1.snapshot(), s2.snapshot());
        assert_eq!(s1.drain_events(), s2.drain_events());
    }
}
