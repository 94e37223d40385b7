//! Asteroids headless runner
//!
//! Drives a session with a scripted pilot at the fixed timestep and prints a
//! JSON summary. Usage: `asteroids [CONFIG.json] [--seed N] [--seconds S]`

use std::path::{Path, PathBuf};

use clap::Parser;

use asteroids::consts::*;
use asteroids::render::{LogRenderer, hud_text};
use asteroids::sim::{Command, GameState, Session, TickInput};
use asteroids::{Config, ConfigError};

/// Host loop state: fixed-step accumulator around a session
struct Game {
    session: Session,
    renderer: LogRenderer,
    accumulator: f32,
    elapsed: f32,
}

impl Game {
    fn new(session: Session) -> Self {
        Self {
            session,
            renderer: LogRenderer::default(),
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Simple autopilot: spin, shoot, and pulse the thruster
    fn pilot(&self) -> TickInput {
        let mut input = TickInput::default()
            .with(Command::RotateRight)
            .with(Command::Fire);
        if (self.elapsed as u32) % 2 == 0 {
            input = input.with(Command::Thrust);
        }
        input
    }

    /// Run simulation ticks for one frame of wall time
    fn update(&mut self, frame_dt: f32) {
        let frame_dt = frame_dt.min(0.1);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pilot();
            self.session.tick(SIM_DT, &input);
            self.accumulator -= SIM_DT;
            self.elapsed += SIM_DT;
            substeps += 1;
        }

        for event in self.session.drain_events() {
            match serde_json::to_string(&event) {
                Ok(json) => log::debug!("{json}"),
                Err(e) => log::warn!("Could not serialize event {event:?}: {e}"),
            }
        }

        self.session.present(&mut self.renderer);
    }
}

#[derive(Parser)]
#[command(name = "asteroids")]
#[command(about = "Run a seeded Asteroids session headlessly and print a JSON summary")]
struct Args {
    /// Optional JSON config file; missing fields keep their defaults
    config: Option<PathBuf>,

    /// Seed for the session RNG
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
}

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    let args = Args::parse();

    let session = match load_config(args.config.as_deref()).and_then(|c| Session::new(c, args.seed)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut game = Game::new(session);
    game.session.confirm_selection();

    // Frames at 30 Hz wall time, each covering two fixed steps
    let frame_dt = 1.0 / 30.0;
    while game.elapsed < args.seconds && game.session.state() == GameState::Playing {
        game.update(frame_dt);
    }

    let summary = serde_json::json!({
        "seed": args.seed,
        "seconds": game.elapsed,
        "ticks": game.session.time_ticks(),
        "frames": game.renderer.frames,
        "state": game.session.state(),
        "hud": hud_text(game.session.health(), game.session.max_health()),
        "asteroids": game.session.asteroids().len(),
        "shots": game.session.shots().len(),
    });
    println!("{summary}");

    if game.session.state() == GameState::GameOver {
        game.session.restart_to_menu();
    }
    game.session.request_quit();
    log::info!("Quit: {}", game.session.quit_requested());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults_and_flags() {
        let args = Args::try_parse_from(["asteroids"]).expect("no args is valid");
        assert!(args.config.is_none());
        assert_eq!(args.seed, 0x5eed);
        assert_eq!(args.seconds, 60.0);

        let args = Args::try_parse_from(["asteroids", "tuning.json", "--seed", "7", "--seconds", "2.5"])
            .expect("valid args");
        assert_eq!(args.config, Some(PathBuf::from("tuning.json")));
        assert_eq!(args.seed, 7);
        assert_eq!(args.seconds, 2.5);

        assert!(Args::try_parse_from(["asteroids", "--seed", "many"]).is_err());
    }
}
