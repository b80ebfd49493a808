mod config;
mod game;
mod io;
mod util;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};

use crate::config::GameConfig;
use crate::game::constants::screen::TICK_DURATION_MS;
use crate::game::input::InputFrame;
use crate::game::machine::{GameMachine, Phase};
use crate::io::scores::JsonScoreStore;

/// Scripted input for the headless demo: pulses confirm through the
/// menus and flies the ship with twitchy random stick-work.
struct Autopilot {
    rng: StdRng,
    pulse: bool,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            pulse: false,
        }
    }

    fn next_frame(&mut self, phase: Phase) -> InputFrame {
        match phase {
            Phase::Menu | Phase::HighScores => {
                // Alternate held/released so every press is an edge
                self.pulse = !self.pulse;
                InputFrame {
                    confirm: self.pulse,
                    ..InputFrame::default()
                }
            }
            Phase::Playing => InputFrame {
                thrust: self.rng.gen_bool(0.4),
                turn_left: self.rng.gen_bool(0.3),
                turn_right: self.rng.gen_bool(0.3),
                fire: self.rng.gen_bool(0.5),
                ..InputFrame::default()
            },
            Phase::RoundOver | Phase::GameOver => InputFrame::default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Asteroids core v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: {}x{}, lives={}, scores={}",
        config.screen_width,
        config.screen_height,
        config.starting_lives,
        config.score_path.display()
    );

    let max_ticks: u64 = std::env::var("DEMO_TICKS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1800);

    let store = JsonScoreStore::open(&config.score_path);
    let mut machine = GameMachine::new(config, store);
    let mut autopilot = Autopilot::new();

    for _ in 0..max_ticks {
        let frame = autopilot.next_frame(machine.phase());
        if frame.exit {
            info!("Exit requested");
            break;
        }

        machine.update(&frame);
        let commands = machine.draw();

        // A real frontend would consume `commands` here; the demo only
        // paces the loop like one
        let _ = commands.len();
        std::thread::sleep(Duration::from_millis(TICK_DURATION_MS));
    }

    let session = machine.session();
    info!(
        score = session.score,
        level = session.level,
        "Demo finished"
    );

    Ok(())
}
