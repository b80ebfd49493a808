//! Game state definitions and structures
//!
//! Contains the entity variants (player ship, asteroids, shots) and the
//! session aggregate that owns them for one game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::game::constants::{asteroid, player, shot};
use crate::game::entity::Body;
use crate::util::vec2::Vec2;

/// Asteroid size category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Small,
    Large,
}

impl AsteroidSize {
    /// Sprite footprint for this size
    pub fn sprite_size(self) -> Vec2 {
        match self {
            AsteroidSize::Small => {
                Vec2::new(asteroid::SMALL_SPRITE_WIDTH, asteroid::SMALL_SPRITE_HEIGHT)
            }
            AsteroidSize::Large => {
                Vec2::new(asteroid::LARGE_SPRITE_WIDTH, asteroid::LARGE_SPRITE_HEIGHT)
            }
        }
    }

    /// Score awarded when an asteroid of this size is destroyed
    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Small => asteroid::SMALL_SCORE,
            AsteroidSize::Large => asteroid::LARGE_SCORE,
        }
    }

    fn roll_mass(self, rng: &mut StdRng) -> f32 {
        match self {
            AsteroidSize::Small => {
                rng.gen_range(asteroid::SMALL_MASS_MIN..asteroid::SMALL_MASS_MAX)
            }
            AsteroidSize::Large => {
                rng.gen_range(asteroid::LARGE_MASS_MIN..asteroid::LARGE_MASS_MAX)
            }
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    pub fn new(
        size: AsteroidSize,
        position: Vec2,
        velocity: Vec2,
        heading: f32,
        bounds: Vec2,
        rng: &mut StdRng,
    ) -> Self {
        let mass = size.roll_mass(rng);
        let mut body = Body::new(size.sprite_size(), 1.0, mass, Some(asteroid::TOP_SPEED));
        body.set_position(position, bounds);
        body.set_velocity(velocity);
        body.set_heading(heading);
        Self { body, size }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub alive: bool,
    pub game_over: bool,
    pub lives: u32,
    /// Ticks until the next shot may fire
    pub cooldown: u32,
    /// Ticks spent dead; drives the respawn timer
    pub death_ticks: u32,
}

impl Player {
    pub fn new(lives: u32, bounds: Vec2) -> Self {
        let sprite = Vec2::new(player::SPRITE_WIDTH, player::SPRITE_HEIGHT);
        let mut body = Body::new(sprite, player::SCALE, player::MASS, Some(player::TOP_SPEED));
        body.set_position(bounds * 0.5, bounds);
        Self {
            body,
            alive: true,
            game_over: false,
            lives,
            cooldown: 0,
            death_ticks: 0,
        }
    }

    /// Soft reset after a death or a level change: recentre, stop, face up
    /// the screen again. Lives and the running score are untouched.
    pub fn reset(&mut self, bounds: Vec2) {
        self.alive = true;
        self.death_ticks = 0;
        self.body.set_position(bounds * 0.5, bounds);
        self.body.set_velocity(Vec2::ZERO);
        self.body.set_facing(0.0);
        self.body.set_heading(0.0);
    }
}

/// A live projectile
#[derive(Debug, Clone)]
pub struct Shot {
    pub body: Body,
    /// Remaining ticks; the shot is removed when this reaches zero
    pub live_ticks: u32,
}

impl Shot {
    pub fn new(position: Vec2, angle: f32, bounds: Vec2) -> Self {
        let sprite = Vec2::new(shot::SPRITE_WIDTH, shot::SPRITE_HEIGHT);
        let mut body = Body::new(sprite, shot::SCALE, 1.0, None);
        body.set_position(position, bounds);
        body.set_heading(angle);
        body.set_facing(angle);
        Self {
            body,
            live_ticks: shot::LIVE_TICKS,
        }
    }

    pub fn expired(&self) -> bool {
        self.live_ticks == 0
    }
}

/// Everything one game owns: the ship, the live asteroid and shot sets,
/// score, level and the session RNG. Replaced wholesale on a full reset.
#[derive(Debug)]
pub struct GameSession {
    pub tick: u64,
    pub score: u32,
    pub level: u32,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub shots: Vec<Shot>,
    pub rng: StdRng,
    bounds: Vec2,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic session for tests
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let bounds = config.bounds();
        Self {
            tick: 0,
            score: 0,
            level: 1,
            player: Player::new(config.starting_lives, bounds),
            asteroids: Vec::new(),
            shots: Vec::new(),
            rng,
            bounds,
        }
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn screen_center(&self) -> Vec2 {
        self.bounds * 0.5
    }

    /// The level-clear condition: no asteroids left alive
    pub fn field_clear(&self) -> bool {
        self.asteroids.is_empty()
    }
}
