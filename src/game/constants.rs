/// Screen and tick constants
pub mod screen {
    /// Playfield width in world units
    pub const WIDTH: f32 = 1280.0;
    /// Playfield height in world units
    pub const HEIGHT: f32 = 720.0;
    /// Simulation tick rate in Hz
    pub const TICK_RATE: u32 = 60;
    /// Tick duration in milliseconds
    pub const TICK_DURATION_MS: u64 = 1000 / TICK_RATE as u64;
}

/// Player ship constants
pub mod player {
    /// Per-axis velocity cap
    pub const TOP_SPEED: f32 = 4.0;
    /// Ship mass (heavy relative to asteroids so bounces barely move it)
    pub const MASS: f32 = 40.0;
    /// Render/collision scale applied to the sprite footprint
    pub const SCALE: f32 = 0.65;
    /// Thrust force applied along the facing angle while the action is held
    pub const THRUST: f32 = 4.5;
    /// Facing-angle change per tick while turning (radians)
    pub const ROTATION_STEP: f32 = 0.1;
    /// Ticks between shots
    pub const SHOT_COOLDOWN: u32 = 10;
    /// Default lives at session start
    pub const STARTING_LIVES: u32 = 3;
    /// Ticks from death until the automatic respawn
    pub const DEATH_RESPAWN_TICKS: u32 = 75;
    /// Tick at which the death animation holds its last frame
    pub const DEATH_FREEZE_TICK: u32 = 60;
    /// Sprite footprint in texels
    pub const SPRITE_WIDTH: f32 = 99.0;
    pub const SPRITE_HEIGHT: f32 = 75.0;
}

/// Asteroid constants
pub mod asteroid {
    use std::f32::consts::FRAC_PI_2;

    /// Per-axis velocity cap, also the spawn velocity range bound
    pub const TOP_SPEED: f32 = 35.0;
    /// Small asteroid mass range (uniform)
    pub const SMALL_MASS_MIN: f32 = 5.0;
    pub const SMALL_MASS_MAX: f32 = 10.0;
    /// Large asteroid mass range (uniform)
    pub const LARGE_MASS_MIN: f32 = 5.0;
    pub const LARGE_MASS_MAX: f32 = 15.0;
    /// Field size is BASE_COUNT + floor(level * COUNT_PER_LEVEL)
    pub const BASE_COUNT: usize = 2;
    pub const COUNT_PER_LEVEL: f32 = 1.3;
    /// Spawn positions are resampled while closer than this to screen centre
    pub const SAFE_SPAWN_RADIUS: f32 = 200.0;
    /// Children produced when a large asteroid splits
    pub const SPLIT_CHILDREN: usize = 2;
    /// Split children headings are drawn from [0, SPLIT_HEADING_MAX)
    pub const SPLIT_HEADING_MAX: f32 = FRAC_PI_2;
    /// Score for destroying a small asteroid
    pub const SMALL_SCORE: u32 = 100;
    /// Score for destroying a large asteroid
    pub const LARGE_SCORE: u32 = 200;
    /// Sprite footprints in texels
    pub const LARGE_SPRITE_WIDTH: f32 = 101.0;
    pub const LARGE_SPRITE_HEIGHT: f32 = 84.0;
    pub const SMALL_SPRITE_WIDTH: f32 = 43.0;
    pub const SMALL_SPRITE_HEIGHT: f32 = 43.0;
}

/// Shot (projectile) constants
pub mod shot {
    /// Ticks a shot stays live without hitting anything
    pub const LIVE_TICKS: u32 = 80;
    /// Constant speed along the fire angle
    pub const SPEED: f32 = 15.0;
    /// Render/collision scale applied to the sprite footprint
    pub const SCALE: f32 = 0.5;
    /// Sprite footprint in texels
    pub const SPRITE_WIDTH: f32 = 9.0;
    pub const SPRITE_HEIGHT: f32 = 37.0;
}

/// High-score table constants
pub mod scores {
    /// Maximum entries the ranked table holds
    pub const TABLE_CAPACITY: usize = 10;
    /// Seed entries are spaced by this score step
    pub const SEED_SCORE_STEP: u32 = 1000;
}

/// State-machine timing constants
pub mod machine {
    use super::screen::TICK_RATE;

    /// Ticks the GAME OVER banner stays up before the score table (~3 s)
    pub const GAME_OVER_TICKS: u32 = 3 * TICK_RATE;
}

/// Number of asteroids spawned for a level
#[inline]
pub fn field_size(level: u32) -> usize {
    asteroid::BASE_COUNT + (level as f32 * asteroid::COUNT_PER_LEVEL).trunc() as usize
}

/// Wrap an angle into (-pi, pi]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
