use std::path::PathBuf;

use crate::game::constants::{player, screen};
use crate::util::vec2::Vec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Playfield width in world units
    pub screen_width: f32,
    /// Playfield height in world units
    pub screen_height: f32,
    /// Lives at the start of a session
    pub starting_lives: u32,
    /// Name committed with the score at game over
    pub player_name: String,
    /// Path of the high-score file
    pub score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: screen::WIDTH,
            screen_height: screen::HEIGHT,
            starting_lives: player::STARTING_LIVES,
            player_name: "Player".to_string(),
            score_path: PathBuf::from("scores.json"),
        }
    }
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(width) = std::env::var("SCREEN_WIDTH") {
            if let Ok(parsed) = width.parse::<f32>() {
                if parsed > 0.0 {
                    config.screen_width = parsed;
                } else {
                    tracing::warn!("SCREEN_WIDTH must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid SCREEN_WIDTH '{}', using default", width);
            }
        }

        if let Ok(height) = std::env::var("SCREEN_HEIGHT") {
            if let Ok(parsed) = height.parse::<f32>() {
                if parsed > 0.0 {
                    config.screen_height = parsed;
                } else {
                    tracing::warn!("SCREEN_HEIGHT must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid SCREEN_HEIGHT '{}', using default", height);
            }
        }

        if let Ok(lives) = std::env::var("STARTING_LIVES") {
            if let Ok(parsed) = lives.parse::<u32>() {
                if (3..=10).contains(&parsed) {
                    config.starting_lives = parsed;
                } else {
                    tracing::warn!("STARTING_LIVES must be 3-10, using default");
                }
            } else {
                tracing::warn!("Invalid STARTING_LIVES '{}', using default", lives);
            }
        }

        if let Ok(name) = std::env::var("PLAYER_NAME") {
            if !name.trim().is_empty() {
                config.player_name = name;
            }
        }

        if let Ok(path) = std::env::var("SCORE_PATH") {
            config.score_path = PathBuf::from(path);
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err("screen dimensions must be positive".to_string());
        }
        if !(3..=10).contains(&self.starting_lives) {
            return Err("starting_lives must be between 3 and 10".to_string());
        }
        if self.player_name.trim().is_empty() {
            return Err("player_name cannot be empty".to_string());
        }
        Ok(())
    }

    /// Playfield bounds as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }
}
