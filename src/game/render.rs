//! Draw-command contract
//!
//! Each draw phase the machine emits a list of commands computed from
//! the frozen post-update state. The renderer owns textures and fonts;
//! the core only names sprites and overlay kinds.

use crate::util::vec2::Vec2;

/// Texture handles the renderer maps to real assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Player,
    AsteroidLarge,
    AsteroidSmall,
    Shot,
}

/// Non-entity screen content (menus, HUD, banners)
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Menu,
    Hud { score: u32, lives: u32, level: u32 },
    /// `fade` runs 1.0 -> 0.0 across the banner window
    GameOver { fade: f32 },
    HighScores,
}

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: SpriteId,
        position: Vec2,
        rotation: f32,
        scale: f32,
    },
    Overlay(Overlay),
}
