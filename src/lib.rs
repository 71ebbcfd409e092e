//! Bug Crossing - simulation core of a tile-based crossing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, entities, collisions, progression)
//! - `effects`: Presentation side-effect requests emitted by the core
//! - `highscores`: In-memory top-3 leaderboard
//! - `settings`: Data-driven configuration

pub mod effects;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScores;
pub use settings::{Character, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board dimensions (tiles)
    pub const ROWS: usize = 6;
    pub const COLS: usize = 5;

    /// Tile size in pixels
    pub const TILE_WIDTH: f32 = 101.0;
    pub const TILE_HEIGHT: f32 = 83.0;
    /// Empty strip at the top of every sprite image
    pub const ROW_OFFSET: f32 = -23.0;

    /// Rows enemies (and keys) live in
    pub const HAZARD_ROW_MIN: usize = 1;
    pub const HAZARD_ROW_MAX: usize = 3;

    /// Roster sizes at level 1
    pub const MAX_LIVES: u8 = 3;
    pub const MAX_ENEMIES: usize = 3;
    pub const MAX_COLLECTABLES: usize = 3;

    /// Enemy speed range (tiles per second)
    pub const SPEED_MIN: f32 = 1.0;
    pub const SPEED_MAX: f32 = 4.0;

    /// Point values
    pub const POINTS_CROSSING: i64 = 50;
    pub const POINTS_GEM: u32 = 25;
    pub const POINTS_KEY: u32 = 15;
    pub const POINTS_STAR: u32 = 5;
    pub const POINTS_ENEMY_HIT: i64 = -10;

    /// Level thresholds
    pub const LEVEL_2_POINTS: u32 = 400;
    pub const LEVEL_3_POINTS: u32 = 2 * LEVEL_2_POINTS;

    /// Speed added to every enemy on level-up
    pub const LEVEL_2_ACCELERATION: f32 = 1.0;
    pub const LEVEL_3_ACCELERATION: f32 = 2.0;

    /// Leaderboard capacity
    pub const MAX_TOP_SCORES: usize = 3;
}

use consts::*;

/// Pixel x of a column's left edge
#[inline]
pub fn col_to_x(col: usize) -> f32 {
    col as f32 * TILE_WIDTH
}

/// Pixel y of a row's top edge (biased by the sprite offset)
#[inline]
pub fn row_to_y(row: usize) -> f32 {
    row as f32 * TILE_HEIGHT + ROW_OFFSET
}

/// Pixel origin of a tile
#[inline]
pub fn tile_origin(row: usize, col: usize) -> Vec2 {
    Vec2::new(col_to_x(col), row_to_y(row))
}

/// Right edge of the last column; enemies wrap once they pass it
#[inline]
pub fn board_width() -> f32 {
    COLS as f32 * TILE_WIDTH
}
