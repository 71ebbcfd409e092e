//! Player, enemy and collectable entities
//!
//! Each entity owns its position and its own movement rule. Anything that
//! needs the rest of the session (collisions, scoring) lives in `tick`.

use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile};
use crate::consts::*;
use crate::error::GameError;
use crate::settings::Character;
use crate::{board_width, col_to_x, row_to_y, tile_origin};

/// One-tile move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "up" => Ok(Direction::Up),
            "right" => Ok(Direction::Right),
            "down" => Ok(Direction::Down),
            other => Err(GameError::UnknownDirection(other.to_string())),
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Destination tile, or None if the move would leave the board
    pub fn apply(self, tile: Tile) -> Option<Tile> {
        match self {
            Direction::Left if tile.col > 0 => Some(Tile::new(tile.row, tile.col - 1)),
            Direction::Right if tile.col + 1 < COLS => Some(Tile::new(tile.row, tile.col + 1)),
            Direction::Up if tile.row > 0 => Some(Tile::new(tile.row - 1, tile.col)),
            Direction::Down if tile.row + 1 < ROWS => Some(Tile::new(tile.row + 1, tile.col)),
            _ => None,
        }
    }
}

/// Sprite identity handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Player(Character),
    Enemy,
    Star,
    Key,
    Gem,
}

impl Sprite {
    pub fn asset_path(&self) -> &'static str {
        match self {
            Sprite::Player(character) => character.asset_path(),
            Sprite::Enemy => "images/enemy-bug.png",
            Sprite::Star => "images/Star.png",
            Sprite::Key => "images/Key.png",
            Sprite::Gem => "images/Gem Blue.png",
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub tile: Tile,
    pub pos: Vec2,
    pub points: u32,
    pub lives: u8,
    pub character: Character,
}

impl Player {
    /// Create a player at the start row and claim its cell
    pub fn new<R: Rng + ?Sized>(character: Character, rng: &mut R, grid: &mut Grid) -> Self {
        let mut player = Self {
            tile: Tile::new(ROWS - 1, 0),
            pos: tile_origin(ROWS - 1, 0),
            points: 0,
            lives: MAX_LIVES,
            character,
        };
        player.reset(rng, grid);
        player
    }

    /// Back to the bottom row at a random column. Rebuilds the grid and
    /// claims the new cell.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: &mut Grid) {
        self.tile = Tile::new(ROWS - 1, rng.random_range(0..COLS));
        self.pos = tile_origin(self.tile.row, self.tile.col);
        grid.rebuild();
        grid.occupy(self.tile);
    }

    /// Move one tile. Returns true if the player moved.
    ///
    /// Ignored once lives run out; moves that would leave the board are
    /// rejected without any partial change.
    pub fn handle_input(&mut self, direction: Direction, grid: &mut Grid) -> bool {
        if self.lives == 0 {
            return false;
        }
        let Some(next) = direction.apply(self.tile) else {
            return false;
        };
        grid.release(self.tile);
        self.tile = next;
        self.pos = tile_origin(next.row, next.col);
        grid.occupy(self.tile);
        true
    }

    /// Reached the top strip
    pub fn has_crossed(&self) -> bool {
        self.pos.y == row_to_y(0)
    }

    /// Add a signed delta, clamped to [0, u32::MAX]
    pub fn add_points(&mut self, delta: i64) {
        self.points = (self.points as i64)
            .saturating_add(delta)
            .clamp(0, u32::MAX as i64) as u32;
    }

    /// Add a signed lives delta, clamped to [0, MAX_LIVES]
    pub fn add_lives(&mut self, delta: i8) {
        self.lives = (self.lives as i16 + delta as i16).clamp(0, MAX_LIVES as i16) as u8;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Player(self.character)
    }
}

/// A hazard crawling along one row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub row: usize,
    pub pos: Vec2,
    /// Tiles per second
    pub speed: f32,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut enemy = Self {
            row: HAZARD_ROW_MIN,
            pos: tile_origin(HAZARD_ROW_MIN, 0),
            speed: SPEED_MIN,
        };
        enemy.reset(rng);
        enemy
    }

    /// Random hazard row, left edge, random speed
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.row = rng.random_range(HAZARD_ROW_MIN..=HAZARD_ROW_MAX);
        self.pos = tile_origin(self.row, 0);
        self.speed = rng.random_range(SPEED_MIN..SPEED_MAX);
    }

    /// Advance by `dt` seconds, wrapping to one tile left of the board once
    /// past the right edge. Zero, negative and NaN deltas leave it still.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.pos.x += TILE_WIDTH * dt * self.speed;
        if self.pos.x > board_width() {
            self.pos.x = -TILE_WIDTH;
        }
    }

    /// Speed up by a positive amount; anything else is ignored
    pub fn accelerate_by(&mut self, amount: f32) {
        if amount > 0.0 {
            self.speed += amount;
        }
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
    }
}

/// Collectable kinds, rarest last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectableKind {
    Star,
    Key,
    Gem,
}

impl CollectableKind {
    pub fn points(self) -> u32 {
        match self {
            CollectableKind::Star => POINTS_STAR,
            CollectableKind::Key => POINTS_KEY,
            CollectableKind::Gem => POINTS_GEM,
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            CollectableKind::Star => Sprite::Star,
            CollectableKind::Key => Sprite::Key,
            CollectableKind::Gem => Sprite::Gem,
        }
    }

    /// Row the placement search starts from
    fn sample_row<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        match self {
            CollectableKind::Gem => 0,
            CollectableKind::Key => rng.random_range(HAZARD_ROW_MIN..=HAZARD_ROW_MAX),
            CollectableKind::Star => rng.random_range(0..ROWS),
        }
    }
}

/// A bonus item sitting on one tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectable {
    pub kind: CollectableKind,
    pub tile: Tile,
    pub pos: Vec2,
    /// Off the board until the next reset
    pub collected: bool,
    /// Holds a grid cell (false when placement found the board full)
    pub placed: bool,
}

impl Collectable {
    pub fn new<R: Rng + ?Sized>(kind: CollectableKind, rng: &mut R, grid: &mut Grid) -> Self {
        let mut collectable = Self {
            kind,
            tile: Tile::new(0, 0),
            pos: Self::off_board(),
            collected: false,
            placed: false,
        };
        collectable.reset(rng, grid);
        collectable
    }

    /// Outside the visible tile range
    pub fn off_board() -> Vec2 {
        Vec2::new(-TILE_WIDTH, row_to_y(0))
    }

    /// Pick a fresh tile for this kind and claim it on the grid
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: &mut Grid) {
        self.release(grid);
        let start = Tile::new(self.kind.sample_row(rng), rng.random_range(0..COLS));
        match grid.find_free_cell(start) {
            Some(tile) => {
                self.tile = tile;
                self.placed = true;
            }
            None => {
                log::warn!("No free cell for {:?}; placing over {:?}", self.kind, start);
                self.tile = start;
                self.placed = false;
            }
        }
        self.collected = false;
        self.pos = Vec2::new(col_to_x(self.tile.col), row_to_y(self.tile.row));
    }

    /// Give up the grid cell without leaving the board
    pub fn release(&mut self, grid: &mut Grid) {
        if self.claims_cell() {
            grid.release(self.tile);
        }
        self.placed = false;
    }

    /// Take it off the board and free its cell
    pub fn collect(&mut self, grid: &mut Grid) -> u32 {
        self.release(grid);
        self.collected = true;
        self.pos = Self::off_board();
        self.kind.points()
    }

    /// On the board and holding its grid cell
    pub fn claims_cell(&self) -> bool {
        self.placed && !self.collected
    }

    pub fn sprite(&self) -> Sprite {
        self.kind.sprite()
    }
}
