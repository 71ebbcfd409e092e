//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary; anything missing falls back
//! to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::LevelPolicy;

/// Player avatar choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Character {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

impl Character {
    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Boy => "boy",
            Character::CatGirl => "cat-girl",
            Character::HornGirl => "horn-girl",
            Character::PinkGirl => "pink-girl",
            Character::PrincessGirl => "princess-girl",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "boy" => Some(Character::Boy),
            "cat-girl" | "cat" => Some(Character::CatGirl),
            "horn-girl" | "horn" => Some(Character::HornGirl),
            "pink-girl" | "pink" => Some(Character::PinkGirl),
            "princess-girl" | "princess" => Some(Character::PrincessGirl),
            _ => None,
        }
    }

    /// Sprite image for this avatar
    pub fn asset_path(&self) -> &'static str {
        match self {
            Character::Boy => "images/char-boy.png",
            Character::CatGirl => "images/char-cat-girl.png",
            Character::HornGirl => "images/char-horn-girl.png",
            Character::PinkGirl => "images/char-pink-girl.png",
            Character::PrincessGirl => "images/char-princess-girl.png",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (None = derive from clock)
    pub seed: Option<u64>,
    /// How the level label reacts to points dropping below a threshold
    pub level_policy: LevelPolicy,
    /// Player avatar
    pub character: Character,

    // === Headless driver ===
    /// Frame delta fed to `tick` (seconds)
    pub frame_dt: f32,
    /// Frames to simulate per game before giving up
    pub max_frames: u32,
    /// Number of games the autoplay driver runs (restart between them)
    pub autoplay_games: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            level_policy: LevelPolicy::Monotonic,
            character: Character::Boy,
            frame_dt: 1.0 / 60.0,
            max_frames: 60 * 60 * 5,
            autoplay_games: 3,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::SettingsIo(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
