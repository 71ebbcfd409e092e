//! Score and level state machine
//!
//! Level 1 -> 2 -> 3 on point thresholds. Each forward transition grows the
//! roster (one enemy, one collectable) and speeds every enemy up. Rosters
//! never shrink until a restart.

use serde::{Deserialize, Serialize};

use super::entities::{CollectableKind, Player};
use crate::consts::*;

/// Level label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }
}

/// What happens to the level label when a penalty drops points below T2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelPolicy {
    /// Level never goes down
    #[default]
    Monotonic,
    /// Label drops back to 1 below T2; crossing T2 again grows the roster again
    Strict,
}

/// Roster growth for one forward transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUp {
    pub level: Level,
    pub collectable: CollectableKind,
    /// Added to every enemy (including the one spawned by this level-up)
    pub acceleration: f32,
}

/// Result of a score update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreUpdate {
    pub points: u32,
    /// Set if the label differs from before the update
    pub level_changed: Option<Level>,
    /// Forward transitions taken, in order
    pub level_ups: Vec<LevelUp>,
}

/// Owns the level label and applies score changes to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    level: Level,
    policy: LevelPolicy,
}

impl Progression {
    pub fn new(policy: LevelPolicy) -> Self {
        Self {
            level: Level::One,
            policy,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Back to level 1 (restart)
    pub fn reset(&mut self) {
        self.level = Level::One;
    }

    /// Add `delta` points (clamped at zero) and walk the level machine
    pub fn apply(&mut self, player: &mut Player, delta: i64) -> ScoreUpdate {
        player.add_points(delta);
        let points = player.points;
        let before = self.level;
        let mut level_ups = Vec::new();

        if self.policy == LevelPolicy::Strict && points < LEVEL_2_POINTS {
            self.level = Level::One;
        }
        if self.level == Level::One && points >= LEVEL_2_POINTS {
            self.level = Level::Two;
            level_ups.push(LevelUp {
                level: Level::Two,
                collectable: CollectableKind::Key,
                acceleration: LEVEL_2_ACCELERATION,
            });
        }
        if self.level == Level::Two && points >= LEVEL_3_POINTS {
            self.level = Level::Three;
            level_ups.push(LevelUp {
                level: Level::Three,
                collectable: CollectableKind::Gem,
                acceleration: LEVEL_3_ACCELERATION,
            });
        }

        ScoreUpdate {
            points,
            level_changed: (self.level != before).then_some(self.level),
            level_ups,
        }
    }
}
