//! Presentation side-effect requests
//!
//! The core never touches the page. It queues show/hide/remove requests in
//! order; the driver applies them (and awaits any transitions) outside the
//! simulation.

use serde::{Deserialize, Serialize};

/// Page element an effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// Game board canvas
    Canvas,
    /// End-of-game leaderboard panel
    TopScores,
    /// Restart button
    RestartButton,
    /// Every life icon
    AllLives,
    /// A single life icon (1-based slot)
    LifeIcon(u8),
}

/// A single presentation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Show(EffectTarget),
    Hide(EffectTarget),
    Remove(EffectTarget),
}

/// Ordered queue of pending effects
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    pub fn push(&mut self, effect: Effect) {
        self.pending.push(effect);
    }

    /// Lives icons after a lives change
    pub fn lives_changed(&mut self, lives: u8, max_lives: u8) {
        if lives >= max_lives {
            self.push(Effect::Show(EffectTarget::AllLives));
        } else {
            self.push(Effect::Hide(EffectTarget::LifeIcon(lives + 1)));
        }
    }

    /// Swap the board for the leaderboard
    pub fn game_over(&mut self) {
        self.push(Effect::Remove(EffectTarget::Canvas));
        self.push(Effect::Show(EffectTarget::TopScores));
        self.push(Effect::Show(EffectTarget::RestartButton));
    }

    /// Swap the leaderboard back for the board
    pub fn restart(&mut self) {
        self.push(Effect::Remove(EffectTarget::TopScores));
        self.push(Effect::Remove(EffectTarget::RestartButton));
        self.push(Effect::Show(EffectTarget::Canvas));
    }

    /// Take every pending effect, oldest first
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }
}
