//! Per-frame simulation step and player input
//!
//! Fixed order within one tick: player crossing check, then each enemy's
//! move-then-collide, then collectable pickups.

use super::collision::{collectables_under_player, enemy_hits_player};
use super::entities::Direction;
use super::session::{GameEvent, GamePhase, Session};
use crate::consts::*;

impl Session {
    /// Advance the simulation by `dt` seconds. Negative or non-finite deltas
    /// are treated as zero; nothing moves once the game is over.
    pub fn tick(&mut self, dt: f32) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.update_player();
        self.update_enemies(dt);
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.check_collectables();
    }

    /// Move the player one tile. `None`, out-of-board moves and any input
    /// after lives run out are ignored. Returns true if the player moved.
    pub fn handle_input(&mut self, direction: Option<Direction>) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        let Some(direction) = direction else {
            return false;
        };
        if !self.player.handle_input(direction, &mut self.grid) {
            return false;
        }
        // Collectables never move, so a pickup can be settled right away
        self.check_collectables();
        true
    }

    /// Crossing: the player reached the top strip
    fn update_player(&mut self) {
        if !self.player.has_crossed() {
            return;
        }
        log::debug!("Crossed at column {}", self.player.tile.col);
        self.reset_player();
        self.push_event(GameEvent::Crossed);
        self.apply_score(POINTS_CROSSING);
        self.reset_collectables();
    }

    fn update_enemies(&mut self, dt: f32) {
        for i in 0..self.enemies.len() {
            self.enemies[i].tick(dt);
            if enemy_hits_player(self.enemies[i].pos, self.player.pos) {
                self.on_enemy_hit();
                if self.phase == GamePhase::GameOver {
                    break;
                }
            }
        }
    }

    /// Penalty, one life lost, player back to the start row
    fn on_enemy_hit(&mut self) {
        log::debug!(
            "Hit at {:?} with {} lives left",
            self.player.tile,
            self.player.lives
        );
        self.push_event(GameEvent::PlayerHit);
        self.apply_score(POINTS_ENEMY_HIT);

        self.player.add_lives(-1);
        let lives = self.player.lives;
        self.push_event(GameEvent::LivesChanged { lives });
        self.effects_mut().lives_changed(lives, MAX_LIVES);

        self.reset_player();
        if lives == 0 {
            self.game_over();
        }
    }

    fn check_collectables(&mut self) {
        for i in collectables_under_player(&self.collectables, &self.player) {
            let kind = self.collectables[i].kind;
            let points = self.collectables[i].collect(&mut self.grid);
            // The freed cell is the one the player is standing on
            self.grid.occupy(self.player.tile);
            log::debug!("Collected {kind:?} for {points} points");
            self.push_event(GameEvent::Collected { kind, points });
            self.apply_score(points as i64);
        }
    }
}
