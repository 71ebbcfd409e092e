//! Collision predicates
//!
//! Pure checks between the player and another entity. Responses (scoring,
//! resets) are applied by the tick.

use glam::Vec2;

use super::entities::{Collectable, Player};
use crate::consts::TILE_HEIGHT;

/// Enemy overlaps the player.
///
/// Horizontal test is a half-open band trailing the player: the enemy's left
/// edge must be strictly left of the player's and within one row height of
/// it. Rows must match exactly.
pub fn enemy_hits_player(enemy_pos: Vec2, player_pos: Vec2) -> bool {
    enemy_pos.x < player_pos.x
        && enemy_pos.x + TILE_HEIGHT > player_pos.x
        && enemy_pos.y == player_pos.y
}

/// Collectable sits exactly on the player's tile origin
pub fn player_on_collectable(collectable_pos: Vec2, player_pos: Vec2) -> bool {
    collectable_pos == player_pos
}

/// Indices of on-board collectables under the player
pub fn collectables_under_player(collectables: &[Collectable], player: &Player) -> Vec<usize> {
    collectables
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.collected && player_on_collectable(c.pos, player.pos))
        .map(|(i, _)| i)
        .collect()
}
