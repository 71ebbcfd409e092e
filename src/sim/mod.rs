//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` per session)
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod grid;
pub mod progression;
pub mod session;
pub mod tick;

pub use collision::{enemy_hits_player, player_on_collectable};
pub use entities::{Collectable, CollectableKind, Direction, Enemy, Player, Sprite};
pub use grid::{Grid, Tile};
pub use progression::{Level, LevelPolicy, LevelUp, Progression, ScoreUpdate};
pub use session::{GameEvent, GamePhase, GameSlot, RenderItem, Session};
