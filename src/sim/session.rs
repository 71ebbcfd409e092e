//! Session aggregate
//!
//! Owns the grid, every entity, the level machine and the leaderboard. The
//! driver only talks to a `Session` (through `GameSlot` before start-up).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Collectable, CollectableKind, Direction, Enemy, Player, Sprite};
use super::grid::{Grid, Tile};
use super::progression::{Level, LevelPolicy, Progression, ScoreUpdate};
use crate::consts::*;
use crate::effects::{Effect, EffectQueue};
use crate::error::GameError;
use crate::highscores::HighScores;
use crate::settings::{Character, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Lives ran out; waiting for `restart`
    GameOver,
}

/// Notifications for the scoreboard/UI, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { points: u32 },
    LevelChanged { level: u8 },
    LivesChanged { lives: u8 },
    Crossed,
    Collected { kind: CollectableKind, points: u32 },
    PlayerHit,
    GameOver { top_scores: Vec<u32> },
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub sprite: Sprite,
    pub pos: Vec2,
}

/// Complete mutable game state
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub grid: Grid,
    pub player: Player,
    /// Ordered; level-ups append
    pub enemies: Vec<Enemy>,
    /// Ordered; level-ups append
    pub collectables: Vec<Collectable>,
    pub progression: Progression,
    pub phase: GamePhase,
    /// Survives restarts
    pub high_scores: HighScores,
    events: Vec<GameEvent>,
    effects: EffectQueue,
}

impl Session {
    /// Create a session at level 1 with the initial roster
    pub fn new(seed: u64, policy: LevelPolicy, character: Character) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut grid = Grid::new();
        let player = Player::new(character, &mut rng, &mut grid);

        let mut session = Self {
            seed,
            rng,
            grid,
            player,
            enemies: Vec::with_capacity(MAX_ENEMIES + 2),
            collectables: Vec::with_capacity(MAX_COLLECTABLES + 2),
            progression: Progression::new(policy),
            phase: GamePhase::Playing,
            high_scores: HighScores::new(),
            events: Vec::new(),
            effects: EffectQueue::default(),
        };
        session.spawn_roster();
        log::info!("Session started with seed {seed} ({policy:?} levels)");
        session
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.effective_seed(),
            settings.level_policy,
            settings.character,
        )
    }

    /// Discard every entity and start again at level 1. The leaderboard and
    /// the chosen character are kept.
    pub fn restart(&mut self) {
        self.effects.restart();
        self.progression.reset();
        self.phase = GamePhase::Playing;
        self.player = Player::new(self.player.character, &mut self.rng, &mut self.grid);
        self.spawn_roster();
        log::info!("Session restarted");
    }

    /// Initial enemies and collectables, plus the opening scoreboard state
    fn spawn_roster(&mut self) {
        self.enemies.clear();
        self.collectables.clear();
        for _ in 0..MAX_ENEMIES {
            self.enemies.push(Enemy::new(&mut self.rng));
        }
        for _ in 0..MAX_COLLECTABLES {
            self.collectables.push(Collectable::new(
                CollectableKind::Star,
                &mut self.rng,
                &mut self.grid,
            ));
        }

        self.events.push(GameEvent::LivesChanged {
            lives: self.player.lives,
        });
        self.effects.lives_changed(self.player.lives, MAX_LIVES);
        self.events.push(GameEvent::ScoreChanged {
            points: self.player.points,
        });
        self.events.push(GameEvent::LevelChanged {
            level: self.progression.level().number(),
        });
    }

    pub fn level(&self) -> Level {
        self.progression.level()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn top_scores(&self) -> &[u32] {
        self.high_scores.scores()
    }

    /// Sprites and positions for the renderer: player, enemies, collectables
    pub fn render_state(&self) -> Vec<RenderItem> {
        let mut items = Vec::with_capacity(1 + self.enemies.len() + self.collectables.len());
        items.push(RenderItem {
            sprite: self.player.sprite(),
            pos: self.player.pos,
        });
        items.extend(self.enemies.iter().map(|e| RenderItem {
            sprite: Sprite::Enemy,
            pos: e.pos,
        }));
        items.extend(self.collectables.iter().map(|c| RenderItem {
            sprite: c.sprite(),
            pos: c.pos,
        }));
        items
    }

    /// Take pending UI notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take pending presentation effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects.drain()
    }

    /// Apply an externally supplied score delta. Anything that is not a
    /// whole finite number is rejected and the score is left alone. The
    /// score is frozen once the game is over.
    pub fn adjust_score(&mut self, raw: f64) -> Result<ScoreUpdate, GameError> {
        if !raw.is_finite() || raw.fract() != 0.0 {
            return Err(GameError::MalformedScoreDelta(raw));
        }
        if self.is_game_over() {
            return Ok(ScoreUpdate {
                points: self.player.points,
                ..Default::default()
            });
        }
        Ok(self.apply_score(raw as i64))
    }

    /// Apply a text direction token; unknown tokens are ignored
    pub fn handle_input_token(&mut self, token: &str) -> bool {
        match token.parse::<Direction>() {
            Ok(direction) => self.handle_input(Some(direction)),
            Err(e) => {
                log::debug!("Ignoring input: {e}");
                false
            }
        }
    }

    /// Route a score change through the level machine and grow the roster
    /// for every level-up taken
    pub(crate) fn apply_score(&mut self, delta: i64) -> ScoreUpdate {
        let update = self.progression.apply(&mut self.player, delta);
        self.events.push(GameEvent::ScoreChanged {
            points: update.points,
        });

        if let Some(level) = update.level_changed {
            log::info!("Level {} at {} points", level.number(), update.points);
            self.events.push(GameEvent::LevelChanged {
                level: level.number(),
            });
        }

        for level_up in &update.level_ups {
            self.enemies.push(Enemy::new(&mut self.rng));
            self.collectables.push(Collectable::new(
                level_up.collectable,
                &mut self.rng,
                &mut self.grid,
            ));
            for enemy in &mut self.enemies {
                enemy.accelerate_by(level_up.acceleration);
            }
        }

        update
    }

    /// Send the player back to the start row. The grid is rebuilt, so every
    /// collectable still on the board re-claims its cell.
    pub(crate) fn reset_player(&mut self) {
        self.player.reset(&mut self.rng, &mut self.grid);
        for collectable in &self.collectables {
            if collectable.claims_cell() {
                self.grid.occupy(collectable.tile);
            }
        }
    }

    /// Fresh layout for every collectable. All cells are given up first so
    /// the player's cell stays claimed even if it was shared.
    pub(crate) fn reset_collectables(&mut self) {
        for collectable in &mut self.collectables {
            collectable.release(&mut self.grid);
        }
        self.grid.occupy(self.player.tile);
        for collectable in &mut self.collectables {
            collectable.reset(&mut self.rng, &mut self.grid);
        }
    }

    /// Freeze the board and record the score
    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        for enemy in &mut self.enemies {
            enemy.stop();
        }
        self.high_scores.add_score(self.player.points);
        self.effects.game_over();
        log::info!(
            "Game over with {} points (top scores: {:?})",
            self.player.points,
            self.high_scores.scores()
        );
        self.events.push(GameEvent::GameOver {
            top_scores: self.high_scores.scores().to_vec(),
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn effects_mut(&mut self) -> &mut EffectQueue {
        &mut self.effects
    }

    /// Cells that should be occupied: the player's and every placed,
    /// uncollected collectable's.
    ///
    /// A tile is listed once even when two entities claim it. That happens
    /// when the last hit respawns the player on a collectable's cell: the
    /// game ends before the pickup check, so the shared cell stays shared
    /// until `restart`.
    pub fn claimed_tiles(&self) -> Vec<Tile> {
        let mut tiles = vec![self.player.tile];
        for collectable in &self.collectables {
            if collectable.claims_cell() && !tiles.contains(&collectable.tile) {
                tiles.push(collectable.tile);
            }
        }
        tiles
    }

    /// Grid matches exactly the set of claimed tiles
    pub fn grid_consistent(&self) -> bool {
        let claimed = self.claimed_tiles();
        claimed.iter().all(|&t| !self.grid.is_free(t))
            && self.grid.occupied_count() == claimed.len()
    }
}

/// Session slot held by the driver before and after start-up
#[derive(Debug, Default)]
pub enum GameSlot {
    #[default]
    Uninitialized,
    Active(Box<Session>),
}

impl GameSlot {
    /// Start (or replace) the session
    pub fn start(&mut self, settings: &Settings) {
        *self = GameSlot::Active(Box::new(Session::from_settings(settings)));
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            GameSlot::Active(session) => Some(&**session),
            GameSlot::Uninitialized => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            GameSlot::Active(session) => Some(&mut **session),
            GameSlot::Uninitialized => None,
        }
    }

    /// No-op until a session exists
    pub fn tick(&mut self, dt: f32) {
        if let Some(session) = self.session_mut() {
            session.tick(dt);
        }
    }

    /// No-op until a session exists
    pub fn handle_input(&mut self, direction: Option<Direction>) -> bool {
        self.session_mut()
            .map(|s| s.handle_input(direction))
            .unwrap_or(false)
    }

    pub fn render_state(&self) -> Vec<RenderItem> {
        self.session().map(Session::render_state).unwrap_or_default()
    }
}
