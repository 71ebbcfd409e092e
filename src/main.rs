//! Bug Crossing headless driver
//!
//! Runs the simulation without a renderer: a simple autopilot plays a few
//! games, logging events and presentation effects as they are emitted.
//!
//! Usage: `bug-crossing [settings.json]`

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bug_crossing::Settings;
use bug_crossing::consts::*;
use bug_crossing::sim::{Direction, GameEvent, GameSlot, Session};

/// Moves per second the autopilot makes
const MOVES_PER_SECOND: f32 = 4.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bug Crossing (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bug-crossing.json"));
    let settings = Settings::load_or_default(&path);

    let mut slot = GameSlot::default();
    slot.start(&settings);
    let Some(session) = slot.session_mut() else {
        log::error!("Session failed to start");
        return;
    };
    log::info!("Game initialized with seed: {}", session.seed);

    let mut pilot = Pcg32::seed_from_u64(session.seed ^ 0x5eed);
    for game in 1..=settings.autoplay_games.max(1) {
        if game > 1 {
            session.restart();
        }
        play_one(session, &settings, &mut pilot);
        log::info!(
            "Game {game}: {} points, level {}",
            session.player.points,
            session.level().number()
        );
    }

    if session.high_scores.is_empty() {
        println!("No scores recorded");
    }
    for line in session.high_scores.display_lines() {
        println!("{line}");
    }
    match serde_json::to_string(&session.render_state()) {
        Ok(json) => log::debug!("Final render state: {json}"),
        Err(e) => log::warn!("Cannot serialize render state: {e}"),
    }
}

/// Play until game over or the frame budget runs out
fn play_one(session: &mut Session, settings: &Settings, pilot: &mut Pcg32) {
    let frames_per_move = ((1.0 / settings.frame_dt) / MOVES_PER_SECOND).max(1.0) as u32;

    for frame in 0..settings.max_frames {
        if frame % frames_per_move == 0 {
            let direction = choose_move(session, pilot);
            session.handle_input(direction);
        }
        session.tick(settings.frame_dt);

        for effect in session.drain_effects() {
            log::debug!("Effect: {effect:?}");
        }
        for event in session.drain_events() {
            match event {
                GameEvent::GameOver { top_scores } => {
                    log::info!("Top scores: {top_scores:?}");
                }
                GameEvent::LevelChanged { level } => log::info!("Level {level}"),
                other => log::trace!("{other:?}"),
            }
        }

        if session.is_game_over() {
            return;
        }
    }
    log::info!("Frame budget exhausted after {} frames", settings.max_frames);
}

/// Mostly forward, sometimes sideways; waits when an enemy is close on the
/// row ahead
fn choose_move(session: &Session, pilot: &mut Pcg32) -> Option<Direction> {
    let player = &session.player;
    let ahead = player.tile.row.checked_sub(1)?;
    let ahead_y = bug_crossing::row_to_y(ahead);
    let danger = session.enemies.iter().any(|e| {
        e.pos.y == ahead_y && e.pos.x < player.pos.x && e.pos.x > player.pos.x - 2.0 * TILE_WIDTH
    });

    if danger {
        return None;
    }
    match pilot.random_range(0..10) {
        0 => Some(Direction::Left),
        1 => Some(Direction::Right),
        2 => None,
        _ => Some(Direction::Up),
    }
}
