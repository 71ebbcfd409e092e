use bug_crossing::consts::*;
use bug_crossing::effects::{Effect, EffectTarget};
use bug_crossing::sim::{
    CollectableKind, Direction, GameEvent, GamePhase, Level, LevelPolicy, Session, Tile,
};
use bug_crossing::{Character, tile_origin};
use glam::Vec2;

fn session(policy: LevelPolicy) -> Session {
    let mut session = Session::new(2024, policy, Character::CatGirl);
    // Stop every enemy well off the board
    for enemy in &mut session.enemies {
        enemy.speed = 0.0;
        enemy.pos.x = -3.0 * TILE_WIDTH;
    }
    session.drain_events();
    session.drain_effects();
    session
}

/// Move a collectable onto `tile`, keeping the grid in step
fn put_collectable(session: &mut Session, index: usize, kind: CollectableKind, tile: Tile) {
    let collectable = &mut session.collectables[index];
    collectable.release(&mut session.grid);
    collectable.kind = kind;
    collectable.tile = tile;
    collectable.pos = tile_origin(tile.row, tile.col);
    collectable.collected = false;
    collectable.placed = session.grid.occupy(tile);
}

/// Line every collectable up along the top row
fn park_all(session: &mut Session) {
    for collectable in &mut session.collectables {
        collectable.release(&mut session.grid);
    }
    for i in 0..session.collectables.len() {
        put_collectable(session, i, CollectableKind::Star, Tile::new(0, i));
    }
}

#[test]
fn gem_on_next_cell_is_collected_by_one_move() {
    let mut session = session(LevelPolicy::Monotonic);
    park_all(&mut session);
    let start = session.player.tile;
    assert_eq!(start.row, ROWS - 1);

    let target = Tile::new(ROWS - 2, start.col);
    put_collectable(&mut session, 0, CollectableKind::Gem, target);
    let occupied = session.grid.occupied_count();

    assert!(session.handle_input(Some(Direction::Up)));

    assert_eq!(session.player.points, POINTS_GEM);
    assert!(session.collectables[0].collected);
    assert!(!session.collectables[0].claims_cell());
    // Player's old cell and the gem's cell merge into the one the player holds
    assert_eq!(session.grid.occupied_count(), occupied - 1);
    assert!(session.grid.is_free(start));
    assert!(session.grid_consistent());
    assert!(session.drain_events().contains(&GameEvent::Collected {
        kind: CollectableKind::Gem,
        points: POINTS_GEM
    }));
}

#[test]
fn last_life_lost_ends_the_game() {
    let mut session = session(LevelPolicy::Monotonic);
    session.adjust_score(70.0).unwrap();
    session.player.lives = 1;

    // Walk into the hazard band
    session.handle_input(Some(Direction::Up));
    session.handle_input(Some(Direction::Up));
    let points = session.player.points;
    let player_pos = session.player.pos;
    session.enemies[0].pos = player_pos - Vec2::new(TILE_HEIGHT / 2.0, 0.0);
    session.drain_events();

    session.tick(1.0 / 60.0);

    assert_eq!(session.player.lives, 0);
    assert_eq!(session.phase, GamePhase::GameOver);
    let expected = points - 10;
    assert_eq!(session.top_scores(), &[expected]);

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::GameOver {
        top_scores: vec![expected]
    }));
    let effects = session.drain_effects();
    assert_eq!(
        &effects[effects.len() - 3..],
        &[
            Effect::Remove(EffectTarget::Canvas),
            Effect::Show(EffectTarget::TopScores),
            Effect::Show(EffectTarget::RestartButton),
        ]
    );
    assert!(effects.contains(&Effect::Hide(EffectTarget::LifeIcon(1))));
}

#[test]
fn crossing_t2_grows_roster_and_speeds_up_enemies() {
    let mut session = session(LevelPolicy::Monotonic);
    for (i, enemy) in session.enemies.iter_mut().enumerate() {
        enemy.speed = 1.0 + i as f32;
    }
    let before: Vec<f32> = session.enemies.iter().map(|e| e.speed).collect();

    session.adjust_score((LEVEL_2_POINTS - 1) as f64).unwrap();
    assert_eq!(session.enemies.len(), MAX_ENEMIES);

    session.adjust_score(1.0).unwrap();

    assert_eq!(session.player.points, LEVEL_2_POINTS);
    assert_eq!(session.level(), Level::Two);
    assert_eq!(session.enemies.len(), MAX_ENEMIES + 1);
    assert_eq!(session.collectables.len(), MAX_COLLECTABLES + 1);
    for (enemy, speed) in session.enemies.iter().zip(&before) {
        assert_eq!(enemy.speed, speed + LEVEL_2_ACCELERATION);
    }
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::LevelChanged { level: 2 })
    );
    assert!(session.grid_consistent());
}

#[test]
fn level_three_adds_gem_and_faster_enemies() {
    let mut session = session(LevelPolicy::Monotonic);
    session.adjust_score(LEVEL_2_POINTS as f64).unwrap();
    let before: Vec<f32> = session.enemies.iter().map(|e| e.speed).collect();

    session.adjust_score((LEVEL_3_POINTS - LEVEL_2_POINTS) as f64).unwrap();

    assert_eq!(session.level(), Level::Three);
    assert_eq!(session.enemies.len(), MAX_ENEMIES + 2);
    assert_eq!(
        session.collectables.last().map(|c| c.kind),
        Some(CollectableKind::Gem)
    );
    for (enemy, speed) in session.enemies.iter().zip(&before) {
        assert_eq!(enemy.speed, speed + LEVEL_3_ACCELERATION);
    }
}

#[test]
fn strict_policy_relabels_but_keeps_roster() {
    let mut session = session(LevelPolicy::Strict);
    session.adjust_score(LEVEL_2_POINTS as f64).unwrap();
    session.adjust_score(POINTS_ENEMY_HIT as f64).unwrap();

    assert_eq!(session.level(), Level::One);
    assert_eq!(session.enemies.len(), MAX_ENEMIES + 1);
    assert_eq!(session.collectables.len(), MAX_COLLECTABLES + 1);
}

#[test]
fn restart_twice_matches_restart_once() {
    let mut session = session(LevelPolicy::Monotonic);
    session.adjust_score(LEVEL_3_POINTS as f64).unwrap();
    session.player.lives = 1;
    session.high_scores.add_score(999);

    session.restart();
    session.restart();

    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(session.level(), Level::One);
    assert_eq!(session.player.points, 0);
    assert_eq!(session.player.lives, MAX_LIVES);
    assert_eq!(session.player.character, Character::CatGirl);
    assert_eq!(session.enemies.len(), MAX_ENEMIES);
    assert_eq!(session.collectables.len(), MAX_COLLECTABLES);
    assert!(
        session
            .enemies
            .iter()
            .all(|e| e.speed >= SPEED_MIN && e.speed < SPEED_MAX)
    );
    assert!(
        session
            .collectables
            .iter()
            .all(|c| c.kind == CollectableKind::Star && c.claims_cell())
    );
    assert!(session.grid_consistent());
    assert_eq!(session.top_scores(), &[999]);

    let effects = session.drain_effects();
    assert_eq!(
        &effects[..3],
        &[
            Effect::Remove(EffectTarget::TopScores),
            Effect::Remove(EffectTarget::RestartButton),
            Effect::Show(EffectTarget::Canvas),
        ]
    );
}

#[test]
fn leaderboard_keeps_three_distinct_scores_across_games() {
    let mut session = session(LevelPolicy::Monotonic);
    let mut boards = Vec::new();
    for points in [30.0, 50.0, 30.0, 10.0, 70.0] {
        session.restart();
        park_all(&mut session);
        session.adjust_score(points).unwrap();
        session.player.lives = 1;
        let row = session.player.tile.row - 2;
        session.handle_input(Some(Direction::Up));
        session.handle_input(Some(Direction::Up));
        assert_eq!(session.player.tile.row, row);
        session.enemies[0].speed = 0.0;
        session.enemies[0].pos = session.player.pos - Vec2::new(1.0, 0.0);
        session.tick(0.0);
        assert!(session.is_game_over());
        boards.push(session.top_scores().to_vec());
    }

    // Each game ends on the hit penalty
    assert_eq!(boards[0], vec![20]);
    assert_eq!(boards[1], vec![40, 20]);
    // Repeated score is not listed twice
    assert_eq!(boards[2], vec![40, 20]);
    assert_eq!(boards[3], vec![40, 20, 0]);
    assert_eq!(boards[4], vec![60, 40, 20]);
    assert_eq!(
        session.high_scores.display_lines(),
        vec!["1. 60 Points", "2. 40 Points", "3. 20 Points"]
    );
}
