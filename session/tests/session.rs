use std::time::Duration;

use heavy_machine_gun_core::{Event, GamePhase, INITIAL_LIVES};
use heavy_machine_gun_rendering::FrameInput;
use heavy_machine_gun_session::{Session, SessionConfig};
use heavy_machine_gun_system_high_score::{KeyValueStore, MemoryStore, HIGH_SCORE_KEY};
use heavy_machine_gun_world::query;

const FRAME: Duration = Duration::from_millis(50);

fn session(seed: u64) -> Session<MemoryStore> {
    let config = SessionConfig {
        seed,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, MemoryStore::new());
    let _ = session.start();
    session
}

fn sweeping_input(frame: u32) -> FrameInput {
    let phase = (frame % 160) as f32 / 160.0;
    FrameInput {
        target_x: Some(100.0 + 600.0 * phase),
        restart: false,
    }
}

fn replay(seed: u32, frames: u32) -> Vec<Event> {
    let mut session = session(u64::from(seed));
    let mut log = Vec::new();
    for frame in 0..frames {
        log.extend(session.advance(FRAME, sweeping_input(frame)));
    }
    log
}

/// Steers to the far left edge so nearly every enemy escapes.
fn run_until_game_over(session: &mut Session<MemoryStore>) -> u64 {
    let input = FrameInput {
        target_x: Some(0.0),
        restart: false,
    };
    for _ in 0..2_400 {
        for event in session.advance(FRAME, input) {
            if let Event::GameOver { final_score } = event {
                return final_score;
            }
        }
    }
    panic!("game did not end while the player stayed away from enemies");
}

#[test]
fn identical_seeds_replay_identically() {
    let first = replay(0x2024, 1_200);
    let second = replay(0x2024, 1_200);

    assert_eq!(first, second);
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::VolleyFired { .. })));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(replay(1, 400), replay(2, 400));
}

#[test]
fn sweeping_player_scores_and_levels_up() {
    let mut session = session(99);
    let mut levelled = false;
    for frame in 0..2_400 {
        for event in session.advance(FRAME, sweeping_input(frame)) {
            levelled |= matches!(event, Event::LevelUp { .. });
        }
        if session.game().is_game_over() {
            break;
        }
    }
    let game = session.game();
    assert!(game.enemies_killed > 0);
    assert!(game.score > 0);
    assert!(levelled || game.enemies_killed < 10);
}

#[test]
fn nothing_spawns_after_game_over() {
    let mut session = session(5);
    let final_score = run_until_game_over(&mut session);

    assert_eq!(session.game().phase, GamePhase::GameOver);
    assert_eq!(session.game().lives, 0);
    assert_eq!(session.games_finished(), 1);
    assert_eq!(session.high_score(), final_score);

    for _ in 0..600 {
        for event in session.advance(FRAME, FrameInput::default()) {
            assert!(
                matches!(event, Event::TimeAdvanced { .. }),
                "unexpected event after game over: {event:?}"
            );
        }
    }
    assert!(query::enemy_view(session.world()).is_empty());
    assert!(query::power_up_view(session.world()).is_empty());
    assert_eq!(query::pending_actions(session.world()), 0);
    assert!(session.hud().game_over);
}

#[test]
fn restart_input_begins_a_new_game() {
    let mut session = session(17);
    let _ = run_until_game_over(&mut session);

    let events = session.advance(
        FRAME,
        FrameInput {
            target_x: None,
            restart: true,
        },
    );
    assert!(events.contains(&Event::GameRestarted));
    let game = session.game();
    assert_eq!(game.phase, GamePhase::Playing);
    assert_eq!(game.lives, INITIAL_LIVES);
    assert_eq!(game.score, 0);
    assert_eq!(game.level, 1);
    assert!(session.scene().acknowledgements.is_empty());

    let restarted = session.advance(
        FRAME,
        FrameInput {
            target_x: None,
            restart: true,
        },
    );
    assert!(!restarted.contains(&Event::GameRestarted));
}

#[test]
fn best_score_survives_into_the_store() {
    let mut session = session(23);
    let mut best = 0;
    for _ in 0..3 {
        best = best.max(run_until_game_over(&mut session));
        let _ = session.restart();
    }

    assert_eq!(session.games_finished(), 3);
    assert_eq!(session.high_score(), best);
    let stored = session
        .store()
        .get_u64(HIGH_SCORE_KEY)
        .expect("memory store read");
    if best > 0 {
        assert_eq!(stored, Some(best));
    } else {
        assert_eq!(stored, None);
    }
}

#[test]
fn presentation_refresh_tracks_the_world() {
    let mut session = session(31);
    let mut presentation = session.presentation();
    for frame in 0..200 {
        let _ = session.advance(FRAME, sweeping_input(frame));
    }
    session.refresh(&mut presentation);

    assert_eq!(presentation.hud, session.hud());
    assert_eq!(
        presentation.scene.enemies.len(),
        query::enemy_view(session.world()).len()
    );
    assert_eq!(
        presentation.scene.bullets.len(),
        query::bullet_view(session.world()).len()
    );
}
