//! Integration test: keyboard and gesture input feeding a session
//!
//! Covers the path from raw events (key events, classifier labels) through
//! `InputSampler` to the session's jump and restart handling.

use std::io::Cursor;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dino::gesture::{gesture_channel, read_labels};
use dino::input::{InputSampler, KeyAction};
use dino::runner::{Obstacle, ObstacleKind, PlayerState};
use dino::{GameConfig, Session, SessionState, TickOutcome, FRAME_MS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn space(kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, kind)
}

/// Put a session into GameOver by dropping a cactus on the player.
fn crashed_session(rng: &mut ChaCha8Rng) -> Session {
    let mut session = Session::new(&GameConfig::default(), 0).unwrap();
    let x = session.player.body.rect.center_x();
    session
        .obstacles
        .push(Obstacle::new(500, ObstacleKind::Ground(4), x));
    let outcome = session.tick(FRAME_MS, Default::default(), rng);
    assert!(matches!(outcome, TickOutcome::Collided { .. }));
    session
}

#[test]
fn test_key_press_makes_player_jump() {
    let mut session = Session::new(&GameConfig::default(), 0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut sampler = InputSampler::new();

    assert_eq!(
        sampler.handle_key(&space(KeyEventKind::Press)),
        KeyAction::Jump
    );
    session.tick(FRAME_MS, sampler.sample(false), &mut rng);
    assert_eq!(session.player.state, PlayerState::Airborne);
}

#[test]
fn test_held_key_does_not_restart_twice() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut session = crashed_session(&mut rng);
    let mut sampler = InputSampler::new();

    // Key already held while crashing: repeats must not restart.
    sampler.handle_key(&space(KeyEventKind::Press));
    sampler.sample(false);
    let mut now = 2 * FRAME_MS;
    for _ in 0..5 {
        sampler.handle_key(&space(KeyEventKind::Repeat));
        now += FRAME_MS;
        assert_eq!(
            session.tick(now, sampler.sample(false), &mut rng),
            TickOutcome::GameOver
        );
    }

    sampler.handle_key(&space(KeyEventKind::Release));
    sampler.sample(false);
    sampler.handle_key(&space(KeyEventKind::Press));
    now += FRAME_MS;
    assert_eq!(
        session.tick(now, sampler.sample(false), &mut rng),
        TickOutcome::Restarted
    );
    assert_eq!(session.state, SessionState::Running);
}

#[test]
fn test_gesture_feed_jumps_and_restarts() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let (tx, mut rx) = gesture_channel();
    let mut sampler = InputSampler::new();

    // No palm yet: nothing happens.
    let mut session = Session::new(&GameConfig::default(), 0).unwrap();
    read_labels(Cursor::new("None\n"), &tx);
    session.tick(FRAME_MS, sampler.sample(rx.sample()), &mut rng);
    assert_eq!(session.player.state, PlayerState::Grounded);

    // Open palm: jump.
    read_labels(Cursor::new("Thumb_Up\nOpen_Palm\n"), &tx);
    session.tick(2 * FRAME_MS, sampler.sample(rx.sample()), &mut rng);
    assert_eq!(session.player.state, PlayerState::Airborne);

    // After a crash, closing then opening the palm restarts.
    let mut session = crashed_session(&mut rng);
    read_labels(Cursor::new("Closed_Fist\n"), &tx);
    assert_eq!(
        session.tick(3 * FRAME_MS, sampler.sample(rx.sample()), &mut rng),
        TickOutcome::GameOver
    );
    read_labels(Cursor::new("Open_Palm\n"), &tx);
    assert_eq!(
        session.tick(4 * FRAME_MS, sampler.sample(rx.sample()), &mut rng),
        TickOutcome::Restarted
    );
}

#[test]
fn test_closed_gesture_feed_reads_as_released() {
    let (tx, mut rx) = gesture_channel();
    read_labels(Cursor::new("Open_Palm\n"), &tx);
    drop(tx);
    assert!(!rx.sample());
    assert!(!rx.is_connected());

    let mut sampler = InputSampler::new();
    let input = sampler.sample(rx.sample());
    assert!(!input.jump);
    assert!(!input.restart);
}
