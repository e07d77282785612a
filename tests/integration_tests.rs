//! Integration tests for the frame loop: key events in, session state out

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tui_2048::core::{Board, GameSession, SessionConfig};
use tui_2048::input::{FrameCollector, KeyOutcome};
use tui_2048::types::PieceValue::{Empty as E, Four, Two};
use tui_2048::types::{MergePolicy, Screen};

const FRAME: f32 = 1.0 / 60.0;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// One frame of the application loop with the given key events
fn frame(session: &mut GameSession, collector: &mut FrameCollector, keys: &[KeyCode]) {
    for &code in keys {
        assert_ne!(collector.handle_key(key(code)), KeyOutcome::Quit);
    }
    session.update(FRAME, &collector.take());
}

fn idle(session: &mut GameSession, collector: &mut FrameCollector, seconds: f32) {
    // A few spare frames absorb float drift in the countdowns.
    let frames = (seconds / FRAME).ceil() as usize + 10;
    for _ in 0..frames {
        frame(session, collector, &[]);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut session = GameSession::new(12345, SessionConfig::default());
    let mut collector = FrameCollector::new();
    assert_eq!(session.screen(), Screen::Start);

    frame(&mut session, &mut collector, &[KeyCode::Char(' ')]);
    assert_eq!(session.games_started(), 1);
    assert!(session.input_blocked());

    idle(&mut session, &mut collector, 2.0 * 1.25);
    assert_eq!(session.screen(), Screen::Gameplay);
    assert!(!session.input_blocked());

    *session.board_mut() = Board::from_rows([[E, Two, E, Two], [E; 4], [E; 4], [E; 4]]);
    frame(&mut session, &mut collector, &[KeyCode::Char('a')]);
    assert_eq!(session.board().value(0, 0), Four);
    assert_eq!(session.board().occupied_count(), 2);
}

#[test]
fn test_keys_collected_between_frames_apply_together() {
    let mut session = GameSession::new(7, SessionConfig::default());
    let mut collector = FrameCollector::new();
    frame(&mut session, &mut collector, &[KeyCode::Enter]);
    idle(&mut session, &mut collector, 2.5);

    // Left and Down in one frame: horizontal first, then vertical.
    *session.board_mut() = Board::from_rows([[E, E, E, Two], [E; 4], [E; 4], [E; 4]]);
    frame(&mut session, &mut collector, &[KeyCode::Left, KeyCode::Down]);
    assert_eq!(session.board().value(0, 3), Two);

    // Nothing carries over to the next frame.
    assert!(collector.peek().is_empty());
}

#[test]
fn test_key_release_is_ignored() {
    let mut collector = FrameCollector::new();
    let release = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(collector.handle_key(release), KeyOutcome::Ignored);
    assert!(collector.peek().is_empty());
}

#[test]
fn test_quit_keys() {
    let mut collector = FrameCollector::new();
    assert_eq!(collector.handle_key(key(KeyCode::Esc)), KeyOutcome::Quit);
    assert_eq!(
        collector.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        KeyOutcome::Quit
    );
}

#[test]
fn test_loss_and_restart_through_keys() {
    let config = SessionConfig::default().with_merge_policy(MergePolicy::SinglePerMove);
    let mut session = GameSession::new(99, config);
    let mut collector = FrameCollector::new();
    frame(&mut session, &mut collector, &[KeyCode::Char(' ')]);
    idle(&mut session, &mut collector, 2.5);

    *session.board_mut() = Board::from_rows([
        [Two, Four, Two, Four],
        [Four, Two, Four, Two],
        [Two, Four, Two, Four],
        [Four, Two, Four, Two],
    ]);
    session.check_terminal();
    idle(&mut session, &mut collector, 2.0 + 2.0 * 1.25);
    assert_eq!(session.screen(), Screen::Loss);
    assert_eq!(session.highest_piece(), Four);

    frame(&mut session, &mut collector, &[KeyCode::Char('r')]);
    assert_eq!(session.games_started(), 2);
    assert_eq!(session.scheduler().destination(), Screen::Gameplay);
}
