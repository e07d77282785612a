//! Session state machine tests: screens, timers, win and loss detection

use tui_2048::core::{Board, GameSession, SessionConfig};
use tui_2048::types::PieceValue::{self, Empty as E, Four, Two};
use tui_2048::types::{FrameInput, GameKey, Screen};

/// Frame length; with the timings below every countdown lands exactly on zero.
const DT: f32 = 0.25;

fn new_session() -> GameSession {
    let config = SessionConfig::default()
        .with_transition_time(1.0)
        .with_delay_time(2.0);
    GameSession::new(9, config)
}

fn step(session: &mut GameSession, frames: usize) {
    for _ in 0..frames {
        session.update(DT, &FrameInput::new());
    }
}

fn press(session: &mut GameSession, key: GameKey) {
    let mut input = FrameInput::new();
    input.press(key);
    session.update(DT, &input);
}

/// Press Start and wait out the crossfade
fn start_playing(session: &mut GameSession) {
    press(session, GameKey::Start);
    step(session, 8);
    assert_eq!(session.screen(), Screen::Gameplay);
    assert!(!session.input_blocked());
}

fn values(board: &Board) -> Vec<[PieceValue; 4]> {
    (0..board.rows()).map(|row| board.row_values(row)).collect()
}

fn stuck_board() -> Board {
    let (a, b) = (PieceValue::Eight, PieceValue::Sixteen);
    Board::from_rows([[a, b, a, b], [b, a, b, a], [a, b, a, b], [b, a, b, a]])
}

#[test]
fn test_start_key_begins_game_with_crossfade() {
    let mut session = new_session();
    press(&mut session, GameKey::Start);

    assert_eq!(session.games_started(), 1);
    assert_eq!(session.board().occupied_count(), 2);
    assert_eq!(session.scheduler().destination(), Screen::Gameplay);

    // Fade out of the start screen.
    for _ in 0..3 {
        step(&mut session, 1);
        assert_eq!(session.screen(), Screen::Start);
        assert!(session.input_blocked());
    }
    // Fade in on gameplay.
    for frame in 4..=8 {
        step(&mut session, 1);
        assert_eq!(session.screen(), Screen::Gameplay);
        assert_eq!(session.input_blocked(), frame < 8, "frame {frame}");
    }
}

#[test]
fn test_start_key_ignored_during_crossfade() {
    let mut session = new_session();
    press(&mut session, GameKey::Start);
    press(&mut session, GameKey::Start);
    assert_eq!(session.games_started(), 1);
}

#[test]
fn test_restart_key_ignored_on_start_screen() {
    let mut session = new_session();
    press(&mut session, GameKey::Restart);
    press(&mut session, GameKey::Left);
    assert_eq!(session.games_started(), 0);
    assert_eq!(session.board().occupied_count(), 0);
}

#[test]
fn test_move_merges_and_spawns() {
    let mut session = new_session();
    start_playing(&mut session);

    let board = session.board_mut();
    board.clear();
    board.set_value(0, 0, Two);
    board.set_value(1, 0, Two);

    press(&mut session, GameKey::Left);

    assert_eq!(session.board().value(0, 0), Four);
    assert_eq!(session.board().occupied_count(), 2);
    assert_eq!(session.scheduler().pending(), None);
}

#[test]
fn test_move_without_change_spawns_nothing() {
    let mut session = new_session();
    start_playing(&mut session);

    let board = session.board_mut();
    board.clear();
    board.set_value(0, 0, Two);
    board.set_value(1, 0, Four);

    press(&mut session, GameKey::Left);

    assert_eq!(session.board().occupied_count(), 2);
    assert_eq!(session.board().row_values(0), [Two, Four, E, E]);
}

#[test]
fn test_moves_ignored_while_fading_in() {
    let mut session = new_session();
    press(&mut session, GameKey::Start);
    step(&mut session, 4);
    assert_eq!(session.screen(), Screen::Gameplay);
    assert!(session.input_blocked());

    *session.board_mut() = Board::from_rows([[Two, Two, E, E], [E; 4], [E; 4], [E; 4]]);
    press(&mut session, GameKey::Left);

    assert_eq!(session.board().row_values(0), [Two, Two, E, E]);
    assert_eq!(session.board().occupied_count(), 2);
}

#[test]
fn test_opposite_keys_cancel() {
    let mut session = new_session();
    start_playing(&mut session);

    *session.board_mut() = Board::from_rows([[E, Two, E, E], [E; 4], [E; 4], [E; 4]]);
    let mut input = FrameInput::new();
    input.press(GameKey::Left);
    input.press(GameKey::Right);
    session.update(DT, &input);

    assert_eq!(session.board().row_values(0), [E, Two, E, E]);
}

#[test]
fn test_reaching_max_schedules_win() {
    let mut session = new_session();
    start_playing(&mut session);

    let half = PieceValue::TenTwentyFour;
    *session.board_mut() = Board::from_rows([[half, half, E, E], [E; 4], [E; 4], [E; 4]]);
    press(&mut session, GameKey::Left);

    assert_eq!(session.board().value(0, 0), PieceValue::MAX);
    assert_eq!(session.scheduler().pending(), Some(Screen::Win));
    assert!(session.input_blocked());
    assert_eq!(session.screen(), Screen::Gameplay);

    // Player input waits for the delay...
    let before = values(session.board());
    press(&mut session, GameKey::Right);
    assert_eq!(values(session.board()), before);

    // ...but moves applied directly still go through.
    let board = session.board_mut();
    board.clear();
    board.set_value(3, 3, Two);
    assert!(session.apply_move(-1, 0));
    assert_eq!(session.board().value(0, 3), Two);

    // Delay (8 frames from the win) then crossfade.
    step(&mut session, 10);
    assert_eq!(session.screen(), Screen::Gameplay);
    assert_eq!(session.scheduler().destination(), Screen::Win);
    step(&mut session, 1);
    assert_eq!(session.screen(), Screen::Win);
    assert!(session.input_blocked());
    step(&mut session, 4);
    assert!(!session.input_blocked());
}

#[test]
fn test_two_max_merges_in_one_move_schedule_one_win() {
    let mut session = new_session();
    start_playing(&mut session);

    let half = PieceValue::TenTwentyFour;
    *session.board_mut() = Board::from_rows([[half, half, E, E], [E, E, half, half], [E; 4], [E; 4]]);
    assert!(session.apply_move(-1, 0));
    assert_eq!(session.scheduler().pending(), Some(Screen::Win));

    step(&mut session, 8);
    assert_eq!(session.scheduler().pending(), None);
    assert_eq!(session.scheduler().destination(), Screen::Win);
    step(&mut session, 8);
    assert_eq!(session.screen(), Screen::Win);
    assert!(!session.input_blocked());
}

#[test]
fn test_play_time_covers_start_to_win() {
    let mut session = new_session();
    start_playing(&mut session);
    session.update(125.0, &FrameInput::new());

    let half = PieceValue::TenTwentyFour;
    *session.board_mut() = Board::from_rows([[half, half, E, E], [E; 4], [E; 4], [E; 4]]);
    press(&mut session, GameKey::Left);

    assert_eq!(session.play_time().to_string(), "2m 7s");

    // Time after the win does not count.
    step(&mut session, 40);
    assert_eq!(session.play_time().to_string(), "2m 7s");
}

#[test]
fn test_stuck_board_schedules_loss_and_records_highest() {
    let mut session = new_session();
    start_playing(&mut session);
    assert_eq!(session.highest_piece(), Two);

    let mut board = stuck_board();
    board.set_value(0, 0, PieceValue::SixtyFour);
    *session.board_mut() = board;

    session.check_terminal();
    assert_eq!(session.scheduler().pending(), Some(Screen::Loss));

    step(&mut session, 8);
    assert_eq!(session.scheduler().destination(), Screen::Loss);
    assert_eq!(session.highest_piece(), PieceValue::SixtyFour);

    step(&mut session, 8);
    assert_eq!(session.screen(), Screen::Loss);
    assert!(!session.input_blocked());
}

#[test]
fn test_equal_neighbours_do_not_lose() {
    let mut session = new_session();
    start_playing(&mut session);

    let mut board = stuck_board();
    board.set_value(1, 0, PieceValue::Eight);
    *session.board_mut() = board;

    session.check_terminal();
    assert_eq!(session.scheduler().pending(), None);
    assert!(!session.input_blocked());
}

#[test]
fn test_spawn_into_last_hole_loses() {
    let mut session = new_session();
    start_playing(&mut session);

    // Row 0 slides left, leaving one hole whose neighbours can't match a 2 or a 4.
    let mut board = stuck_board();
    board.set_value(0, 0, E);
    board.set_value(1, 0, PieceValue::Eight);
    board.set_value(2, 0, PieceValue::Sixteen);
    board.set_value(3, 0, PieceValue::Eight);
    *session.board_mut() = board;

    press(&mut session, GameKey::Left);

    assert!(session.board().is_full());
    assert_eq!(session.scheduler().pending(), Some(Screen::Loss));
}

#[test]
fn test_spawn_on_full_board_is_skipped() {
    let mut session = new_session();
    start_playing(&mut session);

    let board = Board::from_rows([[Two; 4]; 4]);
    *session.board_mut() = board.clone();
    session.spawn_piece();

    assert_eq!(session.board(), &board);
    assert_eq!(session.scheduler().pending(), None);
}

#[test]
fn test_restart_after_loss() {
    let mut session = new_session();
    start_playing(&mut session);

    *session.board_mut() = stuck_board();
    session.check_terminal();
    step(&mut session, 16);
    assert_eq!(session.screen(), Screen::Loss);

    press(&mut session, GameKey::Start);
    assert_eq!(session.games_started(), 1);

    press(&mut session, GameKey::Restart);
    assert_eq!(session.games_started(), 2);
    assert_eq!(session.scheduler().destination(), Screen::Gameplay);
    assert_eq!(session.board().occupied_count(), 2);

    step(&mut session, 8);
    assert_eq!(session.screen(), Screen::Gameplay);
    assert!(!session.input_blocked());
}

#[test]
fn test_restart_after_win() {
    let mut session = new_session();
    start_playing(&mut session);

    session.schedule_screen(Screen::Win);
    step(&mut session, 16);
    assert_eq!(session.screen(), Screen::Win);

    press(&mut session, GameKey::Restart);
    assert_eq!(session.games_started(), 2);
    step(&mut session, 8);
    assert_eq!(session.screen(), Screen::Gameplay);
}

#[test]
fn test_reschedule_replaces_pending_target() {
    let mut session = new_session();
    start_playing(&mut session);

    session.schedule_screen(Screen::Win);
    step(&mut session, 4);
    session.schedule_screen(Screen::Loss);
    assert_eq!(session.scheduler().pending(), Some(Screen::Loss));

    // The delay restarts from the second request.
    step(&mut session, 7);
    assert_eq!(session.scheduler().destination(), Screen::Gameplay);
    step(&mut session, 1);
    assert_eq!(session.scheduler().destination(), Screen::Loss);
}

#[test]
fn test_clock_sums_frame_deltas() {
    let mut session = new_session();
    step(&mut session, 6);
    assert_eq!(session.clock(), 1.5);
}

#[test]
fn test_same_seed_same_deal() {
    let mut a = new_session();
    let mut b = new_session();
    press(&mut a, GameKey::Start);
    press(&mut b, GameKey::Start);
    assert_eq!(a.board(), b.board());
}
