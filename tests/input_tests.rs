use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_2048::core::{GameSession, SessionTiming};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::types::{Direction, GameAction};

#[test]
fn test_keys_drive_a_session() {
    let mut session = GameSession::new(11).with_timing(SessionTiming::INSTANT);

    let mut accepted = 0;
    for code in [KeyCode::Left, KeyCode::Char('k'), KeyCode::Char('d'), KeyCode::Down] {
        let action = handle_key_event(KeyEvent::from(code)).unwrap();
        assert!(matches!(action, GameAction::Swipe(_)));
        if session.apply_action(action) {
            accepted += 1;
        }
        session.finish_move();
    }
    assert!(accepted > 0);
    assert_eq!(session.move_count(), accepted);

    let undo = handle_key_event(KeyEvent::from(KeyCode::Char('u'))).unwrap();
    assert!(session.apply_action(undo));
}

#[test]
fn test_every_direction_has_a_key() {
    for dir in Direction::ALL {
        let hit = [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down]
            .into_iter()
            .any(|code| handle_key_event(KeyEvent::from(code)) == Some(GameAction::Swipe(dir)));
        assert!(hit, "{:?}", dir);
    }
}

#[test]
fn test_quit_is_not_an_action() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(should_quit(ctrl_c));
    assert_eq!(handle_key_event(ctrl_c), None);
    assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('q'))), None);
}
