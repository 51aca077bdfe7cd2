//! Save file persistence through the facade crate

use std::fs;
use std::path::PathBuf;

use tui_2048::core::{seeded_rng, GameSession, SessionTiming};
use tui_2048::storage;
use tui_2048::types::Direction;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tui-2048-it-{}-{}", std::process::id(), name))
}

#[test]
fn test_session_survives_save_and_load() {
    let path = temp_path("session.json");
    let mut session = GameSession::new(17).with_timing(SessionTiming::INSTANT);
    for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
        session.swipe(dir);
        session.finish_move();
    }

    storage::save(&path, &session.to_saved()).unwrap();
    let saved = storage::load(&path).unwrap().expect("save file present");
    let resumed = GameSession::resume(&saved, seeded_rng(0));

    assert!(resumed.board().same_layout(session.board()));
    assert_eq!(resumed.score(), session.score());
    let _ = fs::remove_file(&path);
}

#[test]
fn test_save_file_uses_camel_case_keys() {
    let path = temp_path("keys.json");
    let session = GameSession::new(3);
    storage::save(&path, &session.to_saved()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value.get("grid").is_some());
    assert!(value.get("highScore").is_some());
    assert!(value["grid"][0].get("isNew").is_some());
    let _ = fs::remove_file(&path);
}

#[test]
fn test_garbage_save_is_ignored() {
    let path = temp_path("garbage.json");
    fs::write(&path, b"\x00\x01 not a save").unwrap();
    assert!(storage::load(&path).unwrap().is_none());
    let _ = fs::remove_file(&path);
}
