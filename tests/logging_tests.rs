//! Log subscriber setup; runs in its own process since the subscriber is global

use std::fs;

use tui_2048::init_logging;

#[test]
fn test_second_init_reports_error() {
    let path = std::env::temp_dir().join(format!("tui-2048-log-{}.log", std::process::id()));

    init_logging(&path).unwrap();
    tracing::info!(score = 4u64, "first line");
    assert!(path.exists());

    let err = init_logging(&path).unwrap_err();
    assert!(format!("{err:#}").contains("log subscriber"));

    let _ = fs::remove_file(&path);
}
