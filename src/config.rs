//! Runtime configuration from environment variables.

use std::path::PathBuf;

use crate::core::SessionTiming;
use crate::types::{SLIDE_MS, SPAWN_DELAY_MS};

pub const DEFAULT_SAVE_PATH: &str = "2048-save.json";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// RNG seed; `None` draws one from entropy at startup
    pub seed: Option<u64>,
    /// Save file; `None` disables persistence
    pub save_path: Option<PathBuf>,
    /// Log file; `None` installs no subscriber
    pub log_path: Option<PathBuf>,
    pub timing: SessionTiming,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: Some(PathBuf::from(DEFAULT_SAVE_PATH)),
            log_path: None,
            timing: SessionTiming::default(),
        }
    }
}

impl Config {
    /// Create from `TUI_2048_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TUI_2048_SEED").and_then(|s| s.trim().parse().ok());

        let no_save = lookup("TUI_2048_NO_SAVE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let save_path = match lookup("TUI_2048_SAVE_PATH") {
            _ if no_save => None,
            Some(s) => non_empty_path(s),
            None => Some(PathBuf::from(DEFAULT_SAVE_PATH)),
        };

        let log_path = lookup("TUI_2048_LOG_PATH").and_then(non_empty_path);

        let slide_ms = lookup("TUI_2048_SLIDE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(SLIDE_MS);
        let spawn_delay_ms = lookup("TUI_2048_SPAWN_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(SPAWN_DELAY_MS);

        Self {
            seed,
            save_path,
            log_path,
            timing: SessionTiming {
                slide_ms,
                spawn_delay_ms,
            },
        }
    }
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}
