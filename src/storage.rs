//! Save file persistence.
//!
//! A missing file means there is nothing to resume. A file that cannot be
//! parsed is reported and ignored, so a bad save never blocks starting a game.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::SavedGame;

/// Read a saved game. `Ok(None)` when there is no usable save.
pub fn load(path: &Path) -> Result<Option<SavedGame>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no save file");
            return Ok(None);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    match SavedGame::from_json(&text) {
        Ok(saved) => {
            debug!(path = %path.display(), tiles = saved.grid.len(), "loaded save");
            Ok(Some(saved))
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring corrupt save file");
            Ok(None)
        }
    }
}

/// Write a saved game through a temp file and rename.
pub fn save(path: &Path, saved: &SavedGame) -> Result<()> {
    let json = saved.to_json().context("encoding save")?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    debug!(path = %path.display(), score = saved.score, "saved game");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tui-2048-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = temp_path("missing.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load(&path).unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load(&path).unwrap(), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_replaces_without_leaving_temp() {
        let path = temp_path("replace.json");
        let first = SavedGame {
            score: 4,
            ..SavedGame::default()
        };
        let second = SavedGame {
            score: 8,
            high_score: 8,
            ..SavedGame::default()
        };

        save(&path, &first).unwrap();
        save(&path, &second).unwrap();
        assert_eq!(load(&path).unwrap(), Some(second));

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        assert!(!Path::new(&tmp).exists());
        let _ = fs::remove_file(&path);
    }
}
