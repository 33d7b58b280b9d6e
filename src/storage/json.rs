//! File-backed store: two small JSON documents in a data directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use super::{
    error::StorageError,
    store::{MAX_SCORES, ScoreEntry, ScoreStore, Settings, insert_ranked, qualifies},
};

const SCORES_FILE: &str = "high_scores.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) the data directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn scores_path(&self) -> PathBuf {
        self.dir.join(SCORES_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn load_scores(&self) -> Result<Vec<ScoreEntry>, StorageError> {
        let mut scores: Vec<ScoreEntry> = read_json(&self.scores_path())?.unwrap_or_default();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(MAX_SCORES);
        Ok(scores)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ScoreStore for JsonStore {
    fn scores(&self) -> Vec<ScoreEntry> {
        self.load_scores().unwrap_or_else(|e| {
            tracing::warn!("error loading scores, using an empty list: {e}");
            Vec::new()
        })
    }

    fn save_score(&mut self, score: u32, level: u32, food_eaten: u32) -> bool {
        let mut scores = self.scores();
        let is_high = qualifies(&scores, score);

        insert_ranked(
            &mut scores,
            ScoreEntry {
                score,
                level,
                food_eaten,
                date: Utc::now(),
            },
        );

        if let Err(e) = write_json(&self.scores_path(), &scores) {
            tracing::warn!("failed to save score {score}: {e}");
        }
        is_high
    }

    fn clear_scores(&mut self) {
        match fs::remove_file(self.scores_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("failed to clear scores: {e}"),
        }
    }

    fn settings(&self) -> Settings {
        match read_json(&self.settings_path()) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("error loading settings, using defaults: {e}");
                Settings::default()
            }
        }
    }

    fn save_settings(&mut self, settings: &Settings) {
        if let Err(e) = write_json(&self.settings_path(), settings) {
            tracing::warn!("failed to save settings: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Difficulty, Theme};
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_read_as_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        assert!(store.scores().is_empty());
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_eleven_saves_keep_top_ten() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::open(dir.path()).unwrap();

        for score in [30, 110, 50, 10, 90, 70, 20, 100, 40, 80, 60] {
            store.save_score(score, 1, 0);
        }

        // Fresh handle reads what is on disk
        let reopened = JsonStore::open(dir.path()).unwrap();
        let scores: Vec<u32> = reopened.scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_corrupt_scores_fall_back_to_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SCORES_FILE), "{ not json").unwrap();
        let mut store = JsonStore::open(dir.path()).unwrap();

        assert!(store.scores().is_empty());

        // Saving over corrupt data starts a fresh list
        assert!(store.save_score(40, 2, 4));
        assert_eq!(store.scores().len(), 1);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"difficulty":"insane","theme":"dark","soundEnabled":true}"#,
        )
        .unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_settings_persist() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::open(dir.path()).unwrap();
        let settings = Settings {
            difficulty: Difficulty::Easy,
            theme: Theme::Light,
            sound_enabled: false,
        };
        store.save_settings(&settings);

        let raw = fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        assert!(raw.contains("\"soundEnabled\": false"));
        assert_eq!(JsonStore::open(dir.path()).unwrap().settings(), settings);
    }

    #[test]
    fn test_clear_scores() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::open(dir.path()).unwrap();
        store.save_score(10, 1, 1);
        store.clear_scores();
        store.clear_scores();
        assert!(store.scores().is_empty());
    }
}
