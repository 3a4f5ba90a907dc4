//! JSON file backed store
//!
//! The whole map is rewritten on commit: serialized to `<path>.tmp`, then
//! renamed over `<path>`, so a crash leaves either the old or the new file.
//! A file that does not parse reads as empty; the next commit moves it to
//! `<path>.bad` and writes a fresh one.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreEdit, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: impl AsRef<OsStr>) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn bad_path(&self) -> PathBuf {
        self.sibling(".bad")
    }

    /// File contents, or None when there is no file yet
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Integer entries of a JSON object; None when the text is not one
    fn parse(&self, json: &str) -> Option<BTreeMap<String, i64>> {
        let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Ignoring unreadable score file {}: {err}", self.path.display());
                return None;
            }
        };
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            match value.as_i64() {
                Some(v) => {
                    entries.insert(key, v);
                }
                None => log::warn!("Skipping non-integer entry {key:?} in {}", self.path.display()),
            }
        }
        Some(entries)
    }

    /// Move an unreadable file aside so it is not lost by the next write
    fn set_aside(&self) {
        let bad = self.bad_path();
        match fs::rename(&self.path, &bad) {
            Ok(()) => log::warn!("Moved unreadable score file to {}", bad.display()),
            Err(err) => log::warn!("Could not move {} aside: {err}", self.path.display()),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn load_all(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        Ok(self
            .read()?
            .and_then(|json| self.parse(&json))
            .unwrap_or_default())
    }

    fn commit(&mut self, edit: &StoreEdit) -> Result<(), StoreError> {
        let mut entries = match self.read()? {
            Some(json) => self.parse(&json).unwrap_or_else(|| {
                self.set_aside();
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        edit.apply_to(&mut entries);
        let json = serde_json::to_string_pretty(&entries)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Committed {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{HighScores, RankOrder};

    fn temp_store(name: &str) -> JsonFileStore {
        let path = std::env::temp_dir().join(format!(
            "bounce_pong_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        JsonFileStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_commit_then_load() {
        let mut store = temp_store("commit");
        let mut edit = StoreEdit::new();
        edit.put("highscore1", 42).put("other", 3);
        store.commit(&edit).unwrap();

        let mut edit = StoreEdit::new();
        edit.remove("other");
        store.commit(&edit).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get("highscore1"), Some(&42));
        assert!(!store.tmp_path().exists());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_non_integer_values_are_skipped() {
        let store = temp_store("malformed");
        fs::write(
            store.path(),
            r#"{ "highscore1": 12, "highscore2": "fast", "highscore3": 1.5 }"#,
        )
        .unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get("highscore1"), Some(&12));
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let store = temp_store("corrupt_read");
        fs::write(store.path(), "not json").unwrap();
        assert!(store.load_all().unwrap().is_empty());

        fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.load_all().unwrap().is_empty());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_scores_recorded_over_corrupt_file() {
        let mut store = temp_store("corrupt_record");
        let _ = fs::remove_file(store.bad_path());
        fs::write(store.path(), "\"garbage\"").unwrap();

        let mut scores = HighScores::load(&store, RankOrder::LongestFirst);
        assert!(scores.is_empty());
        assert_eq!(scores.record(&mut store, 30).unwrap(), Some(1));
        assert_eq!(scores.record(&mut store, 45).unwrap(), Some(1));
        assert_eq!(scores.entries, vec![45, 30]);

        let all = store.load_all().unwrap();
        assert_eq!(all.get("highscore1"), Some(&45));
        assert_eq!(all.get("highscore2"), Some(&30));
        assert_eq!(fs::read_to_string(store.bad_path()).unwrap(), "\"garbage\"");

        let _ = fs::remove_file(store.path());
        let _ = fs::remove_file(store.bad_path());
    }
}
