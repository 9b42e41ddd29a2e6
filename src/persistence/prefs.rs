//! Durable UI preferences: a flat string map in a YAML file.
//!
//! Loaded once at startup, written through synchronously on every set.
//! There is one writer (the UI thread), so last-writer-wins needs no
//! locking. I/O failures are logged and swallowed: losing a preference
//! write is not worth interrupting the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use cv_base::config::{PREFS_FILE, STORE_DIR};
use cv_mod_tabs::PreferenceStore;

pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// The store under `./.caseview/ui.yaml`.
    pub fn open_default() -> Self {
        Self::open(PathBuf::from(STORE_DIR).join(PREFS_FILE))
    }

    pub fn open(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|yaml| serde_yaml::from_str(&yaml).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).ok();
        }
        match serde_yaml::to_string(&self.values) {
            Ok(yaml) => {
                if let Err(err) = fs::write(&self.path, yaml) {
                    log::warn!("preference write to {:?} failed: {err}", self.path);
                }
            }
            Err(err) => log::warn!("preference serialization failed: {err}"),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_mod_tabs::ACTIVE_TAB_KEY;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::open(dir.path().join("ui.yaml"));
        assert!(store.get(ACTIVE_TAB_KEY).is_none());
    }

    #[test]
    fn set_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.yaml");

        let mut store = FilePreferenceStore::open(path.clone());
        store.set(ACTIVE_TAB_KEY, "raw-data");
        drop(store);

        let reopened = FilePreferenceStore::open(path);
        assert_eq!(reopened.get(ACTIVE_TAB_KEY).as_deref(), Some("raw-data"));
    }

    #[test]
    fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.yaml");
        let mut store = FilePreferenceStore::open(path.clone());
        store.set(ACTIVE_TAB_KEY, "configuration");
        store.set(ACTIVE_TAB_KEY, "token-status");
        let reopened = FilePreferenceStore::open(path);
        assert_eq!(reopened.get(ACTIVE_TAB_KEY).as_deref(), Some("token-status"));
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.yaml");
        fs::write(&path, ": not [ yaml {").unwrap();
        let store = FilePreferenceStore::open(path);
        assert!(store.get(ACTIVE_TAB_KEY).is_none());
    }

    #[test]
    fn creates_parent_directories_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ui.yaml");
        let mut store = FilePreferenceStore::open(path.clone());
        store.set(ACTIVE_TAB_KEY, "configuration");
        assert!(path.exists());
    }
}
