//! Preference Storage
//!
//! Key-value string stores and the adapter that keeps a `PreferenceRecord`
//! in one of them.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::preferences::PreferenceRecord;

/// Key holding the serialized preference record
pub const PREFERENCES_KEY: &str = "accessibilityPreferences";

/// Key set once the preferences dialog has been shown
pub const PREFERENCES_SEEN_KEY: &str = "accessibilityPreferencesSeen";

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store; contents are lost on drop
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.data.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store file, starting empty if it does not exist yet.
    ///
    /// A file that is not a JSON object of strings is treated as empty and
    /// will be overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable store file: {}", e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = data.len(), "opened store");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Write `data` to disk; the caller adopts it only on success
    fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        self.data = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.remove(key);
        self.persist(&next)?;
        self.data = next;
        Ok(())
    }
}

/// Loads and saves the preference record through a key-value store
#[derive(Debug)]
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self { Self { store } }

    pub fn inner(&self) -> &S { &self.store }
    pub fn into_inner(self) -> S { self.store }

    /// Saved record, or `None` when nothing usable is stored
    pub fn load(&self) -> Option<PreferenceRecord> {
        let raw = self.store.get(PREFERENCES_KEY)?;
        match PreferenceRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("discarding malformed preferences: {}", e);
                None
            }
        }
    }

    /// Overwrite the stored record
    pub fn save(&mut self, record: &PreferenceRecord) -> Result<(), StoreError> {
        let json = record.to_json()?;
        self.store.set(PREFERENCES_KEY, &json)?;
        tracing::info!(record = %json, "saved preferences");
        Ok(())
    }

    /// Forget the stored record
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(PREFERENCES_KEY)
    }

    /// Persist a dark mode choice. Only an existing record is rewritten;
    /// returns the updated record, if any.
    pub fn update_dark_mode(&mut self, dark: bool) -> Result<Option<PreferenceRecord>, StoreError> {
        let Some(record) = self.load() else {
            tracing::debug!("no saved preferences, dark mode choice not persisted");
            return Ok(None);
        };
        let record = record.with_dark_mode(dark);
        self.save(&record)?;
        Ok(Some(record))
    }

    /// True until the preferences dialog has been shown once
    pub fn is_first_visit(&self) -> bool {
        self.store.get(PREFERENCES_SEEN_KEY).is_none()
    }

    pub fn mark_seen(&mut self) -> Result<(), StoreError> {
        self.store.set(PREFERENCES_SEEN_KEY, "true")
    }
}

impl Default for PreferenceStore<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::TextSize;

    #[test]
    fn test_load_empty() {
        let prefs = PreferenceStore::default();
        assert!(prefs.load().is_none());
        assert!(prefs.is_first_visit());
    }

    #[test]
    fn test_save_load() {
        let mut prefs = PreferenceStore::default();
        let record = PreferenceRecord::new().with_text_size(TextSize::Percent180);
        prefs.save(&record).unwrap();
        assert_eq!(prefs.load(), Some(record));
    }

    #[test]
    fn test_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set(PREFERENCES_KEY, "{not json").unwrap();
        let prefs = PreferenceStore::new(store);
        assert!(prefs.load().is_none());
    }

    #[test]
    fn test_update_dark_mode_needs_record() {
        let mut prefs = PreferenceStore::default();
        assert_eq!(prefs.update_dark_mode(true).unwrap(), None);
        assert!(prefs.load().is_none());

        prefs.save(&PreferenceRecord::new()).unwrap();
        let updated = prefs.update_dark_mode(true).unwrap().unwrap();
        assert_eq!(updated.dark_mode, Some(true));
        assert_eq!(prefs.load().unwrap().dark_mode, Some(true));
    }

    #[test]
    fn test_seen_flag() {
        let mut prefs = PreferenceStore::default();
        prefs.mark_seen().unwrap();
        assert!(!prefs.is_first_visit());
        assert_eq!(prefs.inner().get(PREFERENCES_SEEN_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = std::env::temp_dir().join(format!("ally-store-blocked-{}", std::process::id()));
        let _ = fs::remove_file(&dir);
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("prefs.json");

        let mut store = FileStore::open(&path).unwrap();
        // A plain file where the parent directory should be
        fs::write(&dir, "blocker").unwrap();
        assert!(store.set(PREFERENCES_KEY, r#"{"textSize":120}"#).is_err());
        assert_eq!(store.get(PREFERENCES_KEY), None);

        fs::remove_file(&dir).unwrap();
        store.set(PREFERENCES_SEEN_KEY, "true").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(PREFERENCES_KEY), None);
        assert_eq!(reopened.get(PREFERENCES_SEEN_KEY).as_deref(), Some("true"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
