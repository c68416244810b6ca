//! Key/value document storage.
//!
//! Each key holds one whole JSON document. Writes replace the document
//! wholesale; there is no merging, so two processes writing the same key
//! race and the last writer wins.

use super::files::{atomic_write, key_file, read_file};
use anyhow::Context;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failed for key `{key}`: {message}")]
    Backend { key: String, message: String },
    #[error("could not encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not decode value for key `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store chosen at runtime (file-backed or ephemeral)
pub type DynStore = Box<dyn KeyValueStore>;

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_file(key_file(&self.dir, key)).map_err(|err| StoreError::Backend {
            key: key.to_string(),
            message: format!("{:#}", err),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        atomic_write(key_file(&self.dir, key), value).map_err(|err| StoreError::Backend {
            key: key.to_string(),
            message: format!("{:#}", err),
        })
    }
}

/// In-process store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail, like a full or disabled storage area
    #[cfg(test)]
    pub fn rejecting_writes() -> Self {
        Self {
            entries: HashMap::new(),
            reject_writes: true,
        }
    }

    /// Put a raw document in place, bypassing serialization
    #[cfg(test)]
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Backend {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode `key`. `Ok(None)` when the key is absent.
pub fn try_load<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Read `key`, falling back to `default` when it is absent or unreadable.
/// Never fails; problems are logged.
pub fn load_or_default<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("event=store_load module=persistence status=absent key={}", key);
            default
        }
        Err(err) => {
            warn!(
                "event=store_load module=persistence status=fallback key={} error={}",
                key, err
            );
            default
        }
    }
}

/// Encode and write the whole value under `key`
pub fn try_save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Like [`try_save`] but failures are logged and dropped. Returns whether
/// the write landed.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match try_save(store, key, value) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                "event=store_save module=persistence status=dropped key={} error={}",
                key, err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskStatus};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> Vec<Task> {
        vec![
            Task::new("One".to_string(), TaskStatus::Backlog).with_tags(["a"]),
            Task::new("Two".to_string(), TaskStatus::Done).with_assignee("Ana"),
        ]
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        let tasks = sample();
        assert!(save(&mut store, "tasks", &tasks));

        let loaded: Vec<Task> = load_or_default(&store, "tasks", Vec::new());
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        let tasks = sample();
        assert!(save(&mut store, "tasks", &tasks));
        assert!(temp_dir.path().join("tasks.json").exists());

        let reopened = FileStore::open(temp_dir.path()).unwrap();
        let loaded: Vec<Task> = load_or_default(&reopened, "tasks", Vec::new());
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_absent_key_yields_default() {
        let store = MemoryStore::new();
        let loaded: Vec<Task> = load_or_default(&store, "tasks", sample());
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_corrupt_document_yields_default() {
        let mut store = MemoryStore::new();
        store.insert_raw("tasks", "{not json");
        let loaded: Vec<Task> = load_or_default(&store, "tasks", sample());
        assert_eq!(loaded.len(), 2);

        let err = try_load::<Vec<Task>, _>(&store, "tasks").unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn test_rejected_write_is_swallowed() {
        let mut store = MemoryStore::rejecting_writes();
        assert!(!save(&mut store, "tasks", &sample()));
        assert!(store.get("tasks").unwrap().is_none());

        let err = try_save(&mut store, "tasks", &sample()).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        assert!(save(&mut store, "k", &vec![1, 2, 3]));
        let loaded: Vec<i32> = load_or_default(&store, "k", Vec::new());
        assert_eq!(loaded, vec![1, 2, 3]);
    }
}
