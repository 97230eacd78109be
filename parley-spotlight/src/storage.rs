//! Synchronous key-value storage
//!
//! Dialog state is kept in a tiny string-to-string store. Reads never fail:
//! an unreadable backend reads as empty. Writes are last-writer-wins.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::error::StorageError;

/// Directory name under the platform data dir
const DATA_DIRECTORY_NAME: &str = "parley";

/// File name of the default storage file
const STORAGE_FILE_NAME: &str = "storage.json";

/// String key-value storage
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, if any
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().remove(key);
        Ok(())
    }
}

/// Storage backed by one JSON object file
///
/// The whole file is rewritten on every write, through a temporary file
/// that is renamed into place.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Storage file under the platform data directory
    ///
    /// `~/.local/share/parley/storage.json` on Linux.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIRECTORY_NAME).join(STORAGE_FILE_NAME))
            .ok_or(StorageError::NoDataDir)
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read storage file {:?}: {}", self.path, e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Ignoring unreadable storage file {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(items)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Saved storage file {:?}", self.path);
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all();
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all();
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("v2"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k"), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        JsonFileStorage::new(&path).set_item("k", "[\"!a:x\"]").unwrap();
        let reopened = JsonFileStorage::new(&path);

        assert_eq!(reopened.get_item("k").as_deref(), Some("[\"!a:x\"]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("storage.json"));

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.remove_item("a").unwrap();

        assert_eq!(storage.get_item("a"), None);
        assert_eq!(storage.get_item("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not-json").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert_eq!(storage.get_item("k"), None);

        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
    }
}
