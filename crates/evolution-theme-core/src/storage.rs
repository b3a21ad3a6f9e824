//! Key/value persistence backends for the active theme.
//!
//! The store only needs two synchronous operations from its backend, a read
//! and a write of a single string under a namespacing key. [`Persistence`]
//! captures exactly that, and three implementations are provided:
//!
//! | Backend | Behavior |
//! |---------|----------|
//! | [`MemoryStorage`] | In-process map; clones share the same entries |
//! | [`JsonFileStorage`] | A JSON object on disk, rewritten on every `set` |
//! | [`DisabledStorage`] | Always unavailable, like a blocked browser storage |
//!
//! Stores sharing one backend and one storage key observe each other's
//! writes with last-write-wins semantics; there is no cross-store locking.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::PersistenceError;

/// A synchronous string key/value store.
pub trait Persistence {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<P: Persistence + ?Sized> Persistence for Rc<P> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// In-memory persistence.
///
/// Cloning yields another handle to the same entries, which is how two
/// stores in one process share "local storage".
///
/// # Example
///
/// ```rust
/// use evolution_theme_core::{MemoryStorage, Persistence};
///
/// let storage = MemoryStorage::new();
/// let shared = storage.clone();
/// storage.set("etn-theme", "dark").unwrap();
/// assert_eq!(shared.get("etn-theme").unwrap().as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        storage
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Persistence for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistence backed by a JSON object file.
///
/// The file holds a `{"key": "value"}` object, possibly shared with other
/// settings of the host application. A missing file reads as empty; every `set` rewrites the whole document so the file and memory
/// converge before the call returns.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage bound to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Persistence for JsonFileStorage {
    /// Entries that are not strings read as absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Other entries in the document are written back unchanged.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let document = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, document)?;
        Ok(())
    }
}

/// A backend that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl Persistence for DisabledStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Unavailable("storage is disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("storage is disabled".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("etn-theme").unwrap(), None);

        storage.set("etn-theme", "forest").unwrap();
        assert_eq!(storage.get("etn-theme").unwrap().as_deref(), Some("forest"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::with_entries([("a", "1")]);
        let other = storage.clone();
        other.set("a", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_json_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("prefs.json"));
        assert_eq!(storage.get("etn-theme").unwrap(), None);
    }

    #[test]
    fn test_json_file_storage_persists_across_handles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        JsonFileStorage::new(&path).set("etn-theme", "tron").unwrap();
        JsonFileStorage::new(&path).set("other", "x").unwrap();

        let reopened = JsonFileStorage::new(&path);
        assert_eq!(reopened.get("etn-theme").unwrap().as_deref(), Some("tron"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_json_file_storage_malformed_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.get("etn-theme"),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_json_file_storage_keeps_foreign_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"etn-theme": "dark", "volume": 7, "muted": false}"#).unwrap();

        let storage = JsonFileStorage::new(&path);
        assert_eq!(storage.get("etn-theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.get("volume").unwrap(), None);

        storage.set("etn-theme", "forest").unwrap();
        assert_eq!(storage.get("etn-theme").unwrap().as_deref(), Some("forest"));

        let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["volume"], 7);
        assert_eq!(document["muted"], false);
    }

    #[test]
    fn test_disabled_storage_always_fails() {
        let storage = DisabledStorage;
        assert!(matches!(
            storage.get("k"),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(storage.set("k", "v").is_err());
    }
}
