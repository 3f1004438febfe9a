//! Durable local key/value storage.
//!
//! The client persists two values across runs: the authenticated session under
//! [`AUTH_STORAGE_KEY`] and the public widget's session id under
//! [`CUSTOMER_SESSION_KEY`].  Values are JSON documents.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Key holding `{user, isAuthenticated, token}`.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Key holding the public widget's session id.
pub const CUSTOMER_SESSION_KEY: &str = "customer-chat-sessionid";

/// A synchronous string key/value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`.  Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and deserializes the JSON value stored under `key`.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).map_err(|err| {
                Error::storage(
                    format!("stored value is not valid JSON: {err}"),
                    Some(key.to_string()),
                )
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn set_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

////////////////////////////////////////////// FileStore //////////////////////////////////////////

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.  The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::storage("invalid storage key", Some(key.to_string())));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io(format!("failed to read {}", path.display()), err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|err| Error::io(format!("failed to create {}", self.dir.display()), err))?;
        // Write then rename; readers never see a partial value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|err| Error::io(format!("failed to write {}", tmp.display()), err))?;
        fs::rename(&tmp, &path)
            .map_err(|err| Error::io(format!("failed to replace {}", path.display()), err))?;
        tracing::debug!(key, "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key, "removed value");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::io(format!("failed to remove {}", path.display()), err)),
        }
    }
}

///////////////////////////////////////////// MemoryStore /////////////////////////////////////////

/// A process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned", None))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minca-storage-{name}-{}", std::process::id()))
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(CUSTOMER_SESSION_KEY).unwrap(), None);
        store.set(CUSTOMER_SESSION_KEY, "\"abc\"").unwrap();
        assert_eq!(
            store.get(CUSTOMER_SESSION_KEY).unwrap().as_deref(),
            Some("\"abc\"")
        );
        store.remove(CUSTOMER_SESSION_KEY).unwrap();
        store.remove(CUSTOMER_SESSION_KEY).unwrap();
        assert_eq!(store.get(CUSTOMER_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = scratch_dir("persist");
        let store = FileStore::new(&dir);
        set_json(&store, AUTH_STORAGE_KEY, &serde_json::json!({"token": "t"})).unwrap();

        let reopened = FileStore::new(&dir);
        let value: serde_json::Value = get_json(&reopened, AUTH_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(value["token"], "t");

        reopened.remove(AUTH_STORAGE_KEY).unwrap();
        assert_eq!(reopened.get(AUTH_STORAGE_KEY).unwrap(), None);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new(scratch_dir("keys"));
        assert!(store.get("../etc/passwd").unwrap_err().is_storage());
        assert!(store.set("", "x").unwrap_err().is_storage());
    }

    #[test]
    fn corrupt_value_is_storage_error() {
        let store = MemoryStore::new();
        store.set(AUTH_STORAGE_KEY, "{not json").unwrap();
        let err = get_json::<serde_json::Value>(&store, AUTH_STORAGE_KEY).unwrap_err();
        assert!(err.is_storage());
    }
}
