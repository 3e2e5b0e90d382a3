//! Key-value adapter: JSON in, JSON out, never an error for the caller.

use super::backend::StorageBackend;
use super::StoreKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

pub struct JsonStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> JsonStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decoded value under `key`, or `default` when the key is missing, unreadable
    /// or holds data that does not decode.
    pub fn read<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        match self.backend.read(key.as_str()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%key, error = %e, "corrupt collection, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                error!(%key, error = %e, "read failed, using default");
                default
            }
        }
    }

    pub fn read_or_default<T: DeserializeOwned + Default>(&self, key: StoreKey) -> T {
        self.read(key, T::default())
    }

    /// True when `key` holds nothing or an empty list. Data that does not decode is
    /// not vacant, so nothing gets written over it.
    pub fn is_vacant(&self, key: StoreKey) -> bool {
        match self.backend.read(key.as_str()) {
            Ok(None) => true,
            Ok(Some(raw)) => matches!(
                serde_json::from_str::<Vec<serde_json::Value>>(&raw),
                Ok(items) if items.is_empty()
            ),
            Err(e) => {
                error!(%key, error = %e, "read failed, treating as occupied");
                false
            }
        }
    }

    /// Serializes and persists `value`. Returns `false` (and logs) on any failure.
    pub fn write<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                error!(%key, error = %e, "serialization failed");
                return false;
            }
        };
        match self.backend.write(key.as_str(), &raw) {
            Ok(()) => true,
            Err(e) => {
                error!(%key, error = %e, "write failed");
                false
            }
        }
    }

    /// Removes `key`. Removing a missing key succeeds.
    pub fn remove(&self, key: StoreKey) -> bool {
        match self.backend.remove(key.as_str()) {
            Ok(()) => true,
            Err(e) => {
                error!(%key, error = %e, "remove failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Settings;
    use crate::store::MemBackend;

    #[test]
    fn test_read_missing_returns_default() {
        let store = JsonStore::new(MemBackend::new());
        let posts: Vec<String> = store.read(StoreKey::Posts, vec!["x".to_string()]);
        assert_eq!(posts, vec!["x".to_string()]);
    }

    #[test]
    fn test_write_then_read() {
        let store = JsonStore::new(MemBackend::new());
        assert!(store.write(StoreKey::Posts, &vec![1, 2, 3]));
        let back: Vec<i32> = store.read_or_default(StoreKey::Posts);
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_corrupt_data_returns_default() {
        let backend = MemBackend::new();
        backend.insert_raw(StoreKey::Settings.as_str(), "{not json");
        let store = JsonStore::new(backend);
        let settings: Settings = store.read_or_default(StoreKey::Settings);
        assert_eq!(settings, Settings::default());
        assert!(store.backend().raw(StoreKey::Settings.as_str()).is_some());
    }

    #[test]
    fn test_write_failure_returns_false() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let store = JsonStore::new(backend);
        assert!(!store.write(StoreKey::Posts, &vec![1]));
        assert!(store.backend().raw(StoreKey::Posts.as_str()).is_none());
    }

    #[test]
    fn test_vacancy() {
        let backend = MemBackend::new();
        backend.insert_raw(StoreKey::Categories.as_str(), "[]");
        backend.insert_raw(StoreKey::Settings.as_str(), "[1,}");
        let store = JsonStore::new(backend);

        assert!(store.is_vacant(StoreKey::Posts));
        assert!(store.is_vacant(StoreKey::Categories));
        assert!(!store.is_vacant(StoreKey::Settings));

        assert!(store.write(StoreKey::Posts, &vec![1]));
        assert!(!store.is_vacant(StoreKey::Posts));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = JsonStore::new(MemBackend::new());
        assert!(store.write(StoreKey::Categories, &Vec::<i32>::new()));
        assert!(store.remove(StoreKey::Categories));
        assert!(store.remove(StoreKey::Categories));
        assert!(store.backend().raw(StoreKey::Categories.as_str()).is_none());
    }
}
