//! Durable key-value storage for the session.
//!
//! The whole on-disk contract is two keys: [`TOKEN_KEY`] holds the opaque
//! credential, [`USER_KEY`] the serialized [`crate::Identity`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Key under which the bearer credential is persisted.
pub const TOKEN_KEY: &str = "token";

/// Key under which the serialized identity is persisted.
pub const USER_KEY: &str = "user";

/// Storage abstraction (browser local storage, a file, memory).
///
/// Several independent call sites read and write the same keys (the session
/// store and the API client). Writes only happen on login/logout, so the
/// discipline is last writer wins.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(String),
    #[error("corrupt storage entry '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get(TOKEN_KEY).unwrap().is_none());

        storage.set(TOKEN_KEY, "t-1").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t-1"));

        storage.remove(TOKEN_KEY).unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.is_empty());
    }
}
