//! File-backed session storage for the native front-end.
//!
//! All keys live in one JSON object at `{data_dir}/purplepaw/session.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use purplepaw_auth::{SessionStorage, StorageError};

pub const APP_DIR: &str = "purplepaw";
pub const SESSION_FILE: &str = "session.json";

/// `{base}/purplepaw/session.json`, where `base` is the override or the OS
/// data directory.
pub fn session_path(data_dir: Option<&Path>) -> Result<PathBuf, StorageError> {
    let base = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or_else(|| {
                StorageError::Unavailable("no data directory or home directory".to_string())
            })?,
    };

    let mut path = base;
    path.push(APP_DIR);
    path.push(SESSION_FILE);
    Ok(path)
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn open(data_dir: Option<&Path>) -> Result<Arc<Self>, StorageError> {
        let path = session_path(data_dir)?;
        tracing::debug!(path = %path.display(), "session storage");
        Ok(Arc::new(Self::new(path)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|err| StorageError::Corrupt {
            key: self.path.display().to_string(),
            reason: err.to_string(),
        })
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
        }
        let data = serde_json::to_vec_pretty(map).map_err(|err| StorageError::Io(err.to_string()))?;
        std::fs::write(&self.path, data).map_err(|err| StorageError::Io(err.to_string()))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt file is replaced rather than blocking every future login.
        let mut map = self.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable session file");
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = match self.load() {
            Ok(map) => map,
            Err(StorageError::Corrupt { .. }) => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        if map.remove(key).is_some() {
            return self.save(&map);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use purplepaw_auth::{Identity, Role, SessionPhase, SessionStore, TOKEN_KEY, Token};

    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("purplepaw_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn path_layout_under_override() {
        let dir = PathBuf::from("/srv/data");
        assert_eq!(
            session_path(Some(&dir)).unwrap(),
            PathBuf::from("/srv/data/purplepaw/session.json")
        );
    }

    #[test]
    fn session_survives_restart() {
        let dir = temp_dir();
        let storage = FileStorage::open(Some(&dir)).unwrap();
        let store = SessionStore::new(storage.clone());
        store.initialize();
        store
            .login(Identity::new(4u64, "rec@purplepaw.test", vec![Role::RECEPTIONIST]), Token::new("tok"))
            .unwrap();

        let reopened = SessionStore::new(FileStorage::open(Some(&dir)).unwrap());
        assert_eq!(reopened.initialize(), SessionPhase::Authenticated);
        assert_eq!(reopened.snapshot().primary_role(), Some(&Role::RECEPTIONIST));

        reopened.logout();
        let after = FileStorage::open(Some(&dir)).unwrap();
        assert_eq!(after.get(TOKEN_KEY).unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reads_as_empty_and_remove_is_ok() {
        let storage = Arc::new(FileStorage::new(temp_dir().join("session.json")));
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        storage.remove(TOKEN_KEY).unwrap();
        if let Some(parent) = storage.path().parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn corrupt_file_is_reported_then_replaced() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get(TOKEN_KEY), Err(StorageError::Corrupt { .. })));

        storage.set(TOKEN_KEY, "fresh").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
