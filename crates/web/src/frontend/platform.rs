//! Browser implementations of the storage and timer seams.

use std::time::Duration;

use leptos::{TimeoutHandle, set_timeout_with_handle};
use purplepaw_auth::{SessionStorage, StorageError};
use purplepaw_table::debounce::Task;
use purplepaw_table::{Scheduler, TimerHandle};

/// `window.localStorage`. Looked up on every call; the handle is not `Send`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Io(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Io(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Io(format!("{err:?}")))
    }
}

/// `setTimeout`-backed scheduler for the search debouncer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeptosScheduler;

pub struct LeptosTimer(Option<TimeoutHandle>);

impl TimerHandle for LeptosTimer {
    fn cancel(self: Box<Self>) {
        if let Some(handle) = self.0 {
            handle.clear();
        }
    }
}

impl Scheduler for LeptosScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        match set_timeout_with_handle(task, delay) {
            Ok(handle) => Box::new(LeptosTimer(Some(handle))),
            Err(err) => {
                tracing::warn!(error = ?err, "setTimeout failed; search not scheduled");
                Box::new(LeptosTimer(None))
            }
        }
    }
}

/// Full page load, used by forced logout so every view starts over.
pub fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(path) {
            tracing::error!(error = ?err, path, "navigation failed");
        }
    }
}
