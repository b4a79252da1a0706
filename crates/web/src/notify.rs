//! User-visible notifications (toasts).

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

use purplepaw_core::{ApiError, ErrorCode};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(4000);

pub const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";
pub const OFFLINE_MESSAGE: &str = "Could not connect to the server. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification {
            level: Level::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            level: Level::Error,
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Notification {
            level: Level::Info,
            message: message.to_string(),
        });
    }
}

/// Human-readable text for a failure.
pub fn describe(err: &ApiError) -> String {
    match err.code {
        ErrorCode::Auth => BAD_CREDENTIALS_MESSAGE.to_string(),
        ErrorCode::Network => OFFLINE_MESSAGE.to_string(),
        _ => err.message.clone(),
    }
}

/// Records notifications in order. Used by the console front-end and tests.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!(message = %notification.message, "notify"),
            _ => tracing::debug!(message = %notification.message, "notify"),
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_replaces_auth_and_network_messages() {
        assert_eq!(describe(&ApiError::auth("Invalid credentials")), BAD_CREDENTIALS_MESSAGE);
        assert_eq!(describe(&ApiError::network("timeout")), OFFLINE_MESSAGE);
        assert_eq!(describe(&ApiError::server("Email taken")), "Email taken");
    }

    #[test]
    fn log_keeps_order_and_drains() {
        let log = NotificationLog::new();
        log.success("saved");
        log.error("failed");
        assert_eq!(
            log.drain().iter().map(|n| n.level).collect::<Vec<_>>(),
            vec![Level::Success, Level::Error]
        );
        assert!(log.entries().is_empty());
    }
}
