use std::sync::Arc;

use purplepaw_auth::{LOGIN_PATH, SessionStore};

use crate::client::UnauthorizedHook;

/// Where the app should go next. The browser replaces `location`; the
/// console front-end just records it.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Tears the session down through [`SessionStore::logout`] and sends the
/// user to the login view.
pub struct ForcedLogout {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ForcedLogout {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    pub fn arc(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Arc<Self> {
        Arc::new(Self::new(session, navigator))
    }
}

impl UnauthorizedHook for ForcedLogout {
    fn on_unauthorized(&self) {
        let was_authenticated = self.session.is_authenticated();
        self.session.logout();
        if was_authenticated {
            tracing::warn!("session rejected by the server; signed out");
        }
        self.navigator.navigate(LOGIN_PATH);
    }
}
