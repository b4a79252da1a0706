//! Session store: the single source of truth for "who is logged in".
//!
//! Lifecycle: `Uninitialized → Loading → {Authenticated | Anonymous}`, then
//! back and forth between the last two through [`SessionStore::login`] and
//! [`SessionStore::logout`]. The store is created once at startup and passed
//! to every consumer explicitly (constructor injection, no globals).

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};
use crate::{Identity, Role};

/// Opaque bearer credential.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

/// Identity and token always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: Identity,
    pub token: Token,
}

/// Immutable snapshot of the session handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: SessionPhase,
    credentials: Option<Credentials>,
}

impl Session {
    fn uninitialized() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            credentials: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True until `initialize()` has completed. Views render nothing meanwhile.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Uninitialized | SessionPhase::Loading
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.credentials.as_ref().map(|c| &c.identity)
    }

    pub fn token(&self) -> Option<&Token> {
        self.credentials.as_ref().map(|c| &c.token)
    }

    pub fn primary_role(&self) -> Option<&Role> {
        self.identity().and_then(Identity::primary_role)
    }
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
    listeners: RwLock<Listeners>,
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(Session::uninitialized()),
            listeners: RwLock::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    pub fn arc(storage: Arc<dyn SessionStorage>) -> Arc<Self> {
        Arc::new(Self::new(storage))
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Rehydrate from durable storage.
    ///
    /// Runs once: later calls return the current phase without touching
    /// storage. Missing token or identity is the normal anonymous path, not an
    /// error. An undecodable identity is discarded along with the token.
    pub fn initialize(&self) -> SessionPhase {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.phase != SessionPhase::Uninitialized {
                return state.phase;
            }
            state.phase = SessionPhase::Loading;
        }

        let credentials = self.read_persisted();

        let session = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.phase = if credentials.is_some() {
                SessionPhase::Authenticated
            } else {
                SessionPhase::Anonymous
            };
            state.credentials = credentials;
            state.clone()
        };

        match session.identity() {
            Some(identity) => tracing::info!(
                user_id = %identity.id,
                role = ?identity.primary_role().map(Role::as_str),
                "session restored from storage"
            ),
            None => tracing::debug!("no persisted session; starting anonymous"),
        }

        self.notify(&session);
        session.phase
    }

    fn read_persisted(&self) -> Option<Credentials> {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("failed to read persisted token: {err}");
                return None;
            }
        };
        let user = match self.storage.get(USER_KEY) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("failed to read persisted user: {err}");
                return None;
            }
        };

        let (Some(token), Some(user)) = (token, user) else {
            return None;
        };

        match serde_json::from_str::<Identity>(&user) {
            Ok(identity) => Some(Credentials {
                identity,
                token: Token::new(token),
            }),
            Err(err) => {
                tracing::warn!("discarding corrupt persisted identity: {err}");
                self.clear_persisted();
                None
            }
        }
    }

    /// Record a successful authentication.
    ///
    /// The in-memory session is updated (and listeners notified) even when
    /// persisting fails; the error is returned so the caller can tell the user
    /// the session will not survive a reload.
    pub fn login(&self, identity: Identity, token: Token) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&identity).map_err(|e| StorageError::Corrupt {
            key: USER_KEY.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            user_id = %identity.id,
            role = ?identity.primary_role().map(Role::as_str),
            "user logged in"
        );

        let session = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.phase = SessionPhase::Authenticated;
            state.credentials = Some(Credentials {
                identity,
                token: token.clone(),
            });
            state.clone()
        };

        let persisted = self
            .storage
            .set(TOKEN_KEY, token.as_str())
            .and_then(|()| self.storage.set(USER_KEY, &user_json));

        self.notify(&session);

        if let Err(err) = &persisted {
            tracing::warn!("session not persisted: {err}");
        }
        persisted
    }

    /// Clear the session in memory and in storage.
    ///
    /// Idempotent. This is the single choke point for ending a session,
    /// including forced logout after the API rejects the credential.
    pub fn logout(&self) {
        let (was_authenticated, session) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let was = state.credentials.take().is_some();
            state.phase = SessionPhase::Anonymous;
            (was, state.clone())
        };

        self.clear_persisted();

        if was_authenticated {
            tracing::info!("user logged out");
            self.notify(&session);
        }
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(key, "failed to clear persisted session entry: {err}");
            }
        }
    }

    /// Register a listener invoked with every new session snapshot.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.entries.retain(|(entry, _)| *entry != id);
    }

    fn notify(&self, session: &Session) {
        // Clone out of the lock so listeners may subscribe/unsubscribe.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(session);
        }
    }
}
