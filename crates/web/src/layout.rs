//! Shared layout around guarded views: sidebar and top bar.

use serde::Serialize;

use purplepaw_auth::{NavItem, Session, sidebar};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopBar {
    pub email: String,
    /// Primary role tag, as sent by the backend.
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub brand: &'static str,
    pub sidebar: Vec<NavItem>,
    pub top_bar: TopBar,
}

impl Layout {
    /// `None` without an identity; guarded views never render then.
    pub fn for_session(session: &Session, current_path: &str) -> Option<Self> {
        let identity = session.identity()?;
        Some(Self {
            brand: "PurplePaw",
            sidebar: sidebar(session, current_path),
            top_bar: TopBar {
                email: identity.email.clone(),
                role: identity.primary_role().map(|r| r.as_str().to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use purplepaw_auth::{Identity, MemoryStorage, Role, SessionStore, Token};

    use super::*;

    #[test]
    fn top_bar_shows_email_and_first_role() {
        let store = SessionStore::new(MemoryStorage::arc());
        store.initialize();
        assert!(Layout::for_session(&store.snapshot(), "/dashboard").is_none());

        store
            .login(
                Identity::new(1u64, "vet@purplepaw.test", vec![Role::VETERINARIAN, Role::CLIENT]),
                Token::new("t"),
            )
            .unwrap();
        let layout = Layout::for_session(&store.snapshot(), "/inventory").unwrap();

        assert_eq!(layout.top_bar.email, "vet@purplepaw.test");
        assert_eq!(layout.top_bar.role.as_deref(), Some("VETERINARIO"));
        assert!(layout.sidebar.iter().any(|i| i.path == "/inventory" && i.active));
    }
}
