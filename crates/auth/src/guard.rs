//! Route guard: gate a view subtree by authentication and role.
//!
//! - No IO
//! - No panics
//! - Pure decision over a [`Session`] snapshot

use serde::Serialize;

use crate::{Role, Session};

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Default authenticated view; unauthorized roles land here, not on login.
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "to")]
pub enum GuardDecision {
    /// Session not initialized yet; render nothing.
    Pending,
    /// Render the guarded subtree.
    Render,
    /// Replace the current location. The attempted destination is not kept.
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Access {
    /// Login/register: only for anonymous users.
    GuestOnly,
    /// Any authenticated user when `roles` is empty, otherwise one of them.
    Authenticated { roles: Vec<Role> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    access: Access,
}

impl RouteGuard {
    /// Any authenticated role may pass.
    pub fn authenticated() -> Self {
        Self {
            access: Access::Authenticated { roles: Vec::new() },
        }
    }

    /// Only identities whose primary role is in `roles` may pass.
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            access: Access::Authenticated {
                roles: roles.into_iter().collect(),
            },
        }
    }

    /// Public entry views that bounce authenticated users to the dashboard.
    pub fn guest_only() -> Self {
        Self {
            access: Access::GuestOnly,
        }
    }

    pub fn allowed_roles(&self) -> &[Role] {
        match &self.access {
            Access::GuestOnly => &[],
            Access::Authenticated { roles } => roles,
        }
    }

    /// Decide what to do with a navigation.
    ///
    /// Only the identity's *first* role tag is checked. Identities with
    /// several tags are authorized by that one alone.
    pub fn evaluate(&self, session: &Session) -> GuardDecision {
        if session.is_loading() {
            return GuardDecision::Pending;
        }

        let decision = match (&self.access, session.identity()) {
            (Access::GuestOnly, None) => GuardDecision::Render,
            (Access::GuestOnly, Some(_)) => GuardDecision::Redirect(DASHBOARD_PATH),
            (Access::Authenticated { .. }, None) => GuardDecision::Redirect(LOGIN_PATH),
            (Access::Authenticated { roles }, Some(identity)) => {
                let permitted = roles.is_empty()
                    || identity
                        .primary_role()
                        .is_some_and(|primary| roles.contains(primary));
                if permitted {
                    GuardDecision::Render
                } else {
                    GuardDecision::Redirect(DASHBOARD_PATH)
                }
            }
        };

        tracing::debug!(?decision, allowed = ?self.allowed_roles(), "route guard evaluated");
        decision
    }
}
