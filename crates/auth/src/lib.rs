//! `purplepaw-auth`
//!
//! Session state and route gating.
//!
//! This crate is decoupled from HTTP and rendering: storage is a trait, the
//! guard is a pure decision over a session snapshot.

pub mod guard;
pub mod identity;
pub mod navigation;
pub mod roles;
pub mod session;
pub mod storage;

pub use guard::{DASHBOARD_PATH, GuardDecision, LOGIN_PATH, RouteGuard};
pub use identity::Identity;
pub use navigation::{NavEntry, NavItem, entries_for, sidebar};
pub use roles::Role;
pub use session::{Credentials, Session, SessionPhase, SessionStore, SubscriptionId, Token};
pub use storage::{MemoryStorage, SessionStorage, StorageError, TOKEN_KEY, USER_KEY};
