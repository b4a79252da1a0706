//! Sidebar entries per primary role.

use serde::Serialize;

use crate::{DASHBOARD_PATH, Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
}

const fn entry(path: &'static str, label: &'static str) -> NavEntry {
    NavEntry { path, label }
}

const VETERINARIAN_NAV: &[NavEntry] = &[
    entry(DASHBOARD_PATH, "Dashboard"),
    entry("/appointments", "Today's Appointments"),
    entry("/clients", "Clients"),
    entry("/pets", "Pets"),
    entry("/inventory", "Inventory"),
    entry("/user-management", "User Management"),
    entry("/profile", "My Profile"),
];

const RECEPTIONIST_NAV: &[NavEntry] = &[
    entry(DASHBOARD_PATH, "Dashboard"),
    entry("/appointments", "Today's Appointments"),
    entry("/clients", "Clients"),
    entry("/pets", "Pets"),
    entry("/inventory", "Inventory"),
    entry("/profile", "My Profile"),
];

const CLIENT_NAV: &[NavEntry] = &[
    entry(DASHBOARD_PATH, "Dashboard"),
    entry("/my-pets", "My Pets-Appointments"),
    entry("/profile", "My Profile"),
];

/// Entries for a role tag. Unknown tags get an empty sidebar.
pub fn entries_for(role: &Role) -> &'static [NavEntry] {
    match role.as_str() {
        "VETERINARIO" => VETERINARIAN_NAV,
        "RECEPCIONISTA" => RECEPTIONIST_NAV,
        "CLIENTE" => CLIENT_NAV,
        _ => &[],
    }
}

/// A sidebar row as displayed: the entry plus whether it is the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Sidebar for the session's primary role, with `current_path` marked active.
pub fn sidebar(session: &Session, current_path: &str) -> Vec<NavItem> {
    let Some(role) = session.primary_role() else {
        return Vec::new();
    };

    entries_for(role)
        .iter()
        .map(|e| NavItem {
            path: e.path,
            label: e.label,
            active: e.path == current_path,
        })
        .collect()
}
