use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag attached to an identity.
///
/// Role tags are the backend's strings. The three the clinic knows about are
/// exposed as constants; anything else is carried through opaquely so an
/// unexpected tag never fails deserialization (it simply grants nothing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const VETERINARIAN: Role = Role(Cow::Borrowed("VETERINARIO"));
    pub const RECEPTIONIST: Role = Role(Cow::Borrowed("RECEPCIONISTA"));
    pub const CLIENT: Role = Role(Cow::Borrowed("CLIENTE"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human label for display in the top bar and user lists.
    pub fn label(&self) -> &str {
        match self.as_str() {
            "VETERINARIO" => "Veterinarian",
            "RECEPCIONISTA" => "Receptionist",
            "CLIENTE" => "Client",
            other => other,
        }
    }

    /// Staff roles may access the clinic back-office views.
    pub fn is_staff(&self) -> bool {
        *self == Role::VETERINARIAN || *self == Role::RECEPTIONIST
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_owned_tags() {
        let owned: Role = serde_json::from_str("\"VETERINARIO\"").unwrap();
        assert_eq!(owned, Role::VETERINARIAN);
        assert!(owned.is_staff());
        assert!(!Role::CLIENT.is_staff());
    }

    #[test]
    fn unknown_tags_survive_round_trip() {
        let role: Role = serde_json::from_str("\"AUDITOR\"").unwrap();
        assert_eq!(role.as_str(), "AUDITOR");
        assert_eq!(role.label(), "AUDITOR");
    }
}
