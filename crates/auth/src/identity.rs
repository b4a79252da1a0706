use serde::{Deserialize, Serialize};

use purplepaw_core::UserId;

use crate::Role;

/// Profile of the authenticated user, as returned by the login endpoint.
///
/// The backend names some fields in Spanish (`uid`, `nombre`, `apellido`);
/// they are accepted as aliases and persisted under the camelCase names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(alias = "uid")]
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, alias = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Ordered role tags. Only the first one is ever consulted.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
            first_name: None,
            last_name: None,
            roles,
        }
    }

    /// The single role used for authorization and navigation.
    ///
    /// Identities carrying several tags are authorized by the first one only.
    pub fn primary_role(&self) -> Option<&Role> {
        self.roles.first()
    }

    /// Name to show in the layout: explicit display name, then first/last
    /// name, then the email.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            self.email.clone()
        } else {
            joined
        }
    }
}
