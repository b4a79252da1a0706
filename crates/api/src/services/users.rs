use async_trait::async_trait;

use purplepaw_auth::Role;
use purplepaw_core::{ClientResult, UserId};
use purplepaw_table::{PageRequest, PageResult};

use super::PageSource;
use crate::ApiClient;
use crate::models::{ToggleStatus, UserInput, UserRecord};

/// Dropdown filters of the user administration view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = &self.role {
            pairs.push(("role".to_string(), role.as_str().to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("isActive".to_string(), active.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
    filter: UserFilter,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            filter: UserFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: UserFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<UserRecord>> {
        let mut query = request.query_pairs();
        query.extend(self.filter.query_pairs());
        self.client.get("/users", &query).await
    }

    pub async fn create(&self, input: &UserInput) -> ClientResult<UserRecord> {
        self.client.post("/users", input).await
    }

    pub async fn update(&self, id: &UserId, input: &UserInput) -> ClientResult<UserRecord> {
        self.client.put(&format!("/users/{id}"), input).await
    }

    pub async fn delete(&self, id: &UserId) -> ClientResult<()> {
        let _: serde_json::Value = self.client.delete(&format!("/users/{id}")).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn toggle_status(&self, id: &UserId, is_active: bool) -> ClientResult<()> {
        let _: serde_json::Value = self
            .client
            .post(&format!("/users/{id}/toggle-status"), &ToggleStatus { is_active })
            .await?;
        tracing::info!(user_id = %id, is_active, "user status changed");
        Ok(())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for UsersApi {
    type Row = UserRecord;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<UserRecord>> {
        self.list(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_encodes_role_and_status() {
        let filter = UserFilter {
            role: Some(Role::VETERINARIAN),
            is_active: Some(false),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("role".to_string(), "VETERINARIO".to_string()),
                ("isActive".to_string(), "false".to_string()),
            ]
        );
        assert!(UserFilter::default().query_pairs().is_empty());
    }
}
