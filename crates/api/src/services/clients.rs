use async_trait::async_trait;

use purplepaw_auth::Role;
use purplepaw_core::ClientResult;
use purplepaw_table::{PageRequest, PageResult};

use super::PageSource;
use crate::ApiClient;
use crate::models::UserRecord;

/// Filter key the client search box writes into the page request.
pub const SEARCH_KEY: &str = "nombre";

/// Shorter search terms are not sent.
pub const MIN_SEARCH_LEN: usize = 2;

/// Active users with the client role.
#[derive(Debug, Clone)]
pub struct ClientsApi {
    client: ApiClient,
}

impl ClientsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Query for a page of clients. A search term below [`MIN_SEARCH_LEN`]
    /// characters (after trimming) is dropped.
    pub fn query(request: &PageRequest) -> Vec<(String, String)> {
        let mut effective = request.clone();
        let term = effective
            .filters
            .remove(SEARCH_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| t.chars().count() >= MIN_SEARCH_LEN);
        if let Some(term) = term {
            effective.filters.insert(SEARCH_KEY.to_string(), term);
        }

        let mut query = effective.query_pairs();
        query.push(("role".to_string(), Role::CLIENT.as_str().to_string()));
        query.push(("isActive".to_string(), "true".to_string()));
        query
    }

    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<UserRecord>> {
        self.client.get("/users", &Self::query(request)).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for ClientsApi {
    type Row = UserRecord;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<UserRecord>> {
        self.list(request).await
    }
}

#[cfg(test)]
mod tests {
    use purplepaw_table::SortConfig;

    use super::*;

    fn value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn short_search_is_not_sent() {
        let mut request = PageRequest::new(10, SortConfig::ascending("nombre"));
        request.set_filter(SEARCH_KEY, " a ");
        let query = ClientsApi::query(&request);
        assert_eq!(value(&query, "filterBy"), None);
        assert_eq!(value(&query, "role"), Some("CLIENTE"));
        assert_eq!(value(&query, "isActive"), Some("true"));
    }

    #[test]
    fn search_is_trimmed_and_sent_as_name_filter() {
        let mut request = PageRequest::new(10, SortConfig::ascending("nombre"));
        request.set_filter(SEARCH_KEY, "  ana ");
        let query = ClientsApi::query(&request);
        assert_eq!(value(&query, "filterBy"), Some("nombre"));
        assert_eq!(value(&query, "filterValue"), Some("ana"));
    }
}
