//! HTTP access to the clinic API.
//!
//! Cross-cutting request concerns live here and nowhere else: the base URL
//! and timeout, the bearer credential read from session storage on every
//! call, a per-request id header, envelope decoding, and forced logout on an
//! authorization rejection.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use purplepaw_auth::{SessionStorage, TOKEN_KEY};
use purplepaw_core::{ApiError, ClientResult};

use crate::envelope;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(25_000);
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Invoked when the API rejects the credential (HTTP 401).
pub trait UnauthorizedHook: Send + Sync {
    fn on_unauthorized(&self);
}

impl<F> UnauthorizedHook for F
where
    F: Fn() + Send + Sync,
{
    fn on_unauthorized(&self) {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHook>>,
    /// Login/register: a 401 is a credential rejection, never a forced logout.
    credential_exchange: bool,
}

/// Cheap to clone; every service API holds one.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("on_unauthorized", &self.inner.on_unauthorized.is_some())
            .field("credential_exchange", &self.inner.credential_exchange)
            .finish()
    }
}

impl ApiClient {
    pub fn new(options: ClientOptions, storage: Arc<dyn SessionStorage>) -> ClientResult<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(options.timeout);

        let http = builder
            .build()
            .map_err(|err| ApiError::unknown(format!("failed to build http client: {err}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: options.base_url.trim_end_matches('/').to_string(),
                storage,
                on_unauthorized: None,
                credential_exchange: false,
            }),
        })
    }

    /// Install the forced-logout hook. Must be called before the client is
    /// shared.
    pub fn with_unauthorized_hook(mut self, hook: Arc<dyn UnauthorizedHook>) -> Self {
        match Arc::get_mut(&mut self.inner) {
            Some(inner) => inner.on_unauthorized = Some(hook),
            None => {
                tracing::warn!("unauthorized hook installed on a shared client; cloning");
                self.inner = Arc::new(Inner {
                    http: self.inner.http.clone(),
                    base_url: self.inner.base_url.clone(),
                    storage: self.inner.storage.clone(),
                    on_unauthorized: Some(hook),
                    credential_exchange: self.inner.credential_exchange,
                });
            }
        }
        self
    }

    /// Same transport, no unauthorized hook, and 401 bodies decoded as
    /// credential rejections. Used for login and registration.
    pub fn for_credentials(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                storage: self.inner.storage.clone(),
                on_unauthorized: None,
                credential_exchange: true,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        let request = self.inner.http.get(self.url(path)).query(query);
        self.execute(Method::GET, path, request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.inner.http.post(self.url(path)).json(body);
        self.execute(Method::POST, path, request).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.inner.http.post(self.url(path));
        self.execute(Method::POST, path, request).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.inner.http.put(self.url(path)).json(body);
        self.execute(Method::PUT, path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.inner.http.delete(self.url(path));
        self.execute(Method::DELETE, path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let request_id = Uuid::now_v7();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.to_string());

        match self.inner.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => request = request.bearer_auth(token),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "could not read token; sending anonymously"),
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, path, %request_id, error = %err, "request failed");
            envelope::transport_error(&err)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| {
            tracing::warn!(%method, path, %request_id, status, error = %err, "reading body failed");
            envelope::transport_error(&err)
        })?;

        tracing::debug!(%method, path, %request_id, status, "api response");

        if self.inner.credential_exchange {
            let result = envelope::decode_credentials(status, &body);
            if let Err(err) = &result {
                tracing::debug!(%method, path, %request_id, status, code = %err.code, "credential exchange failed");
            }
            return result;
        }

        let result = envelope::decode(status, &body);
        if let Err(err) = &result {
            if status == 401 {
                tracing::info!(path, %request_id, "credential rejected; forcing logout");
                if let Some(hook) = &self.inner.on_unauthorized {
                    hook.on_unauthorized();
                }
            } else {
                tracing::debug!(%method, path, %request_id, code = %err.code, "api error");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use purplepaw_auth::MemoryStorage;

    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new(
            ClientOptions {
                base_url: "http://clinic.test/api/".to_string(),
                ..ClientOptions::default()
            },
            MemoryStorage::arc(),
        )
        .unwrap();
        assert_eq!(client.url("/users"), "http://clinic.test/api/users");
        assert_eq!(client.url("auth/login"), "http://clinic.test/api/auth/login");
    }

    #[test]
    fn credential_client_drops_the_unauthorized_hook() {
        let client = ApiClient::new(ClientOptions::default(), MemoryStorage::arc())
            .unwrap()
            .with_unauthorized_hook(Arc::new(|| {}));
        let auth = client.for_credentials();

        assert!(auth.inner.on_unauthorized.is_none());
        assert!(auth.inner.credential_exchange);
        assert!(client.inner.on_unauthorized.is_some());
        assert!(!client.inner.credential_exchange);
    }

    #[test]
    fn defaults_match_clinic_backend() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "http://localhost:8080/api");
        assert_eq!(options.timeout, Duration::from_secs(25));
    }
}
