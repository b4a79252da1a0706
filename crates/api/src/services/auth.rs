use purplepaw_core::ClientResult;

use crate::ApiClient;
use crate::models::{AuthPayload, LoginRequest, RegisterRequest};

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Talks through a credential-exchange view of `client`: a rejected
    /// login never triggers the forced-logout hook.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: client.for_credentials(),
        }
    }

    /// Exchange credentials for a token and identity.
    ///
    /// Does not touch the session; the caller decides what to do with the
    /// payload.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthPayload> {
        let payload: AuthPayload = self.client.post("/auth/login", request).await?;
        tracing::info!(user_id = %payload.user.id, "login accepted");
        Ok(payload)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthPayload> {
        let payload: AuthPayload = self.client.post("/auth/register", request).await?;
        tracing::info!(user_id = %payload.user.id, "registration accepted");
        Ok(payload)
    }
}
