//! Login and registration: validate, call the API, update the session,
//! notify, and tell the caller where to go.

use std::sync::Arc;

use purplepaw_api::AuthApi;
use purplepaw_api::models::AuthPayload;
use purplepaw_auth::{DASHBOARD_PATH, LOGIN_PATH, SessionStore, Token};
use purplepaw_core::ApiError;

use crate::forms::{LoginForm, RegisterForm, ValidationErrors};
use crate::notify::{Notifier, describe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Per-field errors; nothing was sent.
    Invalid(ValidationErrors),
    /// The session is unchanged and the user stays on the form.
    Failed(ApiError),
    SignedIn { redirect: &'static str },
}

pub struct AuthFlow {
    api: AuthApi,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl AuthFlow {
    pub fn new(api: AuthApi, session: Arc<SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub async fn login(&self, form: &LoginForm) -> SubmitOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.api.login(&request).await {
            Ok(payload) => self.sign_in(payload, "Signed in successfully"),
            Err(err) => self.fail("login", err),
        }
    }

    pub async fn register(&self, form: &RegisterForm) -> SubmitOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.api.register(&request).await {
            Ok(payload) => self.sign_in(payload, "Registration successful"),
            Err(err) => self.fail("register", err),
        }
    }

    /// Sign out from the sidebar. Returns where to go.
    pub fn logout(&self) -> &'static str {
        self.session.logout();
        LOGIN_PATH
    }

    fn sign_in(&self, payload: AuthPayload, message: &str) -> SubmitOutcome {
        let user_id = payload.user.id.clone();
        if let Err(err) = self.session.login(payload.user, Token::new(payload.token)) {
            tracing::warn!(%user_id, error = %err, "signed in but the session was not persisted");
            self.notifier
                .info("You are signed in, but the session will not be remembered");
        }
        self.notifier.success(message);
        SubmitOutcome::SignedIn {
            redirect: DASHBOARD_PATH,
        }
    }

    fn fail(&self, action: &str, err: ApiError) -> SubmitOutcome {
        tracing::info!(action, code = %err.code, "authentication rejected");
        self.notifier.error(&describe(&err));
        SubmitOutcome::Failed(err)
    }
}
