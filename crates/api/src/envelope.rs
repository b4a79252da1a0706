//! Response envelope decoding and error classification.
//!
//! Every endpoint answers `{success, data}` or
//! `{success: false, error: {code, message}}`. This module turns a status
//! code plus raw body into `ClientResult<T>` without touching the network,
//! so the mapping rules can be tested on their own.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use purplepaw_core::{ApiError, ClientResult, ErrorCode};

pub const SERVER_ERROR_MESSAGE: &str = "the server reported an error";
pub const NETWORK_ERROR_MESSAGE: &str = "could not reach the server, check your connection";
pub const SESSION_EXPIRED_MESSAGE: &str = "your session has expired, please sign in again";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "unexpected response from the server";
pub const CREDENTIALS_REJECTED_MESSAGE: &str = "incorrect email or password";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_error(self, default_code: ErrorCode, default_message: &str) -> ApiError {
        let code = self
            .code
            .filter(|c| !c.trim().is_empty())
            .map(|c| ErrorCode::from_code(&c))
            .unwrap_or(default_code);
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());
        ApiError::new(code, message)
    }
}

/// Classify a response.
///
/// - 401: `AUTHORIZATION_ERROR` (the caller forces a logout)
/// - other non-2xx: the body's `error.code`, falling back to `SERVER_ERROR`
/// - 2xx with `success: false`: the body's error as sent
/// - 2xx with `data`: decoded into `T`; a missing `data` decodes from `null`
/// - anything undecodable: `UNKNOWN_ERROR`
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    let envelope = serde_json::from_slice::<Envelope>(body);

    if status == 401 {
        let error = envelope.ok().and_then(|e| e.error).unwrap_or_default();
        return Err(ApiError::new(
            ErrorCode::Authorization,
            error
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
        ));
    }

    if !(200..300).contains(&status) {
        let error = envelope.ok().and_then(|e| e.error).unwrap_or_default();
        return Err(error.into_error(ErrorCode::Server, SERVER_ERROR_MESSAGE));
    }

    let envelope = envelope.map_err(|err| {
        tracing::debug!(status, error = %err, "response body is not an envelope");
        ApiError::unknown(UNEXPECTED_RESPONSE_MESSAGE)
    })?;

    if envelope.success == Some(false) {
        let error = envelope.error.unwrap_or_default();
        return Err(error.into_error(ErrorCode::Unknown, UNEXPECTED_RESPONSE_MESSAGE));
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(data).map_err(|err| {
        tracing::debug!(status, error = %err, "envelope data has an unexpected shape");
        ApiError::unknown(UNEXPECTED_RESPONSE_MESSAGE)
    })
}

/// Like [`decode`], for endpoints that exchange credentials for a token.
///
/// A 401 there rejects the submitted credentials, not a session: the body's
/// code is kept and defaults to `AUTH_ERROR`.
pub fn decode_credentials<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    if status == 401 {
        let error = serde_json::from_slice::<Envelope>(body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_default();
        return Err(error.into_error(ErrorCode::Auth, CREDENTIALS_REJECTED_MESSAGE));
    }
    decode(status, body)
}

/// The request never produced a response (connect failure, timeout, reset).
pub fn transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::unknown(err.to_string());
    }
    ApiError::network(NETWORK_ERROR_MESSAGE)
}
