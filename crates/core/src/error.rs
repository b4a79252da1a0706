//! Client error model.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Result type used across the client layers.
pub type ClientResult<T> = Result<T, ApiError>;

/// Error taxonomy shared with the remote API.
///
/// The wire form is the SCREAMING_SNAKE code string (`"AUTH_ERROR"`, ...).
/// Codes the backend sends that are not part of this list are kept verbatim
/// in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Bad credentials.
    Auth,
    /// No connectivity or timeout.
    Network,
    /// Form-level validation; never produced by the network layer.
    Validation,
    /// Expired or invalid token. Triggers forced logout.
    Authorization,
    /// Generic server-side failure.
    Server,
    /// Anything that could not be classified.
    Unknown,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Auth => "AUTH_ERROR",
            ErrorCode::Network => "NETWORK_ERROR",
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Authorization => "AUTHORIZATION_ERROR",
            ErrorCode::Server => "SERVER_ERROR",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
            ErrorCode::Other(code) => code,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "AUTH_ERROR" => ErrorCode::Auth,
            "NETWORK_ERROR" => ErrorCode::Network,
            "VALIDATION_ERROR" => ErrorCode::Validation,
            "AUTHORIZATION_ERROR" => ErrorCode::Authorization,
            "SERVER_ERROR" => ErrorCode::Server,
            "UNKNOWN_ERROR" => ErrorCode::Unknown,
            other => ErrorCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ErrorCode::from_code(&code))
    }
}

/// A classified failure with a human-readable message.
///
/// This is what views turn into notifications; the message is meant to be
/// shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Auth, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Authorization, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Server, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }

    /// True when the session must be torn down (expired/invalid credential).
    pub fn is_authorization(&self) -> bool {
        self.code == ErrorCode::Authorization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_variants() {
        assert_eq!(ErrorCode::from_code("AUTH_ERROR"), ErrorCode::Auth);
        assert_eq!(ErrorCode::from_code("NETWORK_ERROR"), ErrorCode::Network);
        assert_eq!(
            ErrorCode::from_code("AUTHORIZATION_ERROR"),
            ErrorCode::Authorization
        );
    }

    #[test]
    fn unknown_backend_codes_are_kept_verbatim() {
        let code = ErrorCode::from_code("DUPLICATE_EMAIL");
        assert_eq!(code, ErrorCode::Other("DUPLICATE_EMAIL".to_string()));
        assert_eq!(code.as_str(), "DUPLICATE_EMAIL");
    }

    #[test]
    fn api_error_deserializes_from_wire_shape() {
        let err: ApiError =
            serde_json::from_str(r#"{"code":"AUTH_ERROR","message":"bad credentials"}"#).unwrap();
        assert_eq!(err, ApiError::auth("bad credentials"));
        assert_eq!(err.to_string(), "AUTH_ERROR: bad credentials");
    }
}
