use std::fmt;

use thiserror::Error;

/// Message used when a failed response carries no readable error of its own.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Why a call was refused for lack of a valid credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No session token was available, so nothing was sent.
    MissingCredential,
    /// The server answered 401.
    Rejected,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingCredential => write!(f, "not logged in"),
            AuthFailure::Rejected => write!(f, "session expired or invalid"),
        }
    }
}

/// Normalized failure of any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status other than 401.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Http { status: u16, message: Option<String> },

    #[error("Authentication required: {}", auth_message(.failure, .message))]
    AuthRequired { failure: AuthFailure, message: Option<String> },

    /// 2xx response whose body is not the expected JSON.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn auth_message(failure: &AuthFailure, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => failure.to_string(),
    }
}

impl ApiError {
    pub fn missing_credential() -> Self {
        Self::AuthRequired { failure: AuthFailure::MissingCredential, message: None }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::AuthRequired { failure: AuthFailure::Rejected, .. } => Some(401),
            _ => None,
        }
    }

    /// Fill in an endpoint-specific message for HTTP failures whose body had none.
    pub fn with_fallback(self, fallback: &str) -> Self {
        match self {
            ApiError::Http { status, message: None } => {
                ApiError::Http { status, message: Some(fallback.to_string()) }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_uses_server_message() {
        let err = ApiError::Http { status: 500, message: Some("Database down".to_string()) };
        assert_eq!(err.to_string(), "Database down");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_http_error_display_falls_back_to_generic() {
        let err = ApiError::Http { status: 502, message: None };
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_with_fallback_only_fills_missing_message() {
        let err = ApiError::Http { status: 500, message: None }.with_fallback("Failed to fetch profile");
        assert_eq!(err.to_string(), "Failed to fetch profile");

        let err = ApiError::Http { status: 500, message: Some("boom".to_string()) }
            .with_fallback("Failed to fetch profile");
        assert_eq!(err.to_string(), "boom");

        let err = ApiError::Network("refused".to_string()).with_fallback("ignored");
        assert_eq!(err, ApiError::Network("refused".to_string()));
    }

    #[test]
    fn test_auth_required_display() {
        assert_eq!(
            ApiError::missing_credential().to_string(),
            "Authentication required: not logged in"
        );

        let err = ApiError::AuthRequired {
            failure: AuthFailure::Rejected,
            message: Some("Invalid token".to_string()),
        };
        assert_eq!(err.to_string(), "Authentication required: Invalid token");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_missing_credential_has_no_status() {
        assert_eq!(ApiError::missing_credential().status(), None);
        assert_eq!(ApiError::MalformedResponse("eof".to_string()).status(), None);
    }
}
