//! Authentication error types

use std::time::Duration;

use super::ApiError;

/// Errors that can occur while logging in or out.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The server refused the username/password combination.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The login or logout endpoint answered with a non-success status.
    #[error("Authentication rejected with HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Network error during auth.
    #[error("Network error during auth: {0}")]
    Network(String),

    /// The auth request timed out.
    #[error("Auth request timed out after {0:?}")]
    Timeout(Duration),

    /// Failed to parse the authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status: 401 | 403, .. } => AuthError::InvalidCredentials,
            ApiError::Http { status, .. } => AuthError::Rejected { status },
            ApiError::Timeout(after) => AuthError::Timeout(after),
            ApiError::Decode { message, .. } => AuthError::Parse(message),
            ApiError::InvalidUrl(url) => AuthError::Parse(format!("invalid url {url}")),
            other => AuthError::Network(other.to_string()),
        }
    }
}
