//! API error types

use std::time::Duration;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, or the status reason when the body was empty.
        message: String,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to decode the API response.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Raw response body, if it was valid UTF-8.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new decode error with the raw response body.
    pub fn decode_with_body(message: impl Into<String>, body: &[u8]) -> Self {
        Self::Decode {
            message: message.into(),
            body: std::str::from_utf8(body).ok().map(str::to_string),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for failures that never reached a server response:
    /// connection problems and timeouts.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Transport(_) | Self::Timeout(_))
    }
}
