//! Error types

mod api;
mod auth;
mod config;

pub use api::*;
pub use auth::*;
pub use config::*;

/// Top-level error returned by every fallible client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client could not be constructed from the given settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request failed on the wire or its response could not be decoded.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login or logout failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The entity name or id cannot be turned into a request URL.
    #[error("Invalid resource '{entity}': {reason}")]
    InvalidResource {
        /// The offending entity name.
        entity: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl Error {
    /// Creates an invalid resource error.
    pub fn invalid_resource(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResource {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a response decode failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Api(ApiError::Decode { .. }))
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Api(ApiError::Timeout(_)))
    }

    /// Returns the HTTP status code if the server answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            Self::Auth(AuthError::Rejected { status }) => Some(*status),
            _ => None,
        }
    }
}
