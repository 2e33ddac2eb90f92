//! Configuration error types

/// Errors raised while building a client.
///
/// No partially configured client is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base address is not a valid absolute URL.
    #[error("Invalid base URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The base address uses a scheme other than http or https.
    #[error("Unsupported scheme '{scheme}' in base URL, expected http or https")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// The base address points below the site root.
    #[error("Base URL must point at the site root, found path '{path}' (do not include the API path)")]
    BasePath {
        /// The rejected path.
        path: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
