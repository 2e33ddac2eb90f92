//! Main MolgenisClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::auth::Session;
use crate::auth::UserInfo;
use crate::error::ConfigError;
use crate::error::Error;
use crate::transport::ReqwestTransport;
use crate::transport::Transport;

/// The main client for interacting with a MOLGENIS server.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Clones share one session: logging in through any
/// clone authenticates all of them.
///
/// # Example
///
/// ```ignore
/// use molgenis_lib::MolgenisClient;
///
/// let client = MolgenisClient::builder()
///     .url("https://directory.bbmri-eric.eu")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// if client.authenticate("admin", "secret").await {
///     let types = client.query::<EntityType>().collect_all().await?;
/// }
/// ```
#[derive(Clone)]
pub struct MolgenisClient {
    inner: Arc<MolgenisClientInner>,
}

struct MolgenisClientInner {
    base_url: Url,
    transport: Arc<dyn Transport>,
    session: Session,
    timeout: Option<Duration>,
}

impl MolgenisClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> MolgenisClientBuilder<Missing> {
        MolgenisClientBuilder::new()
    }

    /// Creates a client with default settings for the given site root.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        Self::builder().url(url).build()
    }

    /// Returns the site root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the per-request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Returns `true` while a session token is installed.
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated()
    }

    /// Returns the logged-in user, if any.
    pub fn current_user(&self) -> Option<UserInfo> {
        self.inner.session.user()
    }

    pub(crate) fn session(&self) -> &Session {
        &self.inner.session
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }
}

impl std::fmt::Debug for MolgenisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MolgenisClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Checks that `url` is an http(s) site root.
///
/// The API paths are appended by the client, so a base address that already
/// carries a path would produce broken URLs.
pub(crate) fn parse_base_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: parsed.scheme().to_string(),
        });
    }

    if !matches!(parsed.path(), "" | "/") {
        return Err(ConfigError::BasePath {
            path: parsed.path().to_string(),
        });
    }

    Ok(parsed)
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`MolgenisClient`].
///
/// Uses the typestate pattern to ensure the URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = MolgenisClient::builder()
///     .url("https://molgenis.example.org/")
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct MolgenisClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl MolgenisClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            transport: None,
        }
    }

    /// Sets the site root of the MOLGENIS server.
    ///
    /// The path must be empty or `/`; `build` rejects anything else.
    pub fn url(self, url: impl Into<String>) -> MolgenisClientBuilder<Set<String>> {
        MolgenisClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            transport: self.transport,
        }
    }
}

impl Default for MolgenisClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> MolgenisClientBuilder<U> {
    /// Sets the timeout applied to every individual request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the default HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client for the default transport.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the HTTP transport entirely.
    ///
    /// Takes precedence over [`http_client`](Self::http_client).
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl MolgenisClientBuilder<Set<String>> {
    /// Builds the [`MolgenisClient`].
    ///
    /// Fails with [`ConfigError`] if the URL is not an http(s) site root or
    /// the HTTP client cannot be created.
    pub fn build(self) -> Result<MolgenisClient, Error> {
        let base_url = parse_base_url(&self.url.0)?;

        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                let client = builder
                    .build()
                    .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        tracing::debug!(base_url = %base_url, "Created MOLGENIS client");

        Ok(MolgenisClient {
            inner: Arc::new(MolgenisClientInner {
                base_url,
                transport,
                session: Session::new(),
                timeout: self.timeout,
            }),
        })
    }
}
