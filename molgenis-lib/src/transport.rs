//! HTTP transport seam.
//!
//! The client never talks to `reqwest` directly: every request goes through a
//! [`Transport`], so tests and embedders can swap the wire layer.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::Method;
use reqwest::StatusCode;
use url::Url;

use crate::error::ApiError;

/// A fully built request, ready to be sent.
///
/// Headers are captured when the request is built, not when it is sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Headers snapshot, including auth headers.
    pub headers: HeaderMap,
    /// Encoded request body.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Returns `true` if the request carries a session token header.
    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(crate::auth::TOKEN_HEADER)
    }
}

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns the body as lossy UTF-8, for error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Converts a non-success response into an [`ApiError::Http`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            return Ok(self);
        }
        let message = if self.body.is_empty() {
            self.status
                .canonical_reason()
                .unwrap_or_default()
                .to_string()
        } else {
            self.text()
        };
        Err(ApiError::http(self.status.as_u16(), message))
    }
}

/// Sends requests over the network.
///
/// Implementations must not retry; a failure is reported as-is.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request and returns the raw response.
    ///
    /// Non-success statuses are returned as responses, not errors.
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError>;
}

/// The default transport, backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
