//! Request construction and dispatch
//!
//! Every call the client makes goes through [`MolgenisClient::build_request`]
//! (or [`MolgenisClient::request_for_url`] for server-supplied links) and
//! [`MolgenisClient::send`]. Headers are snapshotted from the session when the
//! request is built.

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::MolgenisClient;
use crate::auth::Session;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::codec;
use crate::transport::ApiRequest;
use crate::transport::HttpResponse;

/// Something the client can address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `api/v1/login`
    Login,
    /// `api/v1/logout`
    Logout,
    /// `api/v2/<entity>`
    Collection(String),
    /// `api/v2/<entity>/<id>`
    Item(String, String),
    /// A link handed out by the server, such as a page's `nextHref`.
    ///
    /// Absolute and root-relative links are both accepted.
    Link(String),
}

impl Resource {
    /// Addresses all rows of an entity type.
    pub fn collection(entity: impl Into<String>) -> Self {
        Self::Collection(entity.into())
    }

    /// Addresses one row of an entity type.
    pub fn item(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Item(entity.into(), id.into())
    }

    /// Resolves this resource against the site root.
    pub fn resolve(&self, base: &Url) -> Result<Url, Error> {
        match self {
            Resource::Login => api_url(base, &["api", "v1", "login"], "login"),
            Resource::Logout => api_url(base, &["api", "v1", "logout"], "logout"),
            Resource::Collection(entity) => {
                validate_entity_name(entity)?;
                api_url(base, &["api", "v2", entity], entity)
            }
            Resource::Item(entity, id) => {
                validate_entity_name(entity)?;
                if id.is_empty() || id == "." || id == ".." {
                    return Err(Error::invalid_resource(entity, format!("invalid id '{id}'")));
                }
                api_url(base, &["api", "v2", entity, id], entity)
            }
            Resource::Link(href) => base
                .join(href)
                .map_err(|e| Error::Api(ApiError::InvalidUrl(format!("{href}: {e}")))),
        }
    }
}

fn api_url(base: &Url, segments: &[&str], entity: &str) -> Result<Url, Error> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::invalid_resource(entity, "base URL cannot carry a path"))?
        .clear()
        .extend(segments);
    Ok(url)
}

/// Checks that an entity type id can be used as a single path segment.
pub(crate) fn validate_entity_name(entity: &str) -> Result<(), Error> {
    if entity.trim().is_empty() {
        return Err(Error::invalid_resource(entity, "entity name is empty"));
    }
    if entity == "." || entity == ".." {
        return Err(Error::invalid_resource(entity, "entity name is a relative path"));
    }
    if let Some(c) = entity
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace() || c.is_control())
    {
        return Err(Error::invalid_resource(
            entity,
            format!("entity name contains '{}'", c.escape_default()),
        ));
    }
    Ok(())
}

impl ApiRequest {
    /// Encodes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(codec::encode(body)?);
        Ok(self)
    }
}

impl MolgenisClient {
    /// Returns the headers a request built right now would carry.
    ///
    /// Safe to call while another task logs in or out: the map is either
    /// entirely from before or entirely from after the token swap.
    pub fn current_auth_headers(&self) -> HeaderMap {
        self.session().auth_headers()
    }

    /// Builds a request for `resource` with the current session headers.
    ///
    /// Fails with [`Error::InvalidResource`] before anything is sent when the
    /// resource cannot be mapped to a URL.
    pub fn build_request(
        &self,
        method: Method,
        resource: &Resource,
        query: &[(&str, String)],
    ) -> Result<ApiRequest, Error> {
        let url = with_query(resource.resolve(self.base_url())?, query);
        Ok(self.request_for_url(method, url))
    }

    /// Builds a request for an already resolved URL with the current
    /// session headers.
    pub fn request_for_url(&self, method: Method, url: Url) -> ApiRequest {
        ApiRequest {
            method,
            url,
            headers: self.session().auth_headers(),
            body: None,
        }
    }

    /// Builds a request that never carries the session token.
    pub(crate) fn anonymous_request(
        &self,
        method: Method,
        resource: &Resource,
    ) -> Result<ApiRequest, Error> {
        Ok(ApiRequest {
            method,
            url: resource.resolve(self.base_url())?,
            headers: Session::anonymous_headers(),
            body: None,
        })
    }

    /// Sends a request, bounded by the configured timeout.
    ///
    /// The raw response is returned whatever its status. Nothing is retried.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, Error> {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            authenticated = request.is_authenticated(),
            "Sending request"
        );

        let response = match self.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, self.transport().send(request))
                .await
                .map_err(|_| ApiError::Timeout(timeout))??,
            None => self.transport().send(request).await?,
        };

        tracing::debug!(status = response.status.as_u16(), "Received response");
        Ok(response)
    }

    /// Sends a request and decodes a successful response body as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let response = self.send(request).await?.error_for_status()?;
        Ok(codec::decode(&response.body)?)
    }
}

fn with_query(mut url: Url, query: &[(&str, String)]) -> Url {
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url
}
