//! Session token store

use std::sync::PoisonError;
use std::sync::RwLock;

use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use super::SessionToken;
use super::UserInfo;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-molgenis-token";

/// Content type sent with every request.
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// Holds the one active session token.
///
/// All reads (header snapshots) and writes (login, logout) go through the
/// same lock, and a header map is built entirely under the read guard, so a
/// snapshot is either fully before or fully after a token swap. The guard is
/// never held across an `.await`.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<SessionToken>>,
}

impl Session {
    /// Creates a session with no token installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the headers every request should carry right now.
    ///
    /// Always contains `Content-Type`; contains the token header only while
    /// a token is installed.
    pub fn auth_headers(&self) -> HeaderMap {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        if let Some(token) = guard.as_ref() {
            headers.insert(TOKEN_HEADER, token.header_value().clone());
        }
        headers
    }

    /// Headers for requests that must not carry a token, such as login.
    pub fn anonymous_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers
    }

    /// Replaces the current token, returning the previous one.
    pub fn install(&self, token: SessionToken) -> Option<SessionToken> {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(token)
    }

    /// Removes the current token, returning it.
    pub fn clear(&self) -> Option<SessionToken> {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    /// Returns `true` while a token is installed.
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the user of the installed token.
    pub fn user(&self) -> Option<UserInfo> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| token.user().clone())
    }
}
