//! Token login and logout (`api/v1/login`, `api/v1/logout`)

use reqwest::Method;
use reqwest::StatusCode;

use super::SessionToken;
use super::UserInfo;
use super::token::LoginRequest;
use super::token::LoginResponse;
use crate::MolgenisClient;
use crate::api::request::Resource;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::codec;

impl MolgenisClient {
    /// Logs in and installs the session token.
    ///
    /// Returns `false` on any failure (network, rejected credentials,
    /// unreadable response). A failed login leaves the current session,
    /// if any, untouched. Use [`try_authenticate`](Self::try_authenticate)
    /// to learn why it failed.
    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        match self.try_authenticate(username, password).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(username, error = %e, "Login failed");
                false
            }
        }
    }

    /// Logs in and installs the session token, returning the logged-in user.
    ///
    /// The login request carries only the content type, never the current
    /// token. The token is swapped in only once the response has been
    /// decoded successfully.
    pub async fn try_authenticate(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let request = self
            .anonymous_request(Method::POST, &Resource::Login)
            .and_then(|r| r.json(&LoginRequest { username, password }))
            .map_err(into_auth_error)?;

        let response = self
            .send(request)
            .await
            .map_err(into_auth_error)?
            .error_for_status()?;

        let login: LoginResponse = codec::decode(&response.body)?;
        let token = SessionToken::try_from(login)?;
        let user = token.user().clone();

        if self.session().install(token).is_some() {
            tracing::debug!("Replaced previous session token");
        }
        tracing::info!(username = %user.username, "Logged in");
        Ok(user)
    }

    /// Logs out.
    ///
    /// The logout request carries the current token. Once it has completed,
    /// whatever its outcome, the token is cleared. Returns `true` only when
    /// the server answered 200.
    pub async fn deauthenticate(&self) -> bool {
        let result = match self.build_request(Method::POST, &Resource::Logout, &[]) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        self.session().clear();

        match result {
            Ok(response) if response.status == StatusCode::OK => {
                tracing::info!("Logged out");
                true
            }
            Ok(response) => {
                tracing::warn!(status = response.status.as_u16(), "Logout rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed");
                false
            }
        }
    }
}

fn into_auth_error(err: Error) -> AuthError {
    match err {
        Error::Api(e) => e.into(),
        Error::Auth(e) => e,
        other => AuthError::Parse(other.to_string()),
    }
}
