//! Session token and logged-in user

use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;

use crate::error::AuthError;

/// The profile returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Login name.
    pub username: String,
    /// First name, if the account has one.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Last name, if the account has one.
    #[serde(default)]
    pub lastname: Option<String>,
}

impl UserInfo {
    /// Returns "first last", falling back to the username.
    pub fn display_name(&self) -> String {
        match (&self.firstname, &self.lastname) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

/// Wire shape of the `api/v1/login` response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    username: String,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
    token: String,
}

/// Wire shape of the `api/v1/login` request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// An installed session token together with the user it belongs to.
///
/// The token is kept as a ready-to-send, sensitive header value so that
/// building a header snapshot never fails and never prints the secret.
#[derive(Clone)]
pub struct SessionToken {
    user: UserInfo,
    header: HeaderValue,
}

impl SessionToken {
    /// Creates a session token, rejecting values that cannot be sent as a header.
    pub fn new(user: UserInfo, token: &str) -> Result<Self, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Parse("login response carried an empty token".into()));
        }
        let mut header = HeaderValue::from_str(token)
            .map_err(|_| AuthError::Parse("token is not a valid header value".into()))?;
        header.set_sensitive(true);
        Ok(Self { user, header })
    }

    /// The user this token was issued to.
    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub(crate) fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TryFrom<LoginResponse> for SessionToken {
    type Error = AuthError;

    fn try_from(response: LoginResponse) -> Result<Self, Self::Error> {
        let user = UserInfo {
            username: response.username,
            firstname: response.firstname,
            lastname: response.lastname,
        };
        SessionToken::new(user, &response.token)
    }
}
