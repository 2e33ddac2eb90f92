//! Authentication
//!
//! Session handling for the MOLGENIS token login: `api/v1/login` hands out a
//! token that is replayed on every later request in the `x-molgenis-token`
//! header until `api/v1/logout`.

mod login;
mod session;
mod token;

pub use session::Session;
pub use session::CONTENT_TYPE_JSON;
pub use session::TOKEN_HEADER;
pub use token::SessionToken;
pub use token::UserInfo;
