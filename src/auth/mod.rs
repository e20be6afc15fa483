//! Authentication module
//!
//! Knack authenticates every request with three headers: the application
//! id, the REST API key, and (after a user login) the session token.
//! The `Authenticator` owns the credentials and the token store.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{
    AuthenticateArgs, Credentials, Session, SessionResponse, SessionUser, API_KEY_HEADER,
    APPLICATION_ID_HEADER, TOKEN_HEADER,
};

#[cfg(test)]
mod tests;
