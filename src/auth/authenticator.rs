//! Authenticator implementation
//!
//! Applies the application credentials and the current session token to
//! outgoing requests.

use super::types::{Credentials, API_KEY_HEADER, APPLICATION_ID_HEADER, TOKEN_HEADER};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authenticator handles applying authentication to HTTP requests
///
/// The session token is shared by every clone of the authenticator and is
/// overwritten by each successful login, last write wins. Callers should
/// authenticate once, serially, before issuing concurrent record operations.
#[derive(Clone)]
pub struct Authenticator {
    /// Immutable application credentials
    credentials: Credentials,
    /// Session token, absent until a login succeeds
    token: Arc<RwLock<Option<String>>>,
}

impl Authenticator {
    /// Create a new authenticator with no session
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Apply the Knack headers to a request builder
    ///
    /// The `token` header is only attached once a session exists.
    pub async fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header(APPLICATION_ID_HEADER, self.credentials.application_id.as_str())
            .header(API_KEY_HEADER, self.credentials.api_key.as_str());

        match self.token.read().await.as_deref() {
            Some(token) => req.header(TOKEN_HEADER, token),
            None => req,
        }
    }

    /// Store a session token
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Current session token, if any
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Forget the session token
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    /// Get the application credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
