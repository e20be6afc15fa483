//! Auth types
//!
//! Application credentials and the wire shapes of the Knack login endpoint.

use crate::error::{require, Result};
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// Header carrying the application id
pub const APPLICATION_ID_HEADER: &str = "X-Knack-Application-Id";

/// Header carrying the REST API key
pub const API_KEY_HEADER: &str = "X-Knack-REST-API-Key";

/// Header carrying the user session token
pub const TOKEN_HEADER: &str = "token";

/// Application credentials, fixed for the lifetime of a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Knack application id
    pub application_id: String,
    /// REST API key
    pub api_key: String,
}

impl Credentials {
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Email/password login body
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthenticateArgs {
    pub email: String,
    pub password: String,
}

impl AuthenticateArgs {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl std::fmt::Debug for AuthenticateArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateArgs")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST applications/{app_id}/session`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub session: Session,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

/// The authenticated user; only `token` is guaranteed
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    pub token: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub empty_pass: Option<bool>,
    #[serde(default)]
    pub profile_keys: Vec<String>,
    #[serde(default)]
    pub profile_objects: Vec<JsonObject>,
    #[serde(default)]
    pub utility_key: Option<String>,
    #[serde(default)]
    pub values: JsonObject,
}
