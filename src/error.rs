//! Error types for the Knack client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Nothing in this crate retries: every variant reports the outcome of a
//! single attempt.

use thiserror::Error;

/// The main error type for the Knack client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid argument '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error for a named argument
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a required argument that was left empty
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::validation(field, "is required and must not be empty")
    }

    /// Create a filter error
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// True for errors raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::InvalidFilter { .. })
    }

    /// True when the remote service rejected the session or credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 401 | 403, .. })
    }
}

/// Result type alias for the Knack client
pub type Result<T> = std::result::Result<T, Error>;

/// Reject an empty (or whitespace-only) required string argument
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(())
}

/// Reject a key or id that cannot stand as a single URL path segment
///
/// Other reserved characters are percent-encoded when the URL is built;
/// `.` and `..` would still be collapsed by the server.
pub(crate) fn require_key(field: &str, value: &str) -> Result<()> {
    require(field, value)?;
    if matches!(value, "." | "..") {
        return Err(Error::validation(field, "must not be a relative path segment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_field("object_key");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'object_key': is required and must not be empty"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::decode("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::missing_field("record_id").is_validation());
        assert!(Error::invalid_filter("bad operator").is_validation());
        assert!(!Error::http_status(400, "").is_validation());
        assert!(!Error::decode("x").is_validation());
    }

    #[test]
    fn test_is_auth_error() {
        assert!(Error::http_status(401, "").is_auth_error());
        assert!(Error::http_status(403, "").is_auth_error());
        assert!(!Error::http_status(404, "").is_auth_error());
        assert!(!Error::config("x").is_auth_error());
    }

    #[test]
    fn test_require() {
        assert!(require("object_key", "object_1").is_ok());
        assert!(matches!(
            require("object_key", "  "),
            Err(Error::Validation { ref field, .. }) if field == "object_key"
        ));
    }

    #[test]
    fn test_require_key() {
        assert!(require_key("record_id", "rec_1").is_ok());
        assert!(require_key("record_id", "rec_1?format=html").is_ok());
        assert!(require_key("record_id", "..").unwrap_err().is_validation());
        assert!(require_key("record_id", ".").unwrap_err().is_validation());
        assert!(require_key("record_id", "").unwrap_err().is_validation());
    }
}
