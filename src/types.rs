//! Common types used throughout the Knack client
//!
//! Shared type aliases and the small wire enums used by more than one
//! module.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, used for record field data
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Listing Options
// ============================================================================

/// Response format for field values in record listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Raw stored values
    Raw,
    /// HTML-formatted values
    Html,
    /// Both raw (`field_1_raw`) and formatted values
    Both,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Raw => "raw",
            Format::Html => "html",
            Format::Both => "both",
        }
    }
}

/// Sort direction for record listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
