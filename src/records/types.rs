//! Record operation arguments and response payloads
//!
//! Every argument type has a `validate` method run before any request is
//! built; it names the offending argument in `Error::Validation`.

use crate::error::{require, require_key, Error, Result};
use crate::filters::FilterStatement;
use crate::types::{Format, JsonObject, JsonValue, SortOrder};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Listing Options
// ============================================================================

/// Pagination, sorting and filtering of a record listing
///
/// Unset options are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub filters: Option<FilterStatement>,
    pub format: Option<Format>,
    /// 1-based page number
    pub page: Option<u32>,
    pub rows_per_page: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListOptions {
    pub fn validate(&self) -> Result<()> {
        if self.page == Some(0) {
            return Err(Error::validation("page", "pages are numbered from 1"));
        }
        if self.rows_per_page == Some(0) {
            return Err(Error::validation("rows_per_page", "must be at least 1"));
        }
        if let Some(ref field) = self.sort_field {
            require("sort_field", field)?;
        }
        if let Some(ref filters) = self.filters {
            filters.validate()?;
        }
        Ok(())
    }

    /// Query parameters in Knack's naming
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut query = Vec::new();

        if let Some(ref filters) = self.filters {
            query.push(("filters".to_string(), filters.to_query_value()?));
        }
        if let Some(format) = self.format {
            query.push(("format".to_string(), format.as_str().to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(rows) = self.rows_per_page {
            query.push(("rows_per_page".to_string(), rows.to_string()));
        }
        if let Some(ref field) = self.sort_field {
            query.push(("sort_field".to_string(), field.clone()));
        }
        if let Some(order) = self.sort_order {
            query.push(("sort_order".to_string(), order.as_str().to_string()));
        }

        Ok(query)
    }
}

/// Builder methods shared by the listing argument types
macro_rules! list_options_builder {
    ($name:ident) => {
        impl $name {
            /// Narrow the listing with a filter statement
            #[must_use]
            pub fn filters(mut self, filters: FilterStatement) -> Self {
                self.options.filters = Some(filters);
                self
            }

            #[must_use]
            pub fn format(mut self, format: Format) -> Self {
                self.options.format = Some(format);
                self
            }

            #[must_use]
            pub fn page(mut self, page: u32) -> Self {
                self.options.page = Some(page);
                self
            }

            #[must_use]
            pub fn rows_per_page(mut self, rows: u32) -> Self {
                self.options.rows_per_page = Some(rows);
                self
            }

            /// Sort on a field key
            #[must_use]
            pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
                self.options.sort_field = Some(field.into());
                self.options.sort_order = Some(order);
                self
            }
        }
    };
}

// ============================================================================
// Object Arguments
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecordArgs {
    pub object_key: String,
    /// Field keys mapped to values
    pub data: JsonObject,
}

impl CreateRecordArgs {
    pub fn new(object_key: impl Into<String>, data: JsonObject) -> Self {
        Self {
            object_key: object_key.into(),
            data,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("object_key", &self.object_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetRecordArgs {
    pub object_key: String,
    pub record_id: String,
}

impl GetRecordArgs {
    pub fn new(object_key: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            object_key: object_key.into(),
            record_id: record_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("object_key", &self.object_key)?;
        require_key("record_id", &self.record_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetRecordsArgs {
    pub object_key: String,
    pub options: ListOptions,
}

impl GetRecordsArgs {
    pub fn new(object_key: impl Into<String>) -> Self {
        Self {
            object_key: object_key.into(),
            options: ListOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("object_key", &self.object_key)?;
        self.options.validate()
    }
}

list_options_builder!(GetRecordsArgs);

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecordArgs {
    pub object_key: String,
    pub record_id: String,
    pub data: JsonObject,
}

impl UpdateRecordArgs {
    pub fn new(object_key: impl Into<String>, record_id: impl Into<String>, data: JsonObject) -> Self {
        Self {
            object_key: object_key.into(),
            record_id: record_id.into(),
            data,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("object_key", &self.object_key)?;
        require_key("record_id", &self.record_id)
    }
}

pub type DeleteRecordArgs = GetRecordArgs;

// ============================================================================
// View Arguments
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewRecordArgs {
    pub scene_key: String,
    pub view_key: String,
    pub data: JsonObject,
}

impl CreateViewRecordArgs {
    pub fn new(scene_key: impl Into<String>, view_key: impl Into<String>, data: JsonObject) -> Self {
        Self {
            scene_key: scene_key.into(),
            view_key: view_key.into(),
            data,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("scene_key", &self.scene_key)?;
        require_key("view_key", &self.view_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetViewRecordArgs {
    pub scene_key: String,
    pub view_key: String,
    pub record_id: String,
}

impl GetViewRecordArgs {
    pub fn new(
        scene_key: impl Into<String>,
        view_key: impl Into<String>,
        record_id: impl Into<String>,
    ) -> Self {
        Self {
            scene_key: scene_key.into(),
            view_key: view_key.into(),
            record_id: record_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("scene_key", &self.scene_key)?;
        require_key("view_key", &self.view_key)?;
        require_key("record_id", &self.record_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetViewRecordsArgs {
    pub scene_key: String,
    pub view_key: String,
    pub options: ListOptions,
}

impl GetViewRecordsArgs {
    pub fn new(scene_key: impl Into<String>, view_key: impl Into<String>) -> Self {
        Self {
            scene_key: scene_key.into(),
            view_key: view_key.into(),
            options: ListOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("scene_key", &self.scene_key)?;
        require_key("view_key", &self.view_key)?;
        self.options.validate()
    }
}

list_options_builder!(GetViewRecordsArgs);

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateViewRecordArgs {
    pub scene_key: String,
    pub view_key: String,
    pub record_id: String,
    pub data: JsonObject,
}

impl UpdateViewRecordArgs {
    pub fn new(
        scene_key: impl Into<String>,
        view_key: impl Into<String>,
        record_id: impl Into<String>,
        data: JsonObject,
    ) -> Self {
        Self {
            scene_key: scene_key.into(),
            view_key: view_key.into(),
            record_id: record_id.into(),
            data,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_key("scene_key", &self.scene_key)?;
        require_key("view_key", &self.view_key)?;
        require_key("record_id", &self.record_id)
    }
}

pub type DeleteViewRecordArgs = GetViewRecordArgs;

// ============================================================================
// Payloads
// ============================================================================

/// A record: its id plus open-ended field data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: JsonObject,
}

impl Record {
    /// Value of a field key, e.g. `field_1` or `field_1_raw`
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }
}

/// One page of a record listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordsPage {
    #[serde(deserialize_with = "lenient_u64")]
    pub current_page: u64,
    pub records: Vec<Record>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_records: u64,
}

impl RecordsPage {
    /// True when no page follows this one
    pub fn is_last(&self) -> bool {
        self.records.is_empty() || self.current_page >= self.total_pages
    }
}

/// Response of a create or update through a view
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewRecordPayload {
    pub record: Record,
    #[serde(default)]
    pub submit_key: JsonValue,
}

/// Response of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeletePayload {
    pub delete: bool,
}

/// Metadata of an uploaded asset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadPayload {
    /// Asset id, stored in the target file/image field
    pub id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
}

/// Knack sends some counters as strings ("1") and others as numbers
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
