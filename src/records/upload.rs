//! File upload input
//!
//! An upload is a two-step operation: the binary is posted to the asset
//! endpoint, then the returned asset id is written into a field of a
//! record.

use crate::error::{require, require_key, Error, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Multipart field name Knack expects the binary under
pub const UPLOAD_FIELD: &str = "files";

/// Asset endpoint to upload to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadKind {
    /// `assets/file/upload`, for file fields
    #[default]
    File,
    /// `assets/image/upload`, for image fields
    Image,
}

impl UploadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadKind::File => "file",
            UploadKind::Image => "image",
        }
    }
}

/// A file held in memory, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    /// Read a file from disk; the file name is taken from the path
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::from_bytes(file_name, bytes))
    }

    /// Set the MIME type sent with the part
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Wrap the file in a multipart form under the `files` field
    pub fn into_form(self) -> Result<Form> {
        let mut part = Part::bytes(self.bytes.to_vec()).file_name(self.file_name);
        if let Some(ref content_type) = self.content_type {
            part = part.mime_str(content_type).map_err(|_| {
                Error::validation(
                    "file.content_type",
                    format!("'{content_type}' is not a valid MIME type"),
                )
            })?;
        }
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

/// Upload a file and store its asset id on a record
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFileArgs {
    /// Object holding the target record
    pub object_key: String,
    /// File or image field receiving the asset id
    pub field_key: String,
    pub file: FileUpload,
    pub kind: UploadKind,
    /// Existing record to update; a new record is created when unset
    pub record_id: Option<String>,
}

impl UploadFileArgs {
    pub fn new(object_key: impl Into<String>, field_key: impl Into<String>, file: FileUpload) -> Self {
        Self {
            object_key: object_key.into(),
            field_key: field_key.into(),
            file,
            kind: UploadKind::default(),
            record_id: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: UploadKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach the asset to an existing record instead of creating one
    #[must_use]
    pub fn record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_key("object_key", &self.object_key)?;
        require("field_key", &self.field_key)?;
        require("file.file_name", &self.file.file_name)?;
        if let Some(ref record_id) = self.record_id {
            require_key("record_id", record_id)?;
        }
        Ok(())
    }
}
