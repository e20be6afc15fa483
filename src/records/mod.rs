//! Record operation types
//!
//! Arguments accepted by `KnackClient` operations, the payloads they
//! return, and the file upload input.

mod types;
mod upload;

pub use types::{
    CreateRecordArgs, CreateViewRecordArgs, DeletePayload, DeleteRecordArgs, DeleteViewRecordArgs,
    GetRecordArgs, GetRecordsArgs, GetViewRecordArgs, GetViewRecordsArgs, ListOptions, Record,
    RecordsPage, UpdateRecordArgs, UpdateViewRecordArgs, UploadPayload, ViewRecordPayload,
};
pub use upload::{FileUpload, UploadFileArgs, UploadKind, UPLOAD_FIELD};

#[cfg(test)]
mod tests;
