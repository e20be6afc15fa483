//! Knack API client
//!
//! `KnackClient` maps each method one-to-one onto a Knack v1 endpoint.
//! Arguments are validated before any request is built; every call is a
//! single round trip through the shared `HttpClient` dispatcher, except
//! `upload_file` (upload then record write) and `get_all_records` (one
//! request per page).
//!
//! The session token written by `authenticate` is shared by all calls on
//! the client. Concurrent `authenticate` calls race and the last one wins,
//! so authenticate once before issuing concurrent record operations.

use crate::auth::{AuthenticateArgs, SessionResponse};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::records::{
    CreateRecordArgs, CreateViewRecordArgs, DeletePayload, DeleteRecordArgs, DeleteViewRecordArgs,
    GetRecordArgs, GetRecordsArgs, GetViewRecordArgs, GetViewRecordsArgs, Record, RecordsPage,
    UpdateRecordArgs, UpdateViewRecordArgs, UploadFileArgs, UploadPayload, ViewRecordPayload,
};
use crate::types::{JsonObject, JsonValue};
use reqwest::Method;
use tracing::{debug, info};

/// Client for one Knack application
#[derive(Debug)]
pub struct KnackClient {
    http: HttpClient,
}

impl KnackClient {
    /// Create a client; fails if the application id or API key is empty
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(&config)?,
        })
    }

    /// Create a client with default transport settings
    pub fn with_credentials(
        application_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ClientConfig::new(application_id, api_key))
    }

    /// Get the underlying dispatcher
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn application_id(&self) -> &str {
        &self.http.authenticator().credentials().application_id
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Log a user in and keep the session token for subsequent requests
    ///
    /// On failure the previously stored token, if any, is left untouched.
    pub async fn authenticate(&self, args: &AuthenticateArgs) -> Result<()> {
        args.validate()?;

        let body = serde_json::to_value(args)?;
        let response: SessionResponse = self
            .http
            .request_json(
                Method::POST,
                &["applications", self.application_id(), "session"],
                RequestConfig::new().json(body),
            )
            .await?;

        self.http
            .authenticator()
            .set_token(response.session.user.token)
            .await;
        debug!("Session established for {}", args.email);
        info!("Authenticated");
        Ok(())
    }

    /// Whether a session token is held
    pub async fn is_authenticated(&self) -> bool {
        self.http.authenticator().token().await.is_some()
    }

    /// The current session token
    pub async fn token(&self) -> Option<String> {
        self.http.authenticator().token().await
    }

    /// Reuse a session token obtained earlier
    pub async fn set_token(&self, token: impl Into<String>) {
        self.http.authenticator().set_token(token).await;
    }

    /// Drop the session token; later requests go out without one
    pub async fn clear_session(&self) {
        self.http.authenticator().clear().await;
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Create a record in an object
    pub async fn create_record(&self, args: &CreateRecordArgs) -> Result<Record> {
        args.validate()?;
        self.send_data(Method::POST, &object_path(&args.object_key, None), &args.data)
            .await
    }

    /// Fetch one record of an object
    pub async fn get_record(&self, args: &GetRecordArgs) -> Result<Record> {
        args.validate()?;
        let path = object_path(&args.object_key, Some(args.record_id.as_str()));
        self.http
            .request_json(Method::GET, &path, RequestConfig::new())
            .await
    }

    /// List records of an object, one page at a time
    pub async fn get_records(&self, args: &GetRecordsArgs) -> Result<RecordsPage> {
        args.validate()?;
        let path = object_path(&args.object_key, None);
        self.list(&path, args.options.to_query()?).await
    }

    /// List every record matching `args`, following pages from `args.page` (default 1)
    ///
    /// Pages are fetched sequentially; the first failure aborts the walk.
    pub async fn get_all_records(&self, args: &GetRecordsArgs) -> Result<Vec<Record>> {
        args.validate()?;

        let mut args = args.clone();
        let mut page = args.options.page.unwrap_or(1);
        let mut records = Vec::new();

        loop {
            args.options.page = Some(page);
            let result = self.get_records(&args).await?;
            let done = result.is_last();
            debug!(
                "Fetched page {}/{} of {}",
                result.current_page, result.total_pages, args.object_key
            );
            records.extend(result.records);

            if done {
                return Ok(records);
            }
            page += 1;
        }
    }

    /// Replace field values of a record
    pub async fn update_record(&self, args: &UpdateRecordArgs) -> Result<Record> {
        args.validate()?;
        let path = object_path(&args.object_key, Some(args.record_id.as_str()));
        self.send_data(Method::PUT, &path, &args.data).await
    }

    /// Delete a record
    pub async fn delete_record(&self, args: &DeleteRecordArgs) -> Result<DeletePayload> {
        args.validate()?;
        let path = object_path(&args.object_key, Some(args.record_id.as_str()));
        self.http
            .request_json(Method::DELETE, &path, RequestConfig::new())
            .await
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Create a record through a view, limited to the user's permissions
    pub async fn create_view_record(&self, args: &CreateViewRecordArgs) -> Result<ViewRecordPayload> {
        args.validate()?;
        let path = view_path(&args.scene_key, &args.view_key, None);
        self.send_data(Method::POST, &path, &args.data).await
    }

    /// Fetch one record through a view
    pub async fn get_view_record(&self, args: &GetViewRecordArgs) -> Result<Record> {
        args.validate()?;
        let path = view_path(&args.scene_key, &args.view_key, Some(args.record_id.as_str()));
        self.http
            .request_json(Method::GET, &path, RequestConfig::new())
            .await
    }

    /// List records shown by a view
    pub async fn get_view_records(&self, args: &GetViewRecordsArgs) -> Result<RecordsPage> {
        args.validate()?;
        let path = view_path(&args.scene_key, &args.view_key, None);
        self.list(&path, args.options.to_query()?).await
    }

    /// Update a record through a view
    pub async fn update_view_record(&self, args: &UpdateViewRecordArgs) -> Result<ViewRecordPayload> {
        args.validate()?;
        let path = view_path(&args.scene_key, &args.view_key, Some(args.record_id.as_str()));
        self.send_data(Method::PUT, &path, &args.data).await
    }

    /// Delete a record through a view
    pub async fn delete_view_record(&self, args: &DeleteViewRecordArgs) -> Result<DeletePayload> {
        args.validate()?;
        let path = view_path(&args.scene_key, &args.view_key, Some(args.record_id.as_str()));
        self.http
            .request_json(Method::DELETE, &path, RequestConfig::new())
            .await
    }

    // ========================================================================
    // Assets
    // ========================================================================

    /// Upload a file, then store its asset id in `field_key` of a record
    ///
    /// Creates a record unless `record_id` is set, in which case that
    /// record is updated. If the upload fails no record write is attempted.
    pub async fn upload_file(&self, args: UploadFileArgs) -> Result<Record> {
        args.validate()?;

        let path = [
            "applications",
            self.application_id(),
            "assets",
            args.kind.as_str(),
            "upload",
        ];
        let file_name = args.file.file_name.clone();
        let form = args.file.into_form()?;
        let asset: UploadPayload = self
            .http
            .request_json(Method::POST, &path, RequestConfig::new().multipart(form))
            .await?;
        info!("Uploaded {} as asset {}", file_name, asset.id);

        let mut data = JsonObject::new();
        data.insert(args.field_key, JsonValue::String(asset.id));

        match args.record_id {
            Some(record_id) => {
                self.update_record(&UpdateRecordArgs::new(args.object_key, record_id, data))
                    .await
            }
            None => {
                self.create_record(&CreateRecordArgs::new(args.object_key, data))
                    .await
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn send_data<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &[&str],
        data: &JsonObject,
    ) -> Result<T> {
        let body = JsonValue::Object(data.clone());
        self.http
            .request_json(method, path, RequestConfig::new().json(body))
            .await
    }

    async fn list(&self, path: &[&str], query: Vec<(String, String)>) -> Result<RecordsPage> {
        let config = RequestConfig {
            query,
            ..RequestConfig::default()
        };
        self.http.request_json(Method::GET, path, config).await
    }
}

fn object_path<'a>(object_key: &'a str, record_id: Option<&'a str>) -> Vec<&'a str> {
    let mut path = vec!["objects", object_key, "records"];
    path.extend(record_id);
    path
}

fn view_path<'a>(scene_key: &'a str, view_key: &'a str, record_id: Option<&'a str>) -> Vec<&'a str> {
    let mut path = vec!["pages", scene_key, "views", view_key, "records"];
    path.extend(record_id);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            object_path("object_1", None),
            vec!["objects", "object_1", "records"]
        );
        assert_eq!(
            object_path("object_1", Some("rec_1")),
            vec!["objects", "object_1", "records", "rec_1"]
        );
        assert_eq!(
            view_path("scene_1", "view_2", None),
            vec!["pages", "scene_1", "views", "view_2", "records"]
        );
        assert_eq!(
            view_path("scene_1", "view_2", Some("rec_3")),
            vec!["pages", "scene_1", "views", "view_2", "records", "rec_3"]
        );
    }

    #[test]
    fn test_new_rejects_empty_credentials() {
        assert!(KnackClient::with_credentials("", "key").is_err());
        assert!(KnackClient::with_credentials("app", "").is_err());
        assert!(KnackClient::with_credentials("app", "key").is_ok());
    }
}
