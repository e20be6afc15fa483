//! Tests for the records module

use super::*;
use crate::error::Error;
use crate::filters::{BooleanOperator, FilterRule, FilterStatement};
use crate::types::{Format, JsonObject, SortOrder};
use pretty_assertions::assert_eq;
use serde_json::json;

fn data() -> JsonObject {
    json!({"field_1": "Ada"}).as_object().cloned().unwrap()
}

fn invalid_field(result: crate::error::Result<()>) -> String {
    match result {
        Err(Error::Validation { field, .. }) => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_object_args_validation() {
    assert!(CreateRecordArgs::new("object_1", data()).validate().is_ok());
    assert_eq!(invalid_field(CreateRecordArgs::new("", data()).validate()), "object_key");

    assert_eq!(invalid_field(GetRecordArgs::new("object_1", "").validate()), "record_id");
    assert_eq!(invalid_field(DeleteRecordArgs::new(" ", "rec_1").validate()), "object_key");
    assert_eq!(
        invalid_field(UpdateRecordArgs::new("object_1", "", data()).validate()),
        "record_id"
    );
}

#[test]
fn test_view_args_validation() {
    assert!(CreateViewRecordArgs::new("scene_1", "view_1", data()).validate().is_ok());
    assert_eq!(
        invalid_field(CreateViewRecordArgs::new("", "view_1", data()).validate()),
        "scene_key"
    );
    assert_eq!(
        invalid_field(UpdateViewRecordArgs::new("scene_1", "", "rec_1", data()).validate()),
        "view_key"
    );
    assert_eq!(
        invalid_field(DeleteViewRecordArgs::new("scene_1", "view_1", "").validate()),
        "record_id"
    );
    assert_eq!(
        invalid_field(GetViewRecordsArgs::new("scene_1", "").validate()),
        "view_key"
    );
}

#[test]
fn test_list_options_validation() {
    assert_eq!(invalid_field(GetRecordsArgs::new("object_1").page(0).validate()), "page");
    assert_eq!(
        invalid_field(GetRecordsArgs::new("object_1").rows_per_page(0).validate()),
        "rows_per_page"
    );
    assert_eq!(
        invalid_field(GetRecordsArgs::new("object_1").sort("", SortOrder::Asc).validate()),
        "sort_field"
    );

    let bad_filter = FilterStatement::all([FilterRule::yes_no("", BooleanOperator::Is)]);
    let err = GetRecordsArgs::new("object_1").filters(bad_filter).validate().unwrap_err();
    assert!(matches!(err, Error::InvalidFilter { .. }));
}

#[test]
fn test_upload_args_validation() {
    let file = FileUpload::from_bytes("a.txt", "hello");
    assert!(UploadFileArgs::new("object_1", "field_9", file.clone()).validate().is_ok());
    assert_eq!(
        invalid_field(UploadFileArgs::new("object_1", "", file.clone()).validate()),
        "field_key"
    );
    assert_eq!(
        invalid_field(UploadFileArgs::new("object_1", "field_9", file.clone()).record_id("").validate()),
        "record_id"
    );
    assert_eq!(
        invalid_field(UploadFileArgs::new("object_1", "field_9", FileUpload::from_bytes("", "x")).validate()),
        "file.file_name"
    );
}

// ============================================================================
// Query Building
// ============================================================================

#[test]
fn test_empty_options_produce_no_query() {
    let args = GetRecordsArgs::new("object_1");
    assert!(args.options.to_query().unwrap().is_empty());
}

#[test]
fn test_all_options_produce_query() {
    let filters = FilterStatement::all([FilterRule::yes_no("field_2", BooleanOperator::Is).value(true)]);
    let args = GetRecordsArgs::new("object_1")
        .filters(filters.clone())
        .format(Format::Raw)
        .page(3)
        .rows_per_page(25)
        .sort("field_1", SortOrder::Desc);

    let query = args.options.to_query().unwrap();
    let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let filters_json = filters.to_query_value().unwrap();

    assert_eq!(
        pairs,
        vec![
            ("filters", filters_json.as_str()),
            ("format", "raw"),
            ("page", "3"),
            ("rows_per_page", "25"),
            ("sort_field", "field_1"),
            ("sort_order", "desc"),
        ]
    );
}

#[test]
fn test_partial_options_only_include_present() {
    let args = GetViewRecordsArgs::new("scene_1", "view_1").rows_per_page(10);
    let query = args.options.to_query().unwrap();
    assert_eq!(query, vec![("rows_per_page".to_string(), "10".to_string())]);
}

// ============================================================================
// Payloads
// ============================================================================

#[test]
fn test_record_flattens_fields() {
    let record: Record =
        serde_json::from_value(json!({"id": "rec_1", "field_1": "Ada", "field_1_raw": "Ada"})).unwrap();
    assert_eq!(record.id, "rec_1");
    assert_eq!(record.get("field_1"), Some(&json!("Ada")));
    assert!(!record.fields.contains_key("id"));

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"id": "rec_1", "field_1": "Ada", "field_1_raw": "Ada"})
    );
}

#[test]
fn test_record_requires_id() {
    assert!(serde_json::from_value::<Record>(json!({"field_1": "x"})).is_err());
}

#[test]
fn test_records_page_accepts_string_counters() {
    let page: RecordsPage = serde_json::from_value(json!({
        "current_page": "2",
        "records": [{"id": "rec_1"}],
        "total_pages": 3,
        "total_records": 51
    }))
    .unwrap();

    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_records, 51);
    assert!(!page.is_last());
}

#[test]
fn test_records_page_is_last() {
    let last = RecordsPage {
        current_page: 3,
        records: vec![Record {
            id: "r".to_string(),
            fields: JsonObject::new(),
        }],
        total_pages: 3,
        total_records: 3,
    };
    assert!(last.is_last());

    let empty = RecordsPage {
        current_page: 1,
        records: Vec::new(),
        total_pages: 5,
        total_records: 0,
    };
    assert!(empty.is_last());
}

#[test]
fn test_view_and_delete_payloads() {
    let payload: ViewRecordPayload =
        serde_json::from_value(json!({"record": {"id": "rec_1"}, "submit_key": true})).unwrap();
    assert_eq!(payload.record.id, "rec_1");
    assert_eq!(payload.submit_key, json!(true));

    let deleted: DeletePayload = serde_json::from_value(json!({"delete": true})).unwrap();
    assert!(deleted.delete);
}

#[test]
fn test_upload_payload() {
    let payload: UploadPayload = serde_json::from_value(json!({
        "id": "asset_1",
        "filename": "a.png",
        "size": 1024,
        "type": "image",
        "public_url": "https://assets.knack.com/a.png",
        "thumb_url": null
    }))
    .unwrap();

    assert_eq!(payload.id, "asset_1");
    assert_eq!(payload.size, 1024);
    assert_eq!(payload.kind, "image");
    assert!(payload.thumb_url.is_none());
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_file_upload_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let upload = FileUpload::from_path(&path).await.unwrap();
    assert_eq!(upload.file_name, "report.csv");
    assert_eq!(upload.bytes.as_ref(), b"a,b\n1,2\n");
    assert!(upload.content_type.is_none());
}

#[tokio::test]
async fn test_file_upload_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = FileUpload::from_path(dir.path().join("missing.bin")).await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_file_upload_into_form() {
    let upload = FileUpload::from_bytes("a.png", vec![1u8, 2, 3]).content_type("image/png");
    assert!(upload.into_form().is_ok());

    let bad = FileUpload::from_bytes("a.png", vec![1u8]).content_type("not a mime type");
    assert_eq!(invalid_field(bad.into_form().map(|_| ())), "file.content_type");
}

#[test]
fn test_relative_segments_rejected() {
    assert_eq!(invalid_field(GetRecordArgs::new("object_1", "..").validate()), "record_id");
    assert_eq!(invalid_field(CreateRecordArgs::new(".", data()).validate()), "object_key");
    assert_eq!(
        invalid_field(GetViewRecordArgs::new("scene_1", "..", "rec_1").validate()),
        "view_key"
    );
    assert!(GetRecordArgs::new("object_1", "rec_1?format=html").validate().is_ok());
}

#[test]
fn test_upload_kind_paths() {
    assert_eq!(UploadKind::default(), UploadKind::File);
    assert_eq!(UploadKind::File.as_str(), "file");
    assert_eq!(UploadKind::Image.as_str(), "image");
}
