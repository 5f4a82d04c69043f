//! Tests for the HTTP API
//!
//! Exercises the router with `oneshot()` against a real store in a
//! temporary directory, checking status codes and JSON bodies.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rowkv::config::Config;
use rowkv::network::{router, AppState};
use rowkv::storage::RecordStore;
use rowkv::Record;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

const BULK_COUNT: usize = 200;

fn setup() -> (TempDir, Router, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .pool_size(4)
        .build();
    let store = RecordStore::open(&config).unwrap();
    let app = router(AppState {
        store: store.clone(),
        bulk_count: BULK_COUNT,
    });
    (temp_dir, app, store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn create(app: &Router, key: &str, value: &str) -> Record {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/entries",
        Some(json!({ "key": key, "value": value })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    serde_json::from_str(&body).unwrap()
}

async fn list(app: &Router, uri: &str) -> Vec<Record> {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    serde_json::from_str(&body).unwrap()
}

fn error_message(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["error"].as_str().unwrap().to_string()
}

// =============================================================================
// Create / Get Tests
// =============================================================================

#[tokio::test]
async fn test_create_returns_record() {
    let (_temp, app, _store) = setup();

    let record = create(&app, "alpha", "one").await;

    assert!(record.id > 0);
    assert_eq!(record.key, "alpha");
    assert_eq!(record.value, "one");
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn test_record_json_shape() {
    let (_temp, app, _store) = setup();
    let record = create(&app, "shape", "check").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/entries/{}", record.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    let object = value.as_object().unwrap();
    let mut fields: Vec<_> = object.keys().map(String::as_str).collect();
    fields.sort();
    assert_eq!(fields, vec!["created_at", "id", "key", "updated_at", "value"]);
    assert_eq!(value["id"], json!(record.id));
}

#[tokio::test]
async fn test_create_duplicate_is_conflict() {
    let (_temp, app, _store) = setup();
    create(&app, "dup", "first").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "key": "dup", "value": "second" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_message(&body), "Key already exists");
}

#[tokio::test]
async fn test_create_missing_field_is_bad_request() {
    let (_temp, app, store) = setup();

    let (status, body) = send(&app, Method::POST, "/api/entries", Some(json!({ "key": "lonely" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_empty_value_accepted() {
    let (_temp, app, _store) = setup();

    let record = create(&app, "blank", "").await;
    assert_eq!(record.value, "");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (_temp, app, _store) = setup();

    let (status, body) = send(&app, Method::GET, "/api/entries/404", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Entry not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (_temp, app, _store) = setup();

    let (status, _) = send(&app, Method::GET, "/api/entries/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update / Delete Tests
// =============================================================================

#[tokio::test]
async fn test_update_returns_no_content() {
    let (_temp, app, store) = setup();
    let record = create(&app, "before", "v1").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/entries/{}", record.id),
        Some(json!({ "key": "after", "value": "v2" })),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let stored = store.get(record.id).unwrap();
    assert_eq!(stored.key, "after");
    assert_eq!(stored.value, "v2");
    assert!(stored.updated_at > record.updated_at);
    assert_eq!(stored.created_at, record.created_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (_temp, app, store) = setup();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/entries/77",
        Some(json!({ "key": "k", "value": "v" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_update_conflict() {
    let (_temp, app, _store) = setup();
    create(&app, "taken", "a").await;
    let other = create(&app, "free", "b").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/entries/{}", other.id),
        Some(json!({ "key": "taken", "value": "b" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_field_is_bad_request() {
    let (_temp, app, _store) = setup();
    let record = create(&app, "k", "v").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/entries/{}", record.id),
        Some(json!({ "value": "only" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_get() {
    let (_temp, app, _store) = setup();
    let record = create(&app, "gone", "soon").await;
    let uri = format!("/api/entries/{}", record.id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// List Tests
// =============================================================================

#[tokio::test]
async fn test_list_empty_is_json_array() {
    let (_temp, app, _store) = setup();

    let (status, body) = send(&app, Method::GET, "/api/entries", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_list_query_parameters() {
    let (_temp, app, _store) = setup();
    for key in ["delta", "alpha", "charlie", "bravo"] {
        create(&app, key, "phonetic").await;
    }
    create(&app, "other", "thing").await;

    let records = list(&app, "/api/entries?search=phon&sort=key&order=asc&page=1&pageSize=2").await;
    let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["alpha", "bravo"]);

    let records = list(&app, "/api/entries?search=phon&sort=key&order=asc&page=2&pageSize=2").await;
    let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["charlie", "delta"]);
}

#[tokio::test]
async fn test_list_invalid_sort_is_bad_request() {
    let (_temp, app, _store) = setup();

    let (status, body) = send(&app, Method::GET, "/api/entries?sort=drop%20table&order=desc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("sort column"));
}

#[tokio::test]
async fn test_list_invalid_order_is_bad_request() {
    let (_temp, app, _store) = setup();

    let (status, _) = send(&app, Method::GET, "/api/entries?order=up", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_non_numeric_page_is_bad_request() {
    let (_temp, app, _store) = setup();

    let (status, _) = send(&app, Method::GET, "/api/entries?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/entries?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Bulk / Truncate Tests
// =============================================================================

#[tokio::test]
async fn test_generate_dummy_then_truncate() {
    let (_temp, app, store) = setup();
    create(&app, "manual", "entry").await;

    let (status, body) = send(&app, Method::POST, "/api/entries/generate-dummy", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_empty());
    assert_eq!(store.count().unwrap(), BULK_COUNT as i64 + 1);

    let records = list(&app, "/api/entries?pageSize=1000").await;
    assert_eq!(records.len(), BULK_COUNT + 1);

    let (status, body) = send(&app, Method::POST, "/api/entries/truncate", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    assert!(list(&app, "/api/entries").await.is_empty());

    let fresh = create(&app, "manual", "again").await;
    assert!(fresh.id > 0);
}

// =============================================================================
// Health Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_temp, app, _store) = setup();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "ok");
}
