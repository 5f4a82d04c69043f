//! HTTP route handlers
//!
//! Each handler validates what the extractors deliver, runs one store
//! operation on the blocking pool, and maps the outcome to a status code.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::error::ApiError;
use super::request::EntryBody;
use crate::query::ListParams;
use crate::record::Record;
use crate::storage::RecordStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,

    /// Rows inserted by one generate-dummy call
    pub bulk_count: usize,
}

/// Run a store call off the async workers
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(id)
}

fn entry_body(
    payload: Result<Json<EntryBody>, JsonRejection>,
) -> Result<EntryBody, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(body)
}

/// Handle GET /api/entries
pub async fn list_entries(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let records = blocking(move || state.store.list(&params)).await?;
    Ok(Json(records))
}

/// Handle POST /api/entries
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<EntryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let body = entry_body(payload)?;
    let record = blocking(move || state.store.create(&body.key, &body.value)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handle GET /api/entries/:id
pub async fn get_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Record>, ApiError> {
    let id = path_id(path)?;
    let record = blocking(move || state.store.get(id)).await?;
    Ok(Json(record))
}

/// Handle PUT /api/entries/:id
pub async fn update_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EntryBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    let body = entry_body(payload)?;
    blocking(move || state.store.update(id, &body.key, &body.value)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle DELETE /api/entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    blocking(move || state.store.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle POST /api/entries/generate-dummy
pub async fn generate_dummy(
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let count = state.bulk_count;
    blocking(move || state.store.generate_bulk(count)).await?;
    Ok(StatusCode::CREATED)
}

/// Handle POST /api/entries/truncate
pub async fn truncate(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    blocking(move || state.store.truncate()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
