use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, rejection::QueryRejection, Query, State},
    Json,
};
use common::types::MessageBody;
use serde::Deserialize;
use serde_json::Value;
use service::pagination::Pagination;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Bodies are parsed as JSON whatever their `Content-Type` says.
fn parse_body(body: Result<Bytes, BytesRejection>) -> Result<Value, JsonApiError> {
    let bytes = body.map_err(|rej| {
        JsonApiError::new(rej.status(), "Invalid Body", Some(rej.body_text()))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| JsonApiError::bad_request(format!("invalid JSON body: {e}")))
}

/// GET /get-users
pub async fn list_records(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, JsonApiError> {
    let Query(q) = query.map_err(|rej| JsonApiError::bad_request(rej.body_text()))?;
    let records = state.records.list(Pagination::new(q.offset, q.limit)).await?;
    Ok(Json(records))
}

/// POST /add-user
pub async fn add_record(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let payload = parse_body(body)?;
    state.records.create(&payload).await?;
    Ok(Json(MessageBody::new("Document added successfully")))
}

/// POST /update-user
pub async fn update_record(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let payload = parse_body(body)?;
    state.records.update(&payload).await?;
    Ok(Json(MessageBody::new("Document updated successfully")))
}

/// POST /delete-user
pub async fn delete_record(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let payload = parse_body(body)?;
    state.records.delete(&payload).await?;
    Ok(Json(MessageBody::new("Document deleted successfully")))
}
