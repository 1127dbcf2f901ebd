use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{
    MessageResponse, Pagination, RecordCountResponse, RecordInput, RecordListResponse,
    RecordResponse,
};
use crate::services::record_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_records).post(create_record))
        .route("/count", get(count_records))
        .route("/:id", get(get_record).put(update_record).delete(delete_record))
}

pub async fn create_record(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(data): Json<RecordInput>,
) -> Result<(StatusCode, Json<RecordResponse>), AppError> {
    info!("POST /records - Creating record for user {}", user_id);
    let record = record_service::create(&state.pool, user_id, data).await
        .map_err(|e| {
            error!("Failed to create record: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(RecordResponse { record })))
}

pub async fn fetch_records(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<RecordListResponse>, AppError> {
    info!(
        "GET /records?page={}&pageSize={} - Fetching records",
        pagination.page, pagination.page_size
    );
    let records = record_service::fetch_page(&state.pool, user_id, pagination).await
        .map_err(|e| {
            error!("Failed to fetch records: {}", e);
            e
        })?;
    Ok(Json(RecordListResponse { records }))
}

pub async fn count_records(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<RecordCountResponse>, AppError> {
    info!("GET /records/count - Counting records");
    let record_count = record_service::count(&state.pool, user_id).await
        .map_err(|e| {
            error!("Failed to count records: {}", e);
            e
        })?;
    Ok(Json(RecordCountResponse { record_count }))
}

pub async fn get_record(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecordResponse>, AppError> {
    info!("GET /records/{} - Fetching record", id);
    let record = record_service::fetch_one(&state.pool, user_id, id).await
        .map_err(|e| {
            error!("Failed to fetch record {}: {}", id, e);
            e
        })?;
    Ok(Json(RecordResponse { record }))
}

pub async fn update_record(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(data): Json<RecordInput>,
) -> Result<Json<RecordResponse>, AppError> {
    info!("PUT /records/{} - Updating record", id);
    let record = record_service::update(&state.pool, user_id, id, data).await
        .map_err(|e| {
            error!("Failed to update record {}: {}", id, e);
            e
        })?;
    Ok(Json(RecordResponse { record }))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    info!("DELETE /records/{} - Deleting record", id);
    record_service::delete(&state.pool, user_id, id).await
        .map_err(|e| {
            error!("Failed to delete record {}: {}", id, e);
            e
        })?;
    Ok(Json(MessageResponse { message: "Deleted".to_string() }))
}
