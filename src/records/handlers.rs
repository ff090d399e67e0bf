use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{CreateStudyRecordRequest, CreateWorkoutRecordRequest};
use super::services::{StudyRecordsService, WorkoutRecordsService};
use crate::auth::CurrentUser;
use crate::common::{ApiError, AppState};

// ============================================================================
// Study Record Handlers
// ============================================================================

/// POST /api/studyrecord/save
pub async fn create_study_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<CreateStudyRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = StudyRecordsService::new(state.read().await.db.clone());
    Ok(Json(service.create(current.id(), request).await?))
}

/// GET /api/studyrecord/:user_id
pub async fn list_study_records(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    current.ensure_owner(user_id)?;

    let service = StudyRecordsService::new(state.read().await.db.clone());
    Ok(Json(service.list_for_user(user_id).await?))
}

/// GET /api/studyrecord/detail/:record_id
pub async fn get_study_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(record_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = StudyRecordsService::new(state.read().await.db.clone());
    let record = service.get(record_id).await?;
    current.ensure_owner(record.user_id)?;

    Ok(Json(record))
}

/// DELETE /api/studyrecord/:record_id
pub async fn delete_study_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(record_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = StudyRecordsService::new(state.read().await.db.clone());
    current.ensure_owner(service.get(record_id).await?.user_id)?;

    service.delete(record_id).await?;
    Ok(Json(json!({ "message": "Study record deleted successfully" })))
}

// ============================================================================
// Workout Record Handlers
// ============================================================================

/// POST /api/workoutrecord/save
pub async fn create_workout_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<CreateWorkoutRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkoutRecordsService::new(state.read().await.db.clone());
    Ok(Json(service.create(current.id(), request).await?))
}

/// GET /api/workoutrecord/:user_id
pub async fn list_workout_records(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    current.ensure_owner(user_id)?;

    let service = WorkoutRecordsService::new(state.read().await.db.clone());
    Ok(Json(service.list_for_user(user_id).await?))
}

/// GET /api/workoutrecord/detail/:record_id
pub async fn get_workout_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(record_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkoutRecordsService::new(state.read().await.db.clone());
    let record = service.get(record_id).await?;
    current.ensure_owner(record.user_id)?;

    Ok(Json(record))
}

/// DELETE /api/workoutrecord/:record_id
pub async fn delete_workout_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(record_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkoutRecordsService::new(state.read().await.db.clone());
    current.ensure_owner(service.get(record_id).await?.user_id)?;

    service.delete(record_id).await?;
    Ok(Json(json!({ "message": "Workout record deleted successfully" })))
}
