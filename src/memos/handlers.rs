use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::MemoRequest;
use super::services::MemosService;
use crate::auth::CurrentUser;
use crate::common::{ApiError, AppState};

async fn service(state: &Arc<RwLock<AppState>>) -> MemosService {
    MemosService::new(state.read().await.db.clone())
}

/// GET /api/memo/:user_id
pub async fn list_memos(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    current.ensure_owner(user_id)?;
    Ok(Json(service(&state).await.list_for_user(user_id).await?))
}

/// GET /api/memo/detail/:memo_id
pub async fn get_memo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(memo_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let memo = service(&state).await.get(memo_id).await?;
    current.ensure_owner(memo.user_id)?;
    Ok(Json(memo))
}

/// GET /api/memo/count/:user_id
pub async fn count_memos(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    current.ensure_owner(user_id)?;
    Ok(Json(service(&state).await.count_for_user(user_id).await?))
}

/// POST /api/memo/save
pub async fn create_memo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<MemoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let memo = service(&state).await.create(current.id(), request).await?;
    Ok(Json(memo))
}

/// PUT /api/memo/update/:memo_id
pub async fn update_memo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(memo_id): Path<i64>,
    Json(request): Json<MemoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = service(&state).await;
    current.ensure_owner(service.get(memo_id).await?.user_id)?;

    Ok(Json(service.update(memo_id, request).await?))
}

/// DELETE /api/memo/:memo_id
pub async fn delete_memo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(memo_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = service(&state).await;
    current.ensure_owner(service.get(memo_id).await?.user_id)?;

    service.delete(memo_id).await?;
    Ok(Json(json!({ "message": "Memo deleted successfully" })))
}
