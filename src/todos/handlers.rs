use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{CreateTodoRequest, UpdateTodoStatusRequest};
use super::services::TodosService;
use crate::auth::CurrentUser;
use crate::common::{ApiError, AppState};

async fn service(state: &Arc<RwLock<AppState>>) -> TodosService {
    TodosService::new(state.read().await.db.clone())
}

/// POST /api/todo/save
pub async fn create_todo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = service(&state).await.create(current.id(), request).await?;
    Ok(Json(todo))
}

/// GET /api/todo/:user_id
pub async fn list_todos(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    current.ensure_owner(user_id)?;
    let todos = service(&state).await.list_for_user(user_id).await?;
    Ok(Json(todos))
}

/// GET /api/todo/detail/:todo_id
pub async fn get_todo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(todo_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = service(&state).await.get(todo_id).await?;
    current.ensure_owner(todo.user_id)?;
    Ok(Json(todo))
}

/// PUT /api/todo/status/:todo_id
pub async fn update_todo_status(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(todo_id): Path<i64>,
    Json(request): Json<UpdateTodoStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = service(&state).await;
    current.ensure_owner(service.get(todo_id).await?.user_id)?;

    let todo = service.set_status(todo_id, request.is_completed).await?;
    Ok(Json(todo))
}

/// DELETE /api/todo/:todo_id
pub async fn delete_todo(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(todo_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = service(&state).await;
    current.ensure_owner(service.get(todo_id).await?.user_id)?;

    service.delete(todo_id).await?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
