use axum::{
    extract::{Extension, Path, Query},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{PageQuery, PostLikeRequest, WorkoutPostRequest};
use super::services::{LikesService, PostsService};
use crate::auth::identity::resolve_current_user;
use crate::auth::{CurrentPrincipal, CurrentUser, UserStore};
use crate::common::{ApiError, AppState};

async fn db(state: &Arc<RwLock<AppState>>) -> sqlx::SqlitePool {
    state.read().await.db.clone()
}

/// Account id of an optional caller. Anonymous callers and tokens whose
/// account is gone both browse as anonymous.
async fn viewer_id(state: &Arc<RwLock<AppState>>, caller: Option<CurrentPrincipal>) -> Option<i64> {
    let CurrentPrincipal(principal) = caller?;
    let store = UserStore::new(db(state).await);

    resolve_current_user(&store, &principal)
        .await
        .ok()
        .map(|user| user.user_id)
}

// ============================================================================
// Workout Post Handlers
// ============================================================================

/// POST /api/workoutpost/save
pub async fn create_post(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<WorkoutPostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PostsService::new(db(&state).await);
    Ok(Json(service.create(current.id(), request).await?))
}

/// GET /api/workoutpost/list
pub async fn list_posts(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    caller: Option<CurrentPrincipal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = viewer_id(&state, caller).await;
    let service = PostsService::new(db(&state).await);

    Ok(Json(service.list_latest(&query, viewer).await?))
}

/// GET /api/workoutpost/popular
pub async fn list_popular_posts(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    caller: Option<CurrentPrincipal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = viewer_id(&state, caller).await;
    let service = PostsService::new(db(&state).await);

    Ok(Json(service.list_popular(&query, viewer).await?))
}

/// GET /api/workoutpost/user/:user_id
pub async fn list_user_posts(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PostsService::new(db(&state).await);
    Ok(Json(
        service
            .list_by_user(user_id, &query, Some(current.id()))
            .await?,
    ))
}

/// GET /api/workoutpost/detail/:post_id
pub async fn get_post(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    caller: Option<CurrentPrincipal>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = viewer_id(&state, caller).await;
    let service = PostsService::new(db(&state).await);

    Ok(Json(service.view(post_id, viewer).await?))
}

/// PUT /api/workoutpost/update/:post_id
pub async fn update_post(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(post_id): Path<i64>,
    Json(request): Json<WorkoutPostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PostsService::new(db(&state).await);
    current.ensure_owner(service.get_post(post_id).await?.user_id)?;

    Ok(Json(service.update(post_id, current.id(), request).await?))
}

/// DELETE /api/workoutpost/:post_id
pub async fn delete_post(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PostsService::new(db(&state).await);
    current.ensure_owner(service.get_post(post_id).await?.user_id)?;

    service.delete(post_id).await?;
    Ok(Json(json!({ "message": "Post deleted successfully" })))
}

// ============================================================================
// Like Handlers
// ============================================================================

/// POST /api/post-likes
pub async fn toggle_like(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<PostLikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = LikesService::new(db(&state).await);
    Ok(Json(service.toggle(request.post_id, current.id()).await?))
}

/// GET /api/post-likes/status/:post_id
pub async fn like_status(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = LikesService::new(db(&state).await);
    Ok(Json(service.status(post_id, current.id()).await?))
}

/// GET /api/post-likes/users/:post_id
pub async fn liked_users(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _current: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = LikesService::new(db(&state).await);
    Ok(Json(service.liked_users(post_id).await?))
}
