use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::ProfileUpdateRequest;
use crate::auth::{CurrentUser, UserProfile, UserStore};
use crate::common::{ApiError, AppState, Validator};

/// GET /api/users/me - Current user, password scrubbed
pub async fn get_me(current: CurrentUser) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(current.user.into()))
}

/// PUT /api/users/me - Update own profile
pub async fn update_me(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    request.validate(&request).into_result()?;

    let store = UserStore::new(state.read().await.db.clone());
    let user = store.update_profile(current.id(), request.into()).await?;

    info!(user_id = user.user_id, "Profile updated");
    Ok(Json(user.into()))
}

/// DELETE /api/users/me - Delete own account and everything it owns
pub async fn delete_me(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let store = UserStore::new(state.read().await.db.clone());
    store.delete(current.id()).await?;

    Ok(Json(json!({
        "message": "Account deleted successfully"
    })))
}
