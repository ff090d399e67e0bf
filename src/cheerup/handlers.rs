use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::services::CheerupService;
use crate::common::{ApiError, AppState};

/// GET /api/cheerup/random
pub async fn random_cheerup(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let service = CheerupService::new(state.read().await.db.clone());
    Ok(Json(service.random().await?))
}
