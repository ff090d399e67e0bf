//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use super::identity::resolve_current_user;
use super::models::{User, DEFAULT_ROLE};
use super::principal::Principal;
use super::store::UserStore;
use crate::common::{ApiError, AppState};

/// Principal established by the authentication filter
///
/// Rejects with 401 when the request is anonymous. Use
/// `Option<CurrentPrincipal>` on routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| {
                warn!(path = %parts.uri.path(), "Authentication required");
                ApiError::Unauthorized("authentication required".to_string())
            })
    }
}

/// Authenticated caller resolved to a stored account.
///
/// Requires the `ROLE_USER` authority.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub principal: Principal,
}

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.user.user_id
    }

    /// Fails with 403 unless the caller owns a record belonging to `owner_id`.
    pub fn ensure_owner(&self, owner_id: i64) -> Result<(), ApiError> {
        if self.user.user_id == owner_id {
            Ok(())
        } else {
            warn!(
                user_id = self.user.user_id,
                owner_id = owner_id,
                "Access to another user's data denied"
            );
            Err(ApiError::Forbidden("access denied".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(parts, state).await?;

        if !principal.has_authority(DEFAULT_ROLE) {
            warn!(path = %parts.uri.path(), "Principal lacks ROLE_USER");
            return Err(ApiError::Forbidden("insufficient authority".to_string()));
        }

        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let db = state_lock.read().await.db.clone();
        let user = resolve_current_user(&UserStore::new(db), &principal).await?;

        Ok(CurrentUser { user, principal })
    }
}
