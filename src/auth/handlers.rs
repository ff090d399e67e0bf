//! Authentication handlers

use axum::{
    extract::{Extension, Json, Path, Query},
    response::Redirect,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::CurrentPrincipal;
use super::models::{AuthResponse, LoginRequest, OAuthCallbackParams, SignupRequest, UserProfile};
use super::oauth2::{success_redirect_url, Provider};
use super::services::AuthService;
use super::store::UserStore;
use crate::common::{ApiError, AppState};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(UserStore::new(state.db.clone()), state.tokens.clone())
}

/// POST /api/auth/signup
/// Registers a local account
///
/// # Response
/// The created user without its password
pub async fn signup(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let state = state_lock.read().await.clone();
    let user = auth_service(&state).signup(payload).await?;

    info!(user_id = user.user_id, "Signup successful");
    Ok(Json(user.into()))
}

/// POST /api/auth/login
///
/// # Response
/// ```json
/// { "token": "<jwt>", "userId": 1, "email": "...", "nickname": "...",
///   "profileImage": null, "role": "ROLE_USER" }
/// ```
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let response = auth_service(&state).login(payload).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
/// Tokens are not revoked server-side; the client discards its copy.
pub async fn logout(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!(provider = ?principal.provider(), "User logout acknowledged");
    Ok(Json(serde_json::json!({
        "message": "Logout successful"
    })))
}

/// GET /oauth2/authorization/:provider
/// Redirects the browser to the provider's consent page
pub async fn oauth2_authorize(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(provider): Path<String>,
) -> Result<Redirect, ApiError> {
    let provider: Provider = provider.parse()?;
    let oauth = state_lock.read().await.oauth.clone();

    let url = oauth.authorization_url(provider).await?;

    info!(provider = %provider, "Starting OAuth2 authorization");
    Ok(Redirect::to(&url))
}

/// GET /login/oauth2/code/:provider
/// Provider callback; ends with a redirect to the front end carrying the token
pub async fn oauth2_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<Redirect, ApiError> {
    let provider: Provider = provider.parse()?;
    let state = state_lock.read().await.clone();

    if let Some(error) = params.error.as_deref() {
        warn!(
            provider = %provider,
            oauth_error = %error,
            description = ?params.error_description,
            "Provider returned an authorization error"
        );
        return Err(ApiError::Unauthorized("social login was not authorized".to_string()));
    }

    let (code, oauth_state) = match (params.code.as_deref(), params.state.as_deref()) {
        (Some(code), Some(oauth_state)) if !code.is_empty() => (code, oauth_state),
        _ => {
            warn!(provider = %provider, "OAuth2 callback without code or state");
            return Err(ApiError::Unauthorized("social login failed".to_string()));
        }
    };

    let (user, token) = auth_service(&state)
        .oauth_login(&state.oauth, provider, code, oauth_state)
        .await?;

    let target = success_redirect_url(&state.config.oauth2_success_redirect, &token, &user);
    Ok(Redirect::to(&target))
}
