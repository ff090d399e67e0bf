//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/signup` - Local account registration
/// - `POST /api/auth/login` - Email/password login
/// - `POST /api/auth/logout` - Logout (client-side token removal)
/// - `GET /oauth2/authorization/:provider` - Start social login
/// - `GET /login/oauth2/code/:provider` - Social login callback
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route(
            "/oauth2/authorization/:provider",
            get(handlers::oauth2_authorize),
        )
        .route("/login/oauth2/code/:provider", get(handlers::oauth2_callback))
}
