// src/app.rs
//! Router composition shared by the binary and the router-level tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::common::AppState;
use crate::{auth, cheerup, health, logging_middleware, memos, posts, records, todos, users};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn build_router(app_state: AppState) -> Router {
    let tokens = app_state.tokens.clone();
    let cors = cors_layer(&app_state.config.cors_origins);
    let shared = Arc::new(RwLock::new(app_state));

    Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES (local and social login)
        // ====================================================================
        .merge(auth::auth_routes())
        .merge(users::users_routes())
        // ====================================================================
        // PERSONAL PRODUCTIVITY (todos, memos, study and workout records)
        // ====================================================================
        .merge(todos::todos_routes())
        .merge(memos::memos_routes())
        .merge(records::records_routes())
        // ====================================================================
        // COMMUNITY (workout posts, likes, cheer-up quotes)
        // ====================================================================
        .merge(posts::posts_routes())
        .merge(cheerup::cheerup_routes())
        .merge(health::health_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(middleware::from_fn(auth::jwt_request_filter))
        .layer(Extension(tokens))
        .layer(Extension(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
