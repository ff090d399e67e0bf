// src/health.rs
//! Connectivity probe

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// GET /api/test
pub async fn connection_test() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "mindset backend is reachable"
    }))
}

pub fn health_routes() -> Router {
    Router::new().route("/api/test", get(connection_test))
}
