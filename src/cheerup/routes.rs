use axum::{routing::get, Router};

use super::handlers;

pub fn cheerup_routes() -> Router {
    Router::new().route("/api/cheerup/random", get(handlers::random_cheerup))
}
