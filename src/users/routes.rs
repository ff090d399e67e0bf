use axum::{routing::get, Router};

use super::handlers;

/// Creates the users router
pub fn users_routes() -> Router {
    Router::new().route(
        "/api/users/me",
        get(handlers::get_me)
            .put(handlers::update_me)
            .delete(handlers::delete_me),
    )
}
