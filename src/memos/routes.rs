use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

/// Creates the memos router
pub fn memos_routes() -> Router {
    Router::new()
        .route("/api/memo/save", post(handlers::create_memo))
        .route("/api/memo/detail/:memo_id", get(handlers::get_memo))
        .route("/api/memo/count/:user_id", get(handlers::count_memos))
        .route("/api/memo/update/:memo_id", put(handlers::update_memo))
        // GET takes a user id, DELETE a memo id
        .route(
            "/api/memo/:id",
            get(handlers::list_memos).delete(handlers::delete_memo),
        )
}
