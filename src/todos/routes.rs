use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

/// Creates the todo list router
pub fn todos_routes() -> Router {
    Router::new()
        .route("/api/todo/save", post(handlers::create_todo))
        .route("/api/todo/detail/:todo_id", get(handlers::get_todo))
        .route("/api/todo/status/:todo_id", put(handlers::update_todo_status))
        // GET takes a user id, DELETE a todo id
        .route(
            "/api/todo/:id",
            get(handlers::list_todos).delete(handlers::delete_todo),
        )
}
