use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;

/// Creates the workout post and like router
pub fn posts_routes() -> Router {
    Router::new()
        // Posts
        .route("/api/workoutpost/save", post(handlers::create_post))
        .route("/api/workoutpost/list", get(handlers::list_posts))
        .route("/api/workoutpost/popular", get(handlers::list_popular_posts))
        .route("/api/workoutpost/user/:user_id", get(handlers::list_user_posts))
        .route("/api/workoutpost/detail/:post_id", get(handlers::get_post))
        .route("/api/workoutpost/update/:post_id", put(handlers::update_post))
        .route("/api/workoutpost/:post_id", delete(handlers::delete_post))
        // Likes
        .route("/api/post-likes", post(handlers::toggle_like))
        .route("/api/post-likes/status/:post_id", get(handlers::like_status))
        .route("/api/post-likes/users/:post_id", get(handlers::liked_users))
}
