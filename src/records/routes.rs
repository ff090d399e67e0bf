use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the study and workout record router
pub fn records_routes() -> Router {
    Router::new()
        // Study records
        .route("/api/studyrecord/save", post(handlers::create_study_record))
        .route(
            "/api/studyrecord/detail/:record_id",
            get(handlers::get_study_record),
        )
        .route(
            "/api/studyrecord/:id",
            get(handlers::list_study_records).delete(handlers::delete_study_record),
        )
        // Workout records
        .route(
            "/api/workoutrecord/save",
            post(handlers::create_workout_record),
        )
        .route(
            "/api/workoutrecord/detail/:record_id",
            get(handlers::get_workout_record),
        )
        .route(
            "/api/workoutrecord/:id",
            get(handlers::list_workout_records).delete(handlers::delete_workout_record),
        )
}
