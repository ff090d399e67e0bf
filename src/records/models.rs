use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    pub record_id: i64,
    pub user_id: i64,
    pub subject: String,
    /// Minutes
    pub duration: i64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub memo: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyRecordRequest {
    pub subject: String,
    pub duration: i64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub memo: Option<String>,
}

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub record_id: i64,
    pub user_id: i64,
    pub workout_type: String,
    /// Minutes
    pub duration: i64,
    pub calories: i64,
    pub workout_date: String,
    pub memo: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRecordRequest {
    pub workout_type: String,
    pub duration: i64,
    pub calories: i64,
    pub workout_date: String,
    pub memo: Option<String>,
}
