use sqlx::SqlitePool;
use tracing::info;

use super::models::{
    CreateStudyRecordRequest, CreateWorkoutRecordRequest, StudyRecord, WorkoutRecord,
};
use crate::common::{now_rfc3339, ApiError, Validator};

const STUDY_COLUMNS: &str =
    "record_id, user_id, subject, duration, start_time, end_time, memo, created_at";

const WORKOUT_COLUMNS: &str =
    "record_id, user_id, workout_type, duration, calories, workout_date, memo, created_at";

pub struct StudyRecordsService {
    db: SqlitePool,
}

impl StudyRecordsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: CreateStudyRecordRequest,
    ) -> Result<StudyRecord, ApiError> {
        request.validate(&request).into_result()?;

        let result = sqlx::query(
            r#"
            INSERT INTO study_record (user_id, subject, duration, start_time, end_time, memo, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(request.subject.trim())
        .bind(request.duration)
        .bind(&request.start_time)
        .bind(&request.end_time)
        .bind(&request.memo)
        .bind(now_rfc3339())
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let record_id = result.last_insert_rowid();
        info!(user_id = user_id, record_id = record_id, "Study record created");

        self.get(record_id).await
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<StudyRecord>, ApiError> {
        sqlx::query_as::<_, StudyRecord>(&format!(
            "SELECT {} FROM study_record WHERE user_id = ? ORDER BY record_id DESC",
            STUDY_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get(&self, record_id: i64) -> Result<StudyRecord, ApiError> {
        sqlx::query_as::<_, StudyRecord>(&format!(
            "SELECT {} FROM study_record WHERE record_id = ?",
            STUDY_COLUMNS
        ))
        .bind(record_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Study record not found".to_string()))
    }

    pub async fn delete(&self, record_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM study_record WHERE record_id = ?")
            .bind(record_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Study record not found".to_string()));
        }

        Ok(())
    }
}

pub struct WorkoutRecordsService {
    db: SqlitePool,
}

impl WorkoutRecordsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: CreateWorkoutRecordRequest,
    ) -> Result<WorkoutRecord, ApiError> {
        request.validate(&request).into_result()?;

        let result = sqlx::query(
            r#"
            INSERT INTO workout_record (user_id, workout_type, duration, calories, workout_date, memo, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(request.workout_type.trim())
        .bind(request.duration)
        .bind(request.calories)
        .bind(&request.workout_date)
        .bind(&request.memo)
        .bind(now_rfc3339())
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let record_id = result.last_insert_rowid();
        info!(user_id = user_id, record_id = record_id, "Workout record created");

        self.get(record_id).await
    }

    /// The user's workouts, most recent workout date first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, ApiError> {
        sqlx::query_as::<_, WorkoutRecord>(&format!(
            "SELECT {} FROM workout_record WHERE user_id = ? ORDER BY workout_date DESC, record_id DESC",
            WORKOUT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get(&self, record_id: i64) -> Result<WorkoutRecord, ApiError> {
        sqlx::query_as::<_, WorkoutRecord>(&format!(
            "SELECT {} FROM workout_record WHERE record_id = ?",
            WORKOUT_COLUMNS
        ))
        .bind(record_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Workout record not found".to_string()))
    }

    pub async fn delete(&self, record_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM workout_record WHERE record_id = ?")
            .bind(record_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Workout record not found".to_string()));
        }

        Ok(())
    }
}
