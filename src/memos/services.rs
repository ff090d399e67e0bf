use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{Memo, MemoCountResponse, MemoRequest};
use crate::common::{now_rfc3339, ApiError, Validator};

/// Memos a single user may keep at once
pub const MAX_MEMOS_PER_USER: i64 = 2;

const MEMO_COLUMNS: &str = "memo_id, user_id, title, content, category, created_at";

pub struct MemosService {
    db: SqlitePool,
}

impl MemosService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Memo>, ApiError> {
        sqlx::query_as::<_, Memo>(&format!(
            "SELECT {} FROM memo WHERE user_id = ? ORDER BY memo_id DESC",
            MEMO_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get(&self, memo_id: i64) -> Result<Memo, ApiError> {
        sqlx::query_as::<_, Memo>(&format!("SELECT {} FROM memo WHERE memo_id = ?", MEMO_COLUMNS))
            .bind(memo_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Memo not found".to_string()))
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<MemoCountResponse, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memo WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(MemoCountResponse {
            count,
            can_create: count < MAX_MEMOS_PER_USER,
            limit: MAX_MEMOS_PER_USER,
        })
    }

    /// Creates a memo unless the user already holds the maximum.
    ///
    /// The limit is checked inside the INSERT so concurrent requests cannot
    /// overshoot it.
    pub async fn create(&self, user_id: i64, request: MemoRequest) -> Result<Memo, ApiError> {
        request.validate(&request).into_result()?;

        let result = sqlx::query(
            r#"
            INSERT INTO memo (user_id, title, content, category, created_at)
            SELECT ?, ?, ?, ?, ?
            WHERE (SELECT COUNT(*) FROM memo WHERE user_id = ?) < ?
            "#,
        )
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.content)
        .bind(&request.category)
        .bind(now_rfc3339())
        .bind(user_id)
        .bind(MAX_MEMOS_PER_USER)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            warn!(user_id = user_id, "Memo limit reached");
            return Err(ApiError::BadRequest(format!(
                "a user can keep at most {} memos",
                MAX_MEMOS_PER_USER
            )));
        }

        let memo_id = result.last_insert_rowid();
        info!(user_id = user_id, memo_id = memo_id, "Memo created");

        self.get(memo_id).await
    }

    pub async fn update(&self, memo_id: i64, request: MemoRequest) -> Result<Memo, ApiError> {
        request.validate(&request).into_result()?;

        let result = sqlx::query(
            "UPDATE memo SET title = ?, content = ?, category = ? WHERE memo_id = ?",
        )
        .bind(request.title.trim())
        .bind(&request.content)
        .bind(&request.category)
        .bind(memo_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Memo not found".to_string()));
        }

        self.get(memo_id).await
    }

    pub async fn delete(&self, memo_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM memo WHERE memo_id = ?")
            .bind(memo_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Memo not found".to_string()));
        }

        Ok(())
    }
}
