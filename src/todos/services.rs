use sqlx::SqlitePool;
use tracing::info;

use super::models::{CreateTodoRequest, Todo};
use crate::common::{now_rfc3339, ApiError, Validator};

const TODO_COLUMNS: &str = "todo_id, user_id, content, is_completed, completed_at, created_at";

pub struct TodosService {
    db: SqlitePool,
}

impl TodosService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i64, request: CreateTodoRequest) -> Result<Todo, ApiError> {
        request.validate(&request).into_result()?;

        let now = now_rfc3339();
        let completed_at = request.is_completed.then(|| now.clone());

        let result = sqlx::query(
            r#"
            INSERT INTO todolist (user_id, content, is_completed, completed_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(request.content.trim())
        .bind(request.is_completed)
        .bind(&completed_at)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let todo_id = result.last_insert_rowid();
        info!(user_id = user_id, todo_id = todo_id, "Todo created");

        self.get(todo_id).await
    }

    /// The user's todos, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Todo>, ApiError> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todolist WHERE user_id = ? ORDER BY todo_id DESC",
            TODO_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get(&self, todo_id: i64) -> Result<Todo, ApiError> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todolist WHERE todo_id = ?",
            TODO_COLUMNS
        ))
        .bind(todo_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
    }

    /// Marks a todo done or open; `completed_at` tracks the transition.
    pub async fn set_status(&self, todo_id: i64, is_completed: bool) -> Result<Todo, ApiError> {
        let completed_at = is_completed.then(now_rfc3339);

        let result = sqlx::query(
            "UPDATE todolist SET is_completed = ?, completed_at = ? WHERE todo_id = ?",
        )
        .bind(is_completed)
        .bind(&completed_at)
        .bind(todo_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Todo not found".to_string()));
        }

        self.get(todo_id).await
    }

    pub async fn delete(&self, todo_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM todolist WHERE todo_id = ?")
            .bind(todo_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Todo not found".to_string()));
        }

        info!(todo_id = todo_id, "Todo deleted");
        Ok(())
    }
}
