use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub todo_id: i64,
    pub user_id: i64,
    pub content: String,
    pub is_completed: bool,
    pub completed_at: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoStatusRequest {
    pub is_completed: bool,
}
