use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub memo_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: String,
}

/// Body of both create and update
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemoRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoCountResponse {
    pub count: i64,
    pub can_create: bool,
    pub limit: i64,
}
