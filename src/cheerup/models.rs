use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Cheerup {
    pub cheerup_id: i64,
    pub content: String,
    pub author: Option<String>,
}
