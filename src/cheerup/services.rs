use sqlx::SqlitePool;

use super::models::Cheerup;
use crate::common::ApiError;

pub struct CheerupService {
    db: SqlitePool,
}

impl CheerupService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn random(&self) -> Result<Cheerup, ApiError> {
        sqlx::query_as::<_, Cheerup>(
            "SELECT cheerup_id, content, author FROM cheerup ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("No cheer-up messages available".to_string()))
    }
}
