use sqlx::SqlitePool;
use tracing::{debug, info};

use super::models::{
    PageQuery, PostLike, PostLikeResponse, PostRow, WorkoutPost, WorkoutPostPage,
    WorkoutPostRequest, WorkoutPostResponse,
};
use crate::common::{now_rfc3339, ApiError, Validator};

/// Post columns plus author nickname and whether the bound viewer liked it.
/// The first bind parameter is the viewer's user id (NULL for anonymous).
const POST_SELECT: &str = r#"
    SELECT p.post_id, p.user_id, p.title, p.content, p.workout_category, p.image_url,
           p.view_count, p.like_count, p.created_at, p.updated_at,
           u.nickname AS author_name,
           EXISTS (
               SELECT 1 FROM post_like l WHERE l.post_id = p.post_id AND l.user_id = ?
           ) AS liked_by_user
    FROM workout_post p
    LEFT JOIN users u ON u.user_id = p.user_id
"#;

fn not_found() -> ApiError {
    ApiError::NotFound("Post not found".to_string())
}

/// Trims a `size + 1` fetch down to one page and derives the next cursor.
pub fn into_page(mut rows: Vec<PostRow>, size: i64, cursor: Option<i64>) -> WorkoutPostPage {
    let size = size.max(0) as usize;
    let has_next = rows.len() > size;
    rows.truncate(size);

    let last_post_id = rows.last().map(|row| row.post.post_id).or(cursor);
    let posts: Vec<WorkoutPostResponse> = rows.into_iter().map(Into::into).collect();

    WorkoutPostPage {
        total_items: posts.len(),
        posts,
        has_next,
        last_post_id,
    }
}

pub struct PostsService {
    db: SqlitePool,
}

impl PostsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Bare post row, used for ownership checks
    pub async fn get_post(&self, post_id: i64) -> Result<WorkoutPost, ApiError> {
        sqlx::query_as::<_, WorkoutPost>(
            r#"
            SELECT post_id, user_id, title, content, workout_category, image_url,
                   view_count, like_count, created_at, updated_at
            FROM workout_post WHERE post_id = ?
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(not_found)
    }

    async fn find_row(
        &self,
        post_id: i64,
        viewer: Option<i64>,
    ) -> Result<WorkoutPostResponse, ApiError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{} WHERE p.post_id = ?", POST_SELECT))
            .bind(viewer)
            .bind(post_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(not_found)?;

        Ok(row.into())
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: WorkoutPostRequest,
    ) -> Result<WorkoutPostResponse, ApiError> {
        request.validate(&request).into_result()?;

        let now = now_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO workout_post
                (user_id, title, content, workout_category, image_url, view_count, like_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.content)
        .bind(&request.workout_category)
        .bind(&request.image_url)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let post_id = result.last_insert_rowid();
        info!(user_id = user_id, post_id = post_id, "Workout post created");

        self.find_row(post_id, Some(user_id)).await
    }

    /// Loads a post for display and counts the view.
    pub async fn view(
        &self,
        post_id: i64,
        viewer: Option<i64>,
    ) -> Result<WorkoutPostResponse, ApiError> {
        let result = sqlx::query("UPDATE workout_post SET view_count = view_count + 1 WHERE post_id = ?")
            .bind(post_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        self.find_row(post_id, viewer).await
    }

    /// Replaces title, content and category; a missing image keeps the stored one.
    pub async fn update(
        &self,
        post_id: i64,
        editor_id: i64,
        request: WorkoutPostRequest,
    ) -> Result<WorkoutPostResponse, ApiError> {
        request.validate(&request).into_result()?;

        let result = sqlx::query(
            r#"
            UPDATE workout_post
            SET title = ?, content = ?, workout_category = ?,
                image_url = COALESCE(?, image_url), updated_at = ?
            WHERE post_id = ?
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.content)
        .bind(&request.workout_category)
        .bind(&request.image_url)
        .bind(now_rfc3339())
        .bind(post_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        info!(post_id = post_id, "Workout post updated");
        self.find_row(post_id, Some(editor_id)).await
    }

    pub async fn delete(&self, post_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM workout_post WHERE post_id = ?")
            .bind(post_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        info!(post_id = post_id, "Workout post deleted");
        Ok(())
    }

    /// Newest first, optionally narrowed to one category
    pub async fn list_latest(
        &self,
        query: &PageQuery,
        viewer: Option<i64>,
    ) -> Result<WorkoutPostPage, ApiError> {
        let size = query.page_size();
        let category = query.category_filter();

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"{}
            WHERE (? IS NULL OR p.post_id < ?)
              AND (? IS NULL OR p.workout_category = ?)
            ORDER BY p.post_id DESC
            LIMIT ?"#,
            POST_SELECT
        ))
        .bind(viewer)
        .bind(query.last_post_id)
        .bind(query.last_post_id)
        .bind(category)
        .bind(category)
        .bind(size + 1)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        debug!(rows = rows.len(), size = size, "Fetched latest posts");
        Ok(into_page(rows, size, query.last_post_id))
    }

    /// Most liked first, ties broken by newest. The cursor is the last post
    /// id of the previous page; the page continues after that post's rank.
    pub async fn list_popular(
        &self,
        query: &PageQuery,
        viewer: Option<i64>,
    ) -> Result<WorkoutPostPage, ApiError> {
        let size = query.page_size();

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"{}
            WHERE ? IS NULL
               OR p.like_count < (SELECT like_count FROM workout_post WHERE post_id = ?)
               OR (p.like_count = (SELECT like_count FROM workout_post WHERE post_id = ?)
                   AND p.post_id < ?)
            ORDER BY p.like_count DESC, p.post_id DESC
            LIMIT ?"#,
            POST_SELECT
        ))
        .bind(viewer)
        .bind(query.last_post_id)
        .bind(query.last_post_id)
        .bind(query.last_post_id)
        .bind(query.last_post_id)
        .bind(size + 1)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(into_page(rows, size, query.last_post_id))
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        query: &PageQuery,
        viewer: Option<i64>,
    ) -> Result<WorkoutPostPage, ApiError> {
        let size = query.page_size();

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"{}
            WHERE p.user_id = ?
              AND (? IS NULL OR p.post_id < ?)
            ORDER BY p.post_id DESC
            LIMIT ?"#,
            POST_SELECT
        ))
        .bind(viewer)
        .bind(user_id)
        .bind(query.last_post_id)
        .bind(query.last_post_id)
        .bind(size + 1)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(into_page(rows, size, query.last_post_id))
    }
}

pub struct LikesService {
    db: SqlitePool,
}

impl LikesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn like_count(&self, post_id: i64) -> Result<i64, ApiError> {
        sqlx::query_scalar::<_, i64>("SELECT like_count FROM workout_post WHERE post_id = ?")
            .bind(post_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(not_found)
    }

    /// Adds the user's like, or removes it when present. The like row and
    /// the post's `like_count` change in one transaction.
    pub async fn toggle(&self, post_id: i64, user_id: i64) -> Result<PostLikeResponse, ApiError> {
        let mut tx = self.db.begin().await.map_err(ApiError::DatabaseError)?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT 1 FROM workout_post WHERE post_id = ?")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;
        if exists.is_none() {
            return Err(not_found());
        }

        let removed = sqlx::query("DELETE FROM post_like WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?
            .rows_affected();

        let is_liked = if removed > 0 {
            sqlx::query(
                "UPDATE workout_post SET like_count = MAX(like_count - 1, 0) WHERE post_id = ?",
            )
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;
            false
        } else {
            let inserted = sqlx::query(
                "INSERT OR IGNORE INTO post_like (post_id, user_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(post_id)
            .bind(user_id)
            .bind(now_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?
            .rows_affected();

            if inserted > 0 {
                sqlx::query("UPDATE workout_post SET like_count = like_count + 1 WHERE post_id = ?")
                    .bind(post_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(ApiError::DatabaseError)?;
            }
            true
        };

        let like_count =
            sqlx::query_scalar::<_, i64>("SELECT like_count FROM workout_post WHERE post_id = ?")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(ApiError::DatabaseError)?;

        tx.commit().await.map_err(ApiError::DatabaseError)?;

        info!(post_id = post_id, user_id = user_id, liked = is_liked, "Post like toggled");
        Ok(PostLikeResponse {
            success: true,
            like_count,
            is_liked,
        })
    }

    pub async fn status(&self, post_id: i64, user_id: i64) -> Result<PostLikeResponse, ApiError> {
        let like_count = self.like_count(post_id).await?;

        let is_liked = sqlx::query_scalar::<_, i64>(
            "SELECT 1 FROM post_like WHERE post_id = ? AND user_id = ?",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .is_some();

        Ok(PostLikeResponse {
            success: true,
            like_count,
            is_liked,
        })
    }

    /// Likes on a post, oldest first
    pub async fn liked_users(&self, post_id: i64) -> Result<Vec<PostLike>, ApiError> {
        self.like_count(post_id).await?;

        sqlx::query_as::<_, PostLike>(
            "SELECT like_id, post_id, user_id, created_at FROM post_like WHERE post_id = ? ORDER BY like_id",
        )
        .bind(post_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }
}
