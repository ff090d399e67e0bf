use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;

/// Name shown when a post's author row cannot be found
pub const UNKNOWN_AUTHOR: &str = "unknown";

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPost {
    pub post_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub workout_category: Option<String>,
    pub image_url: Option<String>,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A post joined with its author's nickname and the viewer's like state
#[derive(FromRow, Debug)]
pub struct PostRow {
    #[sqlx(flatten)]
    pub post: WorkoutPost,
    pub author_name: Option<String>,
    pub liked_by_user: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPostRequest {
    pub title: String,
    pub content: String,
    pub workout_category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPostResponse {
    pub workout_post: WorkoutPost,
    pub author_name: String,
    pub liked_by_user: bool,
}

impl From<PostRow> for WorkoutPostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            workout_post: row.post,
            author_name: row
                .author_name
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            liked_by_user: row.liked_by_user,
        }
    }
}

/// Cursor page of posts for infinite scrolling
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPostPage {
    pub posts: Vec<WorkoutPostResponse>,
    pub has_next: bool,
    /// Cursor for the next request; echoes the request cursor on an empty page
    pub last_post_id: Option<i64>,
    pub total_items: usize,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub last_post_id: Option<i64>,
    pub size: Option<i64>,
    pub category: Option<String>,
}

impl PageQuery {
    pub fn page_size(&self) -> i64 {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Blank categories are treated as no filter
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostLike {
    pub like_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostLikeRequest {
    pub post_id: i64,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostLikeResponse {
    pub success: bool,
    pub like_count: i64,
    pub is_liked: bool,
}
