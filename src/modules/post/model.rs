use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostModel {
    #[validate(
        length(max = 1000, message = "Post can be at most 1000 characters long"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    pub before: Option<chrono::DateTime<chrono::Utc>>,
}

pub struct InsertPost {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub posts: Vec<PostDetail>,
    pub cursor: Option<chrono::DateTime<chrono::Utc>>,
}
