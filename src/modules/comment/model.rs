use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentModel {
    #[validate(
        length(max = 250, message = "Comment can be at most 250 characters long"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

pub struct InsertComment {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
