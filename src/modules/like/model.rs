use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikeSummary {
    pub post_id: Uuid,
    pub liked: bool,
    pub like_count: i64,
}
