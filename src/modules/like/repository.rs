use uuid::Uuid;

use crate::{api::error, modules::like::schema::LikeEntity};

#[async_trait::async_trait]
pub trait LikeRepository {
    /// Fails with a conflict when the user already liked the post.
    async fn create(&self, user_id: &Uuid, post_id: &Uuid) -> Result<LikeEntity, error::SystemError>;

    async fn delete(&self, user_id: &Uuid, post_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError>;
}
