use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{InsertPost, PostDetail},
        schema::PostEntity,
    },
};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError>;

    async fn find_detail(&self, id: &Uuid) -> Result<Option<PostDetail>, error::SystemError>;

    /// Newest first, strictly older than `before` when given.
    async fn find_by_user(
        &self,
        user_id: &Uuid,
        before: Option<chrono::DateTime<chrono::Utc>>,
        limit: i64,
    ) -> Result<Vec<PostDetail>, error::SystemError>;

    /// Comments and likes on the post go with it.
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
