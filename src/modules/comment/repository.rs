use uuid::Uuid;

use crate::{
    api::error,
    modules::comment::{
        model::{CommentResponse, InsertComment},
        schema::CommentEntity,
    },
};

#[async_trait::async_trait]
pub trait CommentRepository {
    async fn create(&self, comment: &InsertComment) -> Result<CommentEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CommentEntity>, error::SystemError>;

    /// Oldest first.
    async fn find_by_post(&self, post_id: &Uuid)
    -> Result<Vec<CommentResponse>, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
