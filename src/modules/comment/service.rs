use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        comment::{
            model::{CommentResponse, CreateCommentModel, InsertComment},
            repository::CommentRepository,
            schema::CommentEntity,
        },
        post::repository::PostRepository,
    },
};

#[derive(Clone)]
pub struct CommentService<C, P>
where
    C: CommentRepository + Send + Sync,
    P: PostRepository + Send + Sync,
{
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository + Send + Sync,
    P: PostRepository + Send + Sync,
{
    pub fn with_dependencies(comment_repo: Arc<C>, post_repo: Arc<P>) -> Self {
        CommentService { comment_repo, post_repo }
    }

    async fn ensure_post(&self, post_id: &Uuid) -> Result<(), error::SystemError> {
        match self.post_repo.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found("Post not found")),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        comment: CreateCommentModel,
    ) -> Result<CommentEntity, error::SystemError> {
        self.ensure_post(&post_id).await?;
        self.comment_repo
            .create(&InsertComment { user_id, post_id, content: comment.content })
            .await
    }

    pub async fn list(&self, post_id: Uuid) -> Result<Vec<CommentResponse>, error::SystemError> {
        self.ensure_post(&post_id).await?;
        self.comment_repo.find_by_post(&post_id).await
    }

    pub async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), error::SystemError> {
        let comment = self
            .comment_repo
            .find_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        if comment.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only delete your own comments"));
        }

        self.comment_repo.delete(&comment_id).await?;
        Ok(())
    }
}
