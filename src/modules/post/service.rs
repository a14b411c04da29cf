use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    constants::DEFAULT_PAGE_SIZE,
    modules::post::{
        model::{CreatePostModel, InsertPost, PostDetail, PostPage, PostQuery},
        repository::PostRepository,
        schema::PostEntity,
    },
};

#[derive(Clone)]
pub struct PostService<P>
where
    P: PostRepository + Send + Sync,
{
    post_repo: Arc<P>,
}

impl<P> PostService<P>
where
    P: PostRepository + Send + Sync,
{
    pub fn with_dependencies(post_repo: Arc<P>) -> Self {
        PostService { post_repo }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        post: CreatePostModel,
    ) -> Result<PostEntity, error::SystemError> {
        self.post_repo.create(&InsertPost { user_id, content: post.content }).await
    }

    pub async fn get(&self, post_id: Uuid) -> Result<PostDetail, error::SystemError> {
        self.post_repo
            .find_detail(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        query: PostQuery,
    ) -> Result<PostPage, error::SystemError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let posts = self.post_repo.find_by_user(&user_id, query.before, limit).await?;

        let cursor = if posts.len() as i64 == limit {
            posts.last().map(|p| p.created_at)
        } else {
            None
        };
        Ok(PostPage { posts, cursor })
    }

    pub async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        if post.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only delete your own posts"));
        }

        self.post_repo.delete(&post_id).await?;
        Ok(())
    }
}
