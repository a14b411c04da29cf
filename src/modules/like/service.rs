use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        like::{model::LikeSummary, repository::LikeRepository},
        post::repository::PostRepository,
    },
};

#[derive(Clone)]
pub struct LikeService<L, P>
where
    L: LikeRepository + Send + Sync,
    P: PostRepository + Send + Sync,
{
    like_repo: Arc<L>,
    post_repo: Arc<P>,
}

impl<L, P> LikeService<L, P>
where
    L: LikeRepository + Send + Sync,
    P: PostRepository + Send + Sync,
{
    pub fn with_dependencies(like_repo: Arc<L>, post_repo: Arc<P>) -> Self {
        LikeService { like_repo, post_repo }
    }

    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeSummary, error::SystemError> {
        if self.post_repo.find_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        self.like_repo.create(&user_id, &post_id).await?;
        let like_count = self.like_repo.count_by_post(&post_id).await?;
        Ok(LikeSummary { post_id, liked: true, like_count })
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeSummary, error::SystemError> {
        if !self.like_repo.delete(&user_id, &post_id).await? {
            return Err(error::SystemError::not_found("Like not found"));
        }

        let like_count = self.like_repo.count_by_post(&post_id).await?;
        Ok(LikeSummary { post_id, liked: false, like_count })
    }
}
