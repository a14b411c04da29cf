use uuid::Uuid;

use crate::{
    api::error,
    modules::like::{repository::LikeRepository, schema::LikeEntity},
};

#[derive(Clone)]
pub struct LikeRepositoryPg {
    pool: sqlx::PgPool,
}

impl LikeRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryPg {
    async fn create(&self, user_id: &Uuid, post_id: &Uuid) -> Result<LikeEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let like = sqlx::query_as::<_, LikeEntity>(
            "INSERT INTO likes (id, user_id, post_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(like)
    }

    async fn delete(&self, user_id: &Uuid, post_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
