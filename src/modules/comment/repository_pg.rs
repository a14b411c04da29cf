use uuid::Uuid;

use crate::{
    api::error,
    modules::comment::{
        model::{CommentResponse, InsertComment},
        repository::CommentRepository,
        schema::CommentEntity,
    },
};

#[derive(Clone)]
pub struct CommentRepositoryPg {
    pool: sqlx::PgPool,
}

impl CommentRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for CommentRepositoryPg {
    async fn create(&self, comment: &InsertComment) -> Result<CommentEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let comment = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (id, user_id, post_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn find_by_post(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<CommentResponse>, error::SystemError> {
        let comments = sqlx::query_as::<_, CommentResponse>(
            r#"
            SELECT
                c.id,
                c.post_id,
                c.user_id,
                u.first_name || ' ' || u.last_name AS author_name,
                c.content,
                c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
