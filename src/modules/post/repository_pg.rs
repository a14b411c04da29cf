use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{InsertPost, PostDetail},
        repository::PostRepository,
        schema::PostEntity,
    },
};

const POST_DETAIL_SELECT: &str = r#"
    SELECT
        p.id,
        p.user_id,
        u.first_name || ' ' || u.last_name AS author_name,
        p.content,
        (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
        p.created_at
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let post = sqlx::query_as::<_, PostEntity>(
            "INSERT INTO posts (id, user_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(post.user_id)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_detail(&self, id: &Uuid) -> Result<Option<PostDetail>, error::SystemError> {
        let post = sqlx::query_as::<_, PostDetail>(&format!("{POST_DETAIL_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
        before: Option<chrono::DateTime<chrono::Utc>>,
        limit: i64,
    ) -> Result<Vec<PostDetail>, error::SystemError> {
        let posts = sqlx::query_as::<_, PostDetail>(&format!(
            r#"{POST_DETAIL_SELECT}
            WHERE p.user_id = $1
              AND ($2::timestamptz IS NULL OR p.created_at < $2)
            ORDER BY p.created_at DESC
            LIMIT $3"#
        ))
        .bind(user_id)
        .bind(before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM likes WHERE post_id = $1").bind(id).execute(&mut *tx).await?;
        sqlx::query("DELETE FROM comments WHERE post_id = $1").bind(id).execute(&mut *tx).await?;
        let rows = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(rows > 0)
    }
}
