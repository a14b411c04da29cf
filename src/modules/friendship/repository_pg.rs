use uuid::Uuid;

use crate::{
    api::error,
    modules::friendship::{
        model::{FriendRequestResponse, FriendRequestRow, FriendResponse},
        repository::{FriendRequestRepository, FriendshipRepo, FriendshipRepository},
        schema::{FriendshipEntity, FriendshipState},
    },
};

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendshipRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship =
            sqlx::query_as::<_, FriendshipEntity>("SELECT * FROM friendships WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(friendship)
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT *
            FROM friendships
            WHERE
                (requester_id = $1 AND requested_id = $2)
            OR (requester_id = $2 AND requested_id = $1)
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn find_requested_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
        SELECT
            u.id,
            u.first_name,
            u.last_name,
            u.first_name || ' ' || u.last_name AS full_name
        FROM friendships f
        JOIN users u ON u.id = f.requested_id
        WHERE f.requester_id = $1
          AND f.state = $2
        "#,
        )
        .bind(user_id)
        .bind(FriendshipState::Accepted)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn find_requesting_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
        SELECT
            u.id,
            u.first_name,
            u.last_name,
            u.first_name || ' ' || u.last_name AS full_name
        FROM friendships f
        JOIN users u ON u.id = f.requester_id
        WHERE f.requested_id = $1
          AND f.state = $2
        "#,
        )
        .bind(user_id)
        .bind(FriendshipState::Accepted)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn delete_accepted_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE state = $3
              AND (
                    (requester_id = $1 AND requested_id = $2)
                 OR (requester_id = $2 AND requested_id = $1)
              )
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .bind(FriendshipState::Accepted)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendshipRepositoryPg {
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT *
            FROM friendships
            WHERE state = $3
              AND (
                    (requester_id = $1 AND requested_id = $2)
                 OR (requester_id = $2 AND requested_id = $1)
              )
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .bind(FriendshipState::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn has_incoming_requests(&self, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM friendships WHERE requested_id = $1 AND state = $2)",
        )
        .bind(user_id)
        .bind(FriendshipState::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT
                f.id AS req_id,
                f.state,
                f.created_at,
                u.id AS user_id,
                u.first_name,
                u.last_name,
                u.first_name || ' ' || u.last_name AS full_name
            FROM friendships f
            JOIN users u
                ON f.requester_id = u.id
            WHERE f.requested_id = $1
              AND f.state = $2
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(FriendshipState::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_incoming(*user_id)).collect())
    }

    async fn find_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT
                f.id AS req_id,
                f.state,
                f.created_at,
                u.id AS user_id,
                u.first_name,
                u.last_name,
                u.first_name || ' ' || u.last_name AS full_name
            FROM friendships f
            JOIN users u
                ON f.requested_id = u.id
            WHERE f.requester_id = $1
              AND f.state = $2
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(FriendshipState::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_outgoing(*user_id)).collect())
    }

    async fn create_request(
        &self,
        requester_id: &Uuid,
        requested_id: &Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            INSERT INTO friendships (id, requester_id, requested_id, state)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(requested_id)
        .bind(FriendshipState::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn delete_pending(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE id = $1
              AND state = $3
              AND (requester_id = $2 OR requested_id = $2)
            "#,
        )
        .bind(request_id)
        .bind(user_id)
        .bind(FriendshipState::Pending)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for FriendshipRepositoryPg {
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, FriendshipEntity>(
            "SELECT * FROM friendships WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        let next_state = match request.accept_by(user_id) {
            Ok(state) => state,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };

        let accepted = sqlx::query_as::<_, FriendshipEntity>(
            "UPDATE friendships SET state = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(request_id)
        .bind(next_state)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(accepted)
    }
}
