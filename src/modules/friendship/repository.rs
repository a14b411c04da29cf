use uuid::Uuid;

use crate::api::error;
use crate::modules::friendship::model::{FriendRequestResponse, FriendResponse};
use crate::modules::friendship::schema::FriendshipEntity;

/// Accepted edges, read from either direction.
#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// The edge joining the pair, whichever direction and state it has.
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Users this user requested and who accepted.
    async fn find_requested_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError>;

    /// Users who requested this user and were accepted.
    async fn find_requesting_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError>;

    /// Deletes the accepted edge joining the pair. False when they are not friends.
    async fn delete_accepted_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

/// Pending edges.
#[async_trait::async_trait]
pub trait FriendRequestRepository {
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    async fn has_incoming_requests(&self, user_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn find_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    async fn find_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    async fn create_request(
        &self,
        requester_id: &Uuid,
        requested_id: &Uuid,
    ) -> Result<FriendshipEntity, error::SystemError>;

    /// Deletes the request only while it is still pending and `user_id` is
    /// one of its parties.
    async fn delete_pending(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendshipRepo: FriendshipRepository + FriendRequestRepository + Send + Sync {
    /// Locks the edge, applies the Pending -> Accepted transition for
    /// `user_id` and commits.
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FriendshipEntity, error::SystemError>;
}
