use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friendship::{
            model::{FriendRequestResponse, FriendResponse, FriendshipStatus, RequestDirection},
            repository::FriendshipRepo,
            schema::FriendshipEntity,
        },
        user::repository::UserRepository,
    },
};

/// Answers friendship questions between two users without exposing the
/// direction in which the edge was stored.
#[derive(Clone)]
pub struct FriendshipService<R, U>
where
    R: FriendshipRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friendship_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendshipService<R, U>
where
    R: FriendshipRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friendship_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendshipService { friendship_repo, user_repo }
    }

    /// Accepted friends on both sides of the edge.
    pub async fn friends(&self, user_id: Uuid) -> Result<Vec<FriendResponse>, error::SystemError> {
        let (requested, requesting) = tokio::try_join!(
            self.friendship_repo.find_requested_friends(&user_id),
            self.friendship_repo.find_requesting_friends(&user_id),
        )?;

        let mut seen = HashSet::with_capacity(requested.len() + requesting.len());
        let mut all = Vec::with_capacity(requested.len() + requesting.len());
        for friend in requested.into_iter().chain(requesting) {
            if seen.insert(friend.id) {
                all.push(friend);
            }
        }
        Ok(all)
    }

    pub async fn is_friend(&self, user_id: Uuid, other_id: Uuid) -> Result<bool, error::SystemError> {
        let edge = self.friendship_repo.find_between(&user_id, &other_id).await?;
        Ok(edge.is_some_and(|e| e.state.is_accepted()))
    }

    pub async fn has_pending_request_between(
        &self,
        user_id_a: Uuid,
        user_id_b: Uuid,
    ) -> Result<bool, error::SystemError> {
        let request = self.friendship_repo.find_pending_between(&user_id_a, &user_id_b).await?;
        Ok(request.is_some())
    }

    pub async fn pending_request_id(
        &self,
        user_id_a: Uuid,
        user_id_b: Uuid,
    ) -> Result<Uuid, error::SystemError> {
        self.friendship_repo
            .find_pending_between(&user_id_a, &user_id_b)
            .await?
            .map(|request| request.id)
            .ok_or_else(|| {
                error::SystemError::not_found("No pending friend request between these users")
            })
    }

    pub async fn has_incoming_requests(&self, user_id: Uuid) -> Result<bool, error::SystemError> {
        self.friendship_repo.has_incoming_requests(&user_id).await
    }

    pub async fn incoming_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        self.friendship_repo.find_incoming_requests(&user_id).await
    }

    pub async fn outgoing_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        self.friendship_repo.find_outgoing_requests(&user_id).await
    }

    pub async fn status(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<FriendshipStatus, error::SystemError> {
        let edge = self.friendship_repo.find_between(&user_id, &other_id).await?;

        let status = match edge {
            Some(e) if e.state.is_accepted() => FriendshipStatus {
                is_friend: true,
                pending: false,
                request_id: None,
                direction: None,
            },
            Some(e) => FriendshipStatus {
                is_friend: false,
                pending: true,
                request_id: Some(e.id),
                direction: Some(if e.requester_id == user_id {
                    RequestDirection::Outgoing
                } else {
                    RequestDirection::Incoming
                }),
            },
            None => FriendshipStatus {
                is_friend: false,
                pending: false,
                request_id: None,
                direction: None,
            },
        };
        Ok(status)
    }

    pub async fn send_request(
        &self,
        requester_id: Uuid,
        requested_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if requester_id == requested_id {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        let (requested, existing) = tokio::try_join!(
            self.user_repo.find_by_id(&requested_id),
            self.friendship_repo.find_between(&requester_id, &requested_id),
        )?;

        if requested.is_none() {
            return Err(error::SystemError::not_found("Requested user not found"));
        }

        match existing {
            Some(e) if e.state.is_accepted() => {
                Err(error::SystemError::conflict("Users are already friends"))
            }
            Some(_) => Err(error::SystemError::conflict("Friend request already exists")),
            None => {
                let request =
                    self.friendship_repo.create_request(&requester_id, &requested_id).await?;
                log::info!("Friend request {} sent by {}", request.id, requester_id);
                Ok(request)
            }
        }
    }

    /// Accepts the request and returns the requester's profile.
    pub async fn accept_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendResponse, error::SystemError> {
        let friendship = self.friendship_repo.accept_request_atomic(&request_id, &user_id).await?;

        let requester = self
            .user_repo
            .find_by_id(&friendship.requester_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(FriendResponse::from(requester))
    }

    /// The requested party declines, or the requester withdraws. The delete
    /// itself checks the edge is still pending, so a concurrent accept wins.
    pub async fn decline_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if self.friendship_repo.delete_pending(&request_id, &user_id).await? {
            return Ok(());
        }

        match self.friendship_repo.find_by_id(&request_id).await? {
            Some(request) if request.state.is_pending() && !request.involves(&user_id) => {
                Err(error::SystemError::forbidden(
                    "You are not allowed to decline this friend request",
                ))
            }
            _ => Err(error::SystemError::not_found("Friend request not found")),
        }
    }

    pub async fn unfriend(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), error::SystemError> {
        if !self.friendship_repo.delete_accepted_between(&user_id, &friend_id).await? {
            return Err(error::SystemError::not_found("Users are not friends"));
        }
        Ok(())
    }
}
