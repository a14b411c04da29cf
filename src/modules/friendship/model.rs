use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::{friendship::schema::FriendshipState, user::schema::UserEntity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FriendResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<UserEntity> for FriendResponse {
    fn from(user: UserEntity) -> Self {
        FriendResponse {
            full_name: user.full_name(),
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrInfo {
    Id(Uuid),
    Info(FriendResponse),
}

/// A friendship edge joined with the profile of the user on the other end.
#[derive(Debug, Clone, FromRow)]
pub struct FriendRequestRow {
    pub req_id: Uuid,
    pub state: FriendshipState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl FriendRequestRow {
    fn other(&self) -> FriendResponse {
        FriendResponse {
            id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: self.full_name.clone(),
        }
    }

    /// `user_id` is the requested party, the row carries the requester.
    pub fn into_incoming(self, user_id: Uuid) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.req_id,
            requester: IdOrInfo::Info(self.other()),
            requested: IdOrInfo::Id(user_id),
            state: self.state,
            accepted: self.state.is_accepted(),
            created_at: self.created_at,
        }
    }

    /// `user_id` is the requester, the row carries the requested party.
    pub fn into_outgoing(self, user_id: Uuid) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.req_id,
            requester: IdOrInfo::Id(user_id),
            requested: IdOrInfo::Info(self.other()),
            state: self.state,
            accepted: self.state.is_accepted(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub requester: IdOrInfo,
    pub requested: IdOrInfo,
    pub state: FriendshipState,
    pub accepted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FriendRequestBody {
    pub requested_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    Outgoing,
    Incoming,
}

/// Everything a profile page needs to render the friend button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendshipStatus {
    pub is_friend: bool,
    pub pending: bool,
    pub request_id: Option<Uuid>,
    pub direction: Option<RequestDirection>,
}
