use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::api::error;

/// Lifecycle of a friendship edge. Deletion is terminal and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friendship_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipState {
    Pending,
    Accepted,
}

impl FriendshipState {
    pub fn is_accepted(self) -> bool {
        self == FriendshipState::Accepted
    }

    pub fn is_pending(self) -> bool {
        self == FriendshipState::Pending
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendshipEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requested_id: Uuid,
    pub state: FriendshipState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl FriendshipEntity {
    pub fn involves(&self, user_id: &Uuid) -> bool {
        self.requester_id == *user_id || self.requested_id == *user_id
    }

    pub fn connects(&self, user_a: &Uuid, user_b: &Uuid) -> bool {
        (self.requester_id == *user_a && self.requested_id == *user_b)
            || (self.requester_id == *user_b && self.requested_id == *user_a)
    }

    /// Pending -> Accepted, allowed only for the requested party.
    pub fn accept_by(&self, user_id: &Uuid) -> Result<FriendshipState, error::SystemError> {
        if self.requested_id != *user_id {
            return Err(error::SystemError::forbidden(
                "You are not allowed to accept this friend request",
            ));
        }
        match self.state {
            FriendshipState::Pending => Ok(FriendshipState::Accepted),
            FriendshipState::Accepted => {
                Err(error::SystemError::conflict("Friend request already accepted"))
            }
        }
    }
}
