use uuid::Uuid;

use crate::{
    api::error, modules::user::model::InsertUser, modules::user::model::UpdateUser,
    modules::user::schema::UserEntity,
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    /// Case-insensitive lookup against the normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn update(&self, id: &Uuid, user: &UpdateUser) -> Result<UserEntity, error::SystemError>;

    /// Rolls `current_sign_in_at` into `last_sign_in_at` and bumps the counter.
    async fn record_sign_in(&self, id: &Uuid) -> Result<(), error::SystemError>;

    /// Removes the user together with their posts, comments, likes and
    /// friendships in one transaction. Returns false when no such user exists.
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
