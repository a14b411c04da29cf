use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::EMAIL_REGEX;
use crate::utils::not_blank;
use crate::modules::user::schema::UserEntity;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(regex(path = *EMAIL_REGEX, message = "Email is invalid"))]
    pub email: String,
    #[validate(
        length(min = 7, max = 40, message = "Password must be between 7 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub password: String,
    #[validate(
        length(min = 2, max = 40, message = "First name must be between 2 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 40, message = "Last name must be between 2 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInModel {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserModel {
    #[validate(regex(path = *EMAIL_REGEX, message = "Email is invalid"))]
    pub email: Option<String>,
    #[validate(
        length(min = 7, max = 40, message = "Password must be between 7 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub password: Option<String>,
    #[validate(
        length(min = 2, max = 40, message = "First name must be between 2 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub first_name: Option<String>,
    #[validate(
        length(min = 2, max = 40, message = "Last name must be between 2 and 40 characters long"),
        custom(function = "not_blank")
    )]
    pub last_name: Option<String>,
}

impl UpdateUserModel {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

pub struct InsertUser {
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub hash_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub id: uuid::Uuid,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub access_token: String,
}

/// Access and refresh token issued together on sign-in and refresh.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the refresh token expires, used as the cookie max-age.
    pub refresh_max_age: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub sign_in_count: i32,
    pub last_sign_in_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            full_name: entity.full_name(),
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            sign_in_count: entity.sign_in_count,
            last_sign_in_at: entity.last_sign_in_at,
            created_at: entity.created_at,
        }
    }
}
