use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::Cache;
use crate::constants::AuthConfig;
use crate::modules::user::model::{
    InsertUser, SignInModel, SignUpModel, TokenPair, UpdateUser, UpdateUserModel, UserResponse,
};
use crate::modules::user::repository::UserRepository;
use crate::utils::{hash_password, verify_password, Claims, TypeClaims};

#[derive(Clone)]
pub struct UserService<R, C>
where
    R: UserRepository + Send + Sync,
    C: Cache,
{
    repo: Arc<R>,
    cache: Arc<C>,
    config: Arc<AuthConfig>,
}

fn user_key(id: &Uuid) -> String {
    format!("user:{id}")
}

fn refresh_key(jti: &Uuid) -> String {
    format!("refresh_token:{jti}")
}

impl<R, C> UserService<R, C>
where
    R: UserRepository + Send + Sync,
    C: Cache,
{
    pub fn with_dependencies(repo: Arc<R>, cache: Arc<C>, config: Arc<AuthConfig>) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, cache, config }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let key = user_key(&id);
        if let Some(cached_user) = self.cache.get::<UserResponse>(&key).await? {
            info!("User {} found in cache", id);
            return Ok(cached_user);
        }
        let entity = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let user = UserResponse::from(entity);
        self.cache.set(&key, &user, self.config.user_cache_ttl).await?;
        info!("User {} cached", id);
        Ok(user)
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Uuid, error::SystemError> {
        let email = user.email.to_lowercase();

        // the unique index still decides under concurrent sign-ups
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(error::SystemError::email_taken());
        }

        let new_user = InsertUser {
            email,
            hash_password: hash_password(&user.password)?,
            first_name: user.first_name,
            last_name: user.last_name,
        };

        let created = self.repo.create(&new_user).await?;
        info!("User {} signed up", created.id);
        Ok(created.id)
    }

    pub async fn sign_in(&self, user: SignInModel) -> Result<TokenPair, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(&user.email.to_lowercase())
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid email or password"))?;

        if !verify_password(&user_entity.hash_password, &user.password)? {
            return Err(error::SystemError::unauthorized("Invalid email or password"));
        }

        self.repo.record_sign_in(&user_entity.id).await?;
        self.cache.delete(&user_key(&user_entity.id)).await?;

        self.issue_tokens(&user_entity.id).await
    }

    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
    ) -> Result<TokenPair, error::SystemError> {
        let claims = self.decode_refresh_token(refresh_token.as_deref())?;
        let jti = claims.jti.ok_or_else(|| error::SystemError::unauthorized("Invalid token"))?;

        let key = refresh_key(&jti);
        let owner = self.cache.get::<Uuid>(&key).await?;
        if owner != Some(claims.sub) {
            return Err(error::SystemError::unauthorized("Refresh token revoked"));
        }
        self.cache.delete(&key).await?;

        if self.repo.find_by_id(&claims.sub).await?.is_none() {
            return Err(error::SystemError::unauthorized("Invalid token"));
        }

        self.issue_tokens(&claims.sub).await
    }

    pub async fn sign_out(&self, refresh_token: Option<String>) -> Result<(), error::SystemError> {
        // an unreadable token has nothing left to revoke
        if let Ok(Claims { jti: Some(jti), .. }) =
            self.decode_refresh_token(refresh_token.as_deref())
        {
            self.cache.delete(&refresh_key(&jti)).await?;
        }
        Ok(())
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        user: UpdateUserModel,
    ) -> Result<UserResponse, error::SystemError> {
        if actor_id != id {
            return Err(error::SystemError::forbidden("You can only update your own account"));
        }
        if user.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let email = user.email.map(|e| e.to_lowercase());
        if let Some(email) = &email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(error::SystemError::email_taken());
                }
            }
        }

        let update_user = UpdateUser {
            email,
            hash_password: user.password.as_deref().map(hash_password).transpose()?,
            first_name: user.first_name,
            last_name: user.last_name,
        };

        let updated = self.repo.update(&id, &update_user).await?;
        self.cache.delete(&user_key(&id)).await?;
        Ok(UserResponse::from(updated))
    }

    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> Result<(), error::SystemError> {
        if actor_id != id {
            return Err(error::SystemError::forbidden("You can only delete your own account"));
        }
        if !self.repo.delete(&id).await? {
            return Err(error::SystemError::not_found("User not found"));
        }
        self.cache.delete(&user_key(&id)).await?;
        info!("User {} deleted with dependent records", id);
        Ok(())
    }

    fn decode_refresh_token(&self, token: Option<&str>) -> Result<Claims, error::SystemError> {
        let token = token.ok_or_else(|| error::SystemError::unauthorized("Missing refresh token"))?;
        let claims = Claims::decode(token, self.config.jwt_secret.as_bytes())
            .map_err(|_| error::SystemError::unauthorized("Invalid token"))?;
        if !claims.is(TypeClaims::RefreshToken) {
            return Err(error::SystemError::unauthorized("Invalid token"));
        }
        Ok(claims)
    }

    async fn issue_tokens(&self, user_id: &Uuid) -> Result<TokenPair, error::SystemError> {
        let secret = self.config.jwt_secret.as_bytes();

        let access_token = Claims::new(user_id, self.config.access_token_expiration)
            .with_type(TypeClaims::AccessToken)
            .encode(secret)?;

        let jti = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let refresh_token = Claims::new(user_id, self.config.refresh_token_expiration)
            .with_jti(jti)
            .with_type(TypeClaims::RefreshToken)
            .encode(secret)?;

        self.cache.set(&refresh_key(&jti), user_id, self.config.refresh_token_expiration).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_max_age: self.config.refresh_token_expiration,
        })
    }
}
