//! In-memory stand-ins for the Postgres repositories and the Redis cache.
//!
//! `MemoryStore` mirrors the constraints the migrations enforce: lowercased
//! unique emails, one friendship edge per pair, one like per user and post,
//! and an all-or-nothing user cascade.


use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    api::error::{self, SystemError},
    configs::Cache,
    constants::AuthConfig,
    modules::{
        comment::{
            model::{CommentResponse, InsertComment},
            repository::CommentRepository,
            schema::CommentEntity,
        },
        friendship::{
            model::{FriendRequestResponse, FriendRequestRow, FriendResponse},
            repository::{FriendRequestRepository, FriendshipRepo, FriendshipRepository},
            schema::{FriendshipEntity, FriendshipState},
        },
        like::{repository::LikeRepository, schema::LikeEntity},
        post::{
            model::{InsertPost, PostDetail},
            repository::PostRepository,
            schema::PostEntity,
        },
        user::{
            model::{InsertUser, UpdateUser},
            repository::UserRepository,
            schema::UserEntity,
        },
    },
};

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".into(),
        access_token_expiration: 900,
        refresh_token_expiration: 3600,
        user_cache_ttl: 60,
    }
}

/// Stage of the user cascade at which an injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    Likes,
    Comments,
    Posts,
    Friendships,
    User,
}

#[derive(Default, Clone)]
struct Tables {
    clock: Option<DateTime<Utc>>,
    users: Vec<UserEntity>,
    friendships: Vec<FriendshipEntity>,
    posts: Vec<PostEntity>,
    comments: Vec<CommentEntity>,
    likes: Vec<LikeEntity>,
}

impl Tables {
    /// Strictly increasing timestamps so ordering assertions are stable.
    fn now(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.clock {
            Some(prev) if now <= prev => prev + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        next
    }

    fn user(&self, id: &Uuid) -> Option<&UserEntity> {
        self.users.iter().find(|u| u.id == *id)
    }

    fn friend(&self, id: &Uuid) -> Option<FriendResponse> {
        self.user(id).cloned().map(FriendResponse::from)
    }

    fn request_row(&self, edge: &FriendshipEntity, other: &Uuid) -> Option<FriendRequestRow> {
        let user = self.user(other)?;
        Some(FriendRequestRow {
            req_id: edge.id,
            state: edge.state,
            created_at: edge.created_at,
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
        })
    }

    fn post_detail(&self, post: &PostEntity) -> Option<PostDetail> {
        let author = self.user(&post.user_id)?;
        Some(PostDetail {
            id: post.id,
            user_id: post.user_id,
            author_name: author.full_name(),
            content: post.content.clone(),
            like_count: self.likes.iter().filter(|l| l.post_id == post.id).count() as i64,
            comment_count: self.comments.iter().filter(|c| c.post_id == post.id).count() as i64,
            created_at: post.created_at,
        })
    }

    fn cascade(&mut self, step: CascadeStep, user_id: &Uuid) {
        let owned_posts: Vec<Uuid> =
            self.posts.iter().filter(|p| p.user_id == *user_id).map(|p| p.id).collect();
        match step {
            CascadeStep::Likes => self
                .likes
                .retain(|l| l.user_id != *user_id && !owned_posts.contains(&l.post_id)),
            CascadeStep::Comments => self
                .comments
                .retain(|c| c.user_id != *user_id && !owned_posts.contains(&c.post_id)),
            CascadeStep::Posts => self.posts.retain(|p| p.user_id != *user_id),
            CascadeStep::Friendships => self.friendships.retain(|f| !f.involves(user_id)),
            CascadeStep::User => self.users.retain(|u| u.id != *user_id),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_cascade_at: Mutex<Option<CascadeStep>>,
}

impl MemoryStore {
    pub fn fail_next_cascade_at(&self, step: CascadeStep) {
        *self.fail_cascade_at.lock().unwrap() = Some(step);
    }

    pub fn insert_user(&self, email: &str) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let id = Uuid::new_v4();
        tables.users.push(UserEntity {
            id,
            email: email.to_lowercase(),
            hash_password: "not-a-real-hash".into(),
            first_name: "Jonathan".into(),
            last_name: "Yiv".into(),
            sign_in_count: 0,
            current_sign_in_at: None,
            last_sign_in_at: None,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn insert_friendship(&self, requester: Uuid, requested: Uuid, state: FriendshipState) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let id = Uuid::new_v4();
        tables.friendships.push(FriendshipEntity {
            id,
            requester_id: requester,
            requested_id: requested,
            state,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn insert_post(&self, user_id: Uuid) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let id = Uuid::new_v4();
        tables.posts.push(PostEntity {
            id,
            user_id,
            content: "Woo! This is a test post!".into(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn insert_comment(&self, user_id: Uuid, post_id: Uuid) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let id = Uuid::new_v4();
        tables.comments.push(CommentEntity {
            id,
            user_id,
            post_id,
            content: "Woo! This is a test comment!".into(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn insert_like(&self, user_id: Uuid, post_id: Uuid) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let id = Uuid::new_v4();
        tables.likes.push(LikeEntity { id, user_id, post_id, created_at: now });
        id
    }

    pub fn friendship_count(&self) -> usize {
        self.tables.lock().unwrap().friendships.len()
    }

    /// (users, friendships, posts, comments, likes)
    pub fn counts(&self) -> (usize, usize, usize, usize, usize) {
        let t = self.tables.lock().unwrap();
        (t.users.len(), t.friendships.len(), t.posts.len(), t.comments.len(), t.likes.len())
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, SystemError> {
        Ok(self.tables.lock().unwrap().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, SystemError> {
        let email = email.to_lowercase();
        Ok(self.tables.lock().unwrap().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let email = user.email.to_lowercase();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(SystemError::email_taken());
        }
        let now = tables.now();
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email,
            hash_password: user.hash_password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            sign_in_count: 0,
            current_sign_in_at: None,
            last_sign_in_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &Uuid, user: &UpdateUser) -> Result<UserEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let email = user.email.as_ref().map(|e| e.to_lowercase());
        if let Some(email) = &email {
            if tables.users.iter().any(|u| u.email == *email && u.id != *id) {
                return Err(SystemError::email_taken());
            }
        }
        let now = tables.now();
        let entity = tables
            .users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| SystemError::not_found("User not found"))?;
        if let Some(email) = email {
            entity.email = email;
        }
        if let Some(hash) = &user.hash_password {
            entity.hash_password = hash.clone();
        }
        if let Some(first_name) = &user.first_name {
            entity.first_name = first_name.clone();
        }
        if let Some(last_name) = &user.last_name {
            entity.last_name = last_name.clone();
        }
        entity.updated_at = now;
        Ok(entity.clone())
    }

    async fn record_sign_in(&self, id: &Uuid) -> Result<(), SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == *id) {
            user.sign_in_count += 1;
            user.last_sign_in_at = user.current_sign_in_at;
            user.current_sign_in_at = Some(now);
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let fail_at = self.fail_cascade_at.lock().unwrap().take();

        // work on a copy so an injected failure leaves every table untouched
        let mut draft = tables.clone();
        let existed = draft.user(id).is_some();
        for step in [
            CascadeStep::Likes,
            CascadeStep::Comments,
            CascadeStep::Posts,
            CascadeStep::Friendships,
            CascadeStep::User,
        ] {
            if fail_at == Some(step) {
                return Err(SystemError::DatabaseError(format!("failed at {step:?}").into()));
            }
            draft.cascade(step, id);
        }
        *tables = draft;
        Ok(existed)
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, SystemError> {
        Ok(self.tables.lock().unwrap().friendships.iter().find(|f| f.id == *id).cloned())
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.friendships.iter().find(|f| f.connects(user_id_a, user_id_b)).cloned())
    }

    async fn find_requested_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .friendships
            .iter()
            .filter(|f| f.requester_id == *user_id && f.state.is_accepted())
            .filter_map(|f| tables.friend(&f.requested_id))
            .collect())
    }

    async fn find_requesting_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .friendships
            .iter()
            .filter(|f| f.requested_id == *user_id && f.state.is_accepted())
            .filter_map(|f| tables.friend(&f.requester_id))
            .collect())
    }

    async fn delete_accepted_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.friendships.len();
        tables.friendships.retain(|f| !(f.state.is_accepted() && f.connects(user_id_a, user_id_b)));
        Ok(tables.friendships.len() < before)
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for MemoryStore {
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .friendships
            .iter()
            .find(|f| f.state.is_pending() && f.connects(user_id_a, user_id_b))
            .cloned())
    }

    async fn has_incoming_requests(&self, user_id: &Uuid) -> Result<bool, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.friendships.iter().any(|f| f.requested_id == *user_id && f.state.is_pending()))
    }

    async fn find_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .friendships
            .iter()
            .rev()
            .filter(|f| f.requested_id == *user_id && f.state.is_pending())
            .filter_map(|f| tables.request_row(f, &f.requester_id))
            .map(|row| row.into_incoming(*user_id))
            .collect())
    }

    async fn find_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .friendships
            .iter()
            .rev()
            .filter(|f| f.requester_id == *user_id && f.state.is_pending())
            .filter_map(|f| tables.request_row(f, &f.requested_id))
            .map(|row| row.into_outgoing(*user_id))
            .collect())
    }

    async fn create_request(
        &self,
        requester_id: &Uuid,
        requested_id: &Uuid,
    ) -> Result<FriendshipEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.friendships.iter().any(|f| f.connects(requester_id, requested_id)) {
            return Err(SystemError::conflict("Friendship already exists between these users"));
        }
        let now = tables.now();
        let entity = FriendshipEntity {
            id: Uuid::new_v4(),
            requester_id: *requester_id,
            requested_id: *requested_id,
            state: FriendshipState::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.friendships.push(entity.clone());
        Ok(entity)
    }

    async fn delete_pending(&self, request_id: &Uuid, user_id: &Uuid) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.friendships.len();
        tables
            .friendships
            .retain(|f| !(f.id == *request_id && f.state.is_pending() && f.involves(user_id)));
        Ok(tables.friendships.len() < before)
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MemoryStore {
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FriendshipEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let edge = tables
            .friendships
            .iter_mut()
            .find(|f| f.id == *request_id)
            .ok_or_else(|| SystemError::not_found("Friend request not found"))?;
        edge.state = edge.accept_by(user_id)?;
        edge.updated_at = now;
        Ok(edge.clone())
    }
}

#[async_trait::async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let entity = PostEntity {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            content: post.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, SystemError> {
        Ok(self.tables.lock().unwrap().posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_detail(&self, id: &Uuid) -> Result<Option<PostDetail>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == *id).and_then(|p| tables.post_detail(p)))
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<PostDetail>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.user_id == *user_id)
            .filter(|p| before.is_none_or(|b| p.created_at < b))
            .take(limit as usize)
            .filter_map(|p| tables.post_detail(p))
            .collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.likes.retain(|l| l.post_id != *id);
        tables.comments.retain(|c| c.post_id != *id);
        tables.posts.retain(|p| p.id != *id);
        Ok(tables.posts.len() < before)
    }
}

#[async_trait::async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: &InsertComment) -> Result<CommentEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let now = tables.now();
        let entity = CommentEntity {
            id: Uuid::new_v4(),
            user_id: comment.user_id,
            post_id: comment.post_id,
            content: comment.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CommentEntity>, SystemError> {
        Ok(self.tables.lock().unwrap().comments.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_post(&self, post_id: &Uuid) -> Result<Vec<CommentResponse>, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == *post_id)
            .filter_map(|c| {
                let author = tables.user(&c.user_id)?;
                Some(CommentResponse {
                    id: c.id,
                    post_id: c.post_id,
                    user_id: c.user_id,
                    author_name: author.full_name(),
                    content: c.content.clone(),
                    created_at: c.created_at,
                })
            })
            .collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != *id);
        Ok(tables.comments.len() < before)
    }
}

#[async_trait::async_trait]
impl LikeRepository for MemoryStore {
    async fn create(&self, user_id: &Uuid, post_id: &Uuid) -> Result<LikeEntity, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.likes.iter().any(|l| l.user_id == *user_id && l.post_id == *post_id) {
            return Err(SystemError::conflict("Post already liked"));
        }
        let now = tables.now();
        let entity =
            LikeEntity { id: Uuid::new_v4(), user_id: *user_id, post_id: *post_id, created_at: now };
        tables.likes.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, user_id: &Uuid, post_id: &Uuid) -> Result<bool, SystemError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.likes.len();
        tables.likes.retain(|l| !(l.user_id == *user_id && l.post_id == *post_id));
        Ok(tables.likes.len() < before)
    }

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, SystemError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.likes.iter().filter(|l| l.post_id == *post_id).count() as i64)
    }
}

/// Stores JSON bytes like `RedisCache`; expiry is ignored.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait::async_trait]
impl Cache for MemoryCache {
    async fn get<T>(&self, key: &str) -> Result<Option<T>, error::SystemError>
    where
        T: DeserializeOwned + Send,
    {
        let bytes = self.entries.lock().unwrap().get(key).cloned();
        bytes.map(|b| serde_json::from_slice(&b)).transpose().map_err(Into::into)
    }

    async fn set<T>(&self, key: &str, value: &T, _expiration: u64) -> Result<(), error::SystemError>
    where
        T: Serialize + Sync,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), error::SystemError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// These pin down the fake's own cascade so service tests can rely on it.
// `UserRepositoryPg::delete` is covered against Postgres in `pg.rs`.
mod tests {
    use super::*;

    struct World {
        store: MemoryStore,
        doomed: Uuid,
        bystander: Uuid,
    }

    /// Two users who are friends, each with a post the other commented on and liked.
    fn world() -> World {
        let store = MemoryStore::default();
        let doomed = store.insert_user("doomed@example.com");
        let bystander = store.insert_user("bystander@example.com");
        store.insert_friendship(doomed, bystander, FriendshipState::Accepted);

        let doomed_post = store.insert_post(doomed);
        let bystander_post = store.insert_post(bystander);
        store.insert_comment(bystander, doomed_post);
        store.insert_like(bystander, doomed_post);
        store.insert_comment(doomed, bystander_post);
        store.insert_like(doomed, bystander_post);
        store.insert_comment(bystander, bystander_post);

        World { store, doomed, bystander }
    }

    #[actix_web::test]
    async fn memory_store_cascade_removes_everything_the_user_touches() {
        let World { store, doomed, bystander } = world();
        assert_eq!(store.counts(), (2, 1, 2, 3, 2));

        assert!(UserRepository::delete(&store, &doomed).await.unwrap());

        // the bystander keeps their post and their own comment on it
        assert_eq!(store.counts(), (1, 0, 1, 1, 0));
        let tables = store.tables.lock().unwrap();
        assert!(tables.posts.iter().all(|p| p.user_id == bystander));
        assert!(tables.comments.iter().all(|c| c.user_id == bystander));
    }

    #[actix_web::test]
    async fn memory_store_cascade_of_missing_user_changes_nothing() {
        let World { store, .. } = world();
        assert!(!UserRepository::delete(&store, &Uuid::new_v4()).await.unwrap());
        assert_eq!(store.counts(), (2, 1, 2, 3, 2));
    }

    #[actix_web::test]
    async fn memory_store_failed_cascade_leaves_every_table_untouched() {
        for step in [
            CascadeStep::Likes,
            CascadeStep::Comments,
            CascadeStep::Posts,
            CascadeStep::Friendships,
            CascadeStep::User,
        ] {
            let World { store, doomed, .. } = world();
            store.fail_next_cascade_at(step);

            let err = UserRepository::delete(&store, &doomed).await.unwrap_err();
            assert!(matches!(err, SystemError::DatabaseError(_)), "{step:?}");
            assert_eq!(store.counts(), (2, 1, 2, 3, 2), "{step:?}");

            // the injected failure is one-shot
            assert!(UserRepository::delete(&store, &doomed).await.unwrap());
        }
    }

    #[actix_web::test]
    async fn email_uniqueness_ignores_case() {
        let store = MemoryStore::default();
        store.insert_user("taken@example.com");
        let user = InsertUser {
            email: "TAKEN@Example.com".into(),
            hash_password: "hash".into(),
            first_name: "Jonathan".into(),
            last_name: "Yiv".into(),
        };
        let err = UserRepository::create(&store, &user).await.unwrap_err();
        assert!(matches!(err, SystemError::Validation(errors) if errors.contains_key("email")));
    }

    #[actix_web::test]
    async fn memory_cache_round_trips_json() {
        let cache = MemoryCache::default();
        cache.set("k", &vec![1, 2, 3], 60).await.unwrap();
        assert_eq!(cache.get::<Vec<i32>>("k").await.unwrap(), Some(vec![1, 2, 3]));
        cache.delete("k").await.unwrap();
        assert!(!cache.contains("k"));
    }
}
