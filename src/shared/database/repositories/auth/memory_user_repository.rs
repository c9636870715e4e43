use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domains::auth::models::user::{NewUser, StoredRefreshToken, User};
use crate::shared::database::repositories::auth::user_store::{DuplicateField, UserStore};

/// 인메모리 사용자 저장소
/// In-memory user store for running without PostgreSQL and for tests.
/// A single lock makes every operation atomic.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<i64, User>,
    last_id: i64,
}

impl MemoryState {
    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<&User> {
        self.users.values().find(|user| predicate(*user))
    }

    fn find_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.values_mut().find(|user| user.user_id == user_id)
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.state.read().find(|u| u.email == email).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.state.read().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .read()
            .find(|u| u.refresh_token.as_ref().is_some_and(|t| t.token == token))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut state = self.state.write();

        if state.find(|u| u.email == new_user.email).is_some() {
            return Err(DuplicateField::Email.into());
        }
        if state.find(|u| u.user_id == new_user.user_id).is_some() {
            return Err(DuplicateField::UserId.into());
        }

        state.last_id += 1;
        let user = User {
            id: state.last_id,
            email: new_user.email,
            user_id: new_user.user_id,
            password_hash: new_user.password_hash,
            refresh_token: None,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_refresh_token(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(user) = self.state.write().find_mut(user_id) {
            user.refresh_token = Some(StoredRefreshToken {
                token: token.to_string(),
                expires_at,
            });
        }
        Ok(())
    }

    async fn clear_refresh_token(&self, user_id: &str) -> Result<()> {
        if let Some(user) = self.state.write().find_mut(user_id) {
            user.refresh_token = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_user(email: &str, user_id: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            user_id: user_id.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_enforces_uniqueness() {
        let store = InMemoryUserRepository::new();

        let alice = store.create(new_user("a@x.kr", "alice")).await.unwrap();
        let bob = store.create(new_user("b@x.kr", "bob")).await.unwrap();
        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert!(alice.refresh_token.is_none());

        let err = store.create(new_user("a@x.kr", "carol")).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DuplicateField>(), Some(&DuplicateField::Email));

        let err = store.create(new_user("c@x.kr", "alice")).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DuplicateField>(), Some(&DuplicateField::UserId));

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_token_slot_last_write_wins() {
        let store = InMemoryUserRepository::new();
        store.create(new_user("a@x.kr", "alice")).await.unwrap();
        let expires_at = Utc::now() + Duration::days(1);

        store.update_refresh_token("alice", "t1", expires_at).await.unwrap();
        store.update_refresh_token("alice", "t2", expires_at).await.unwrap();

        assert!(store.find_by_refresh_token("t1").await.unwrap().is_none());
        let user = store.find_by_refresh_token("t2").await.unwrap().unwrap();
        assert_eq!(user.user_id, "alice");
        assert_eq!(user.refresh_token.unwrap().expires_at, expires_at);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent_and_tolerates_unknown_user() {
        let store = InMemoryUserRepository::new();
        store.create(new_user("a@x.kr", "alice")).await.unwrap();
        store
            .update_refresh_token("alice", "t1", Utc::now() + Duration::days(1))
            .await
            .unwrap();

        store.clear_refresh_token("alice").await.unwrap();
        store.clear_refresh_token("alice").await.unwrap();
        store.clear_refresh_token("nobody").await.unwrap();

        let user = store.find_by_user_id("alice").await.unwrap().unwrap();
        assert!(user.refresh_token.is_none());
    }
}
