use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domains::auth::models::user::{NewUser, User};

/// 유니크 제약 위반 필드
/// Returned (wrapped in `anyhow::Error`) by `UserStore::create` on a uniqueness violation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    #[error("email already exists")]
    Email,
    #[error("user id already exists")]
    UserId,
}

/// 사용자 저장소 (Credential Store)
/// 각 메서드는 저장소에 대한 하나의 원자적 작업
///
/// Each method is one atomic unit of work against the store. The refresh token
/// and its expiry are always written and cleared together.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>>;

    /// 현재 이 토큰 값을 정확히 가지고 있는 사용자
    /// The user whose live refresh token is exactly `token`
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>>;

    /// 사용자 생성 (리프레시 토큰 없음)
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// 리프레시 토큰 덮어쓰기 (last-write-wins)
    async fn update_refresh_token(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// 리프레시 토큰 제거. 없는 사용자여도 에러 아님
    async fn clear_refresh_token(&self, user_id: &str) -> Result<()>;
}
