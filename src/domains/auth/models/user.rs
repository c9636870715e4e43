use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 레코드 (DB 행)
/// User record as persisted by the credential store
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// 토큰 subject로 사용되는 아이디
    /// Login identifier, used as the token subject
    pub user_id: String,
    pub password_hash: String,
    /// 현재 유효한 리프레시 토큰 (사용자당 최대 1개)
    /// The single live refresh token slot
    pub refresh_token: Option<StoredRefreshToken>,
    pub created_at: DateTime<Utc>,
}

/// 저장된 리프레시 토큰과 만료 시각
/// Token and expiry are stored and cleared together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRefreshToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredRefreshToken {
    /// 두 컬럼이 모두 있을 때만 Some
    pub fn from_columns(token: Option<String>, expires_at: Option<DateTime<Utc>>) -> Option<Self> {
        match (token, expires_at) {
            (Some(token), Some(expires_at)) => Some(Self { token, expires_at }),
            _ => None,
        }
    }
}

/// 사용자 생성 데이터
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub user_id: String,
    pub password_hash: String,
}

/// 사용자 공개 정보 (비밀번호 제외)
/// Public-safe identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "s12345@gsm.hs.kr")]
    pub email: String,

    #[schema(example = "alice")]
    pub user_id: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            user_id: user.user_id.clone(),
        }
    }
}
