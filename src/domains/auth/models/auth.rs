use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domains::auth::models::user::UserInfo;
use crate::shared::config::SignupPolicy;
use crate::shared::errors::{AuthError, FieldErrors};

/// 비밀번호에 허용되는 특수문자
const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// users 테이블 컬럼 길이와 동일 (email VARCHAR(100), user_id VARCHAR(50))
pub const EMAIL_MAX_CHARS: usize = 100;
pub const USER_ID_MAX_CHARS: usize = 50;

// 회원가입 요청 모델
// 누락된 필드는 빈 문자열로 받아 MissingInputValue로 보고
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = SignupRequest)]
pub struct SignupRequest {
    /// Email address
    /// 이메일 주소
    #[serde(default)]
    #[schema(example = "s12345@gsm.hs.kr")]
    pub email: String,

    /// Login identifier
    /// 아이디
    #[serde(default)]
    #[schema(example = "alice")]
    pub user_id: String,

    /// Password (will be hashed)
    /// 비밀번호 (해싱됨)
    #[serde(default)]
    #[schema(example = "Passw0rd!")]
    pub password: String,
}

impl SignupRequest {
    /// 입력값 검증
    /// 누락 필드가 있으면 MissingInputValue, 형식 오류는 InvalidInputValue (필드별 메시지 모음)
    pub fn validate(&self, policy: &SignupPolicy) -> Result<(), AuthError> {
        let mut missing = FieldErrors::new();
        if self.email.trim().is_empty() {
            missing.insert("email".into(), "이메일은 필수입니다.".into());
        }
        if self.user_id.trim().is_empty() {
            missing.insert("userId".into(), "아이디는 필수 입니다.".into());
        }
        if self.password.trim().is_empty() {
            missing.insert("password".into(), "비밀번호는 필수 입니다.".into());
        }
        if !missing.is_empty() {
            return Err(AuthError::MissingInputValue { errors: missing });
        }

        let mut invalid = FieldErrors::new();
        if self.email.chars().count() > EMAIL_MAX_CHARS {
            invalid.insert(
                "email".into(),
                format!("이메일은 {}자 이하여야 합니다.", EMAIL_MAX_CHARS),
            );
        } else if !policy.email_pattern.is_match(&self.email) {
            invalid.insert("email".into(), "올바른 이메일 형식이 아닙니다.".into());
        }
        if self.user_id.chars().count() > USER_ID_MAX_CHARS {
            invalid.insert(
                "userId".into(),
                format!("아이디는 {}자 이하여야 합니다.", USER_ID_MAX_CHARS),
            );
        }
        if !is_strong_password(&self.password) {
            invalid.insert(
                "password".into(),
                "비밀번호는 대소문자, 숫자, 특수문자를 모두 포함해야 합니다.".into(),
            );
        }
        if !invalid.is_empty() {
            return Err(AuthError::InvalidInputValue { errors: invalid });
        }

        Ok(())
    }
}

/// 소문자, 대문자, 숫자, 특수문자(@$!%*?&)를 각각 하나 이상 포함하고 그 외 문자는 없음
fn is_strong_password(password: &str) -> bool {
    let is_special = |c: char| PASSWORD_SPECIALS.contains(c);

    password.chars().all(|c| c.is_ascii_alphanumeric() || is_special(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_special)
}

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub user_id: String,

    /// Password
    /// 비밀번호
    #[serde(default)]
    #[schema(example = "Passw0rd!")]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut missing = FieldErrors::new();
        if self.user_id.trim().is_empty() {
            missing.insert("userId".into(), "아이디는 필수입니다.".into());
        }
        if self.password.is_empty() {
            missing.insert("password".into(), "비밀번호는 필수 입니다.".into());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::MissingInputValue { errors: missing })
        }
    }
}

// 로그인 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    /// JWT Access Token (짧은 수명)
    /// JWT Access Token (short lifetime)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Refresh Token (긴 수명, DB에 저장)
    /// Refresh Token (long lifetime, stored in database)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,

    #[schema(example = "Bearer")]
    pub token_type: String,

    /// Access Token 수명 (초)
    /// Access token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,

    pub user: UserInfo,
}

// 토큰 갱신 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = RefreshTokenRequest)]
pub struct RefreshTokenRequest {
    /// Refresh Token
    /// 리프레시 토큰
    #[serde(default)]
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.refresh_token.trim().is_empty() {
            return Err(AuthError::missing_input("refreshToken", "리프레시 토큰은 필수입니다."));
        }
        Ok(())
    }
}

// 토큰 갱신 응답 모델 (리프레시 토큰은 회전하지 않음)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = TokenResponse)]
pub struct TokenResponse {
    /// 새 Access Token
    /// New Access Token
    pub access_token: String,

    #[schema(example = "Bearer")]
    pub token_type: String,

    #[schema(example = 3600)]
    pub expires_in: i64,
}

// 아이디 중복 체크 쿼리
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CheckUserIdQuery {
    /// 확인할 아이디
    pub user_id: Option<String>,
}

// 아이디 중복 체크 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CheckAvailabilityResponse)]
pub struct CheckAvailabilityResponse {
    pub available: bool,

    #[schema(example = "사용 가능한 아이디입니다")]
    pub message: String,
}

impl CheckAvailabilityResponse {
    pub fn new(available: bool) -> Self {
        let message = if available {
            "사용 가능한 아이디입니다"
        } else {
            "이미 사용 중인 아이디입니다"
        };
        Self {
            available,
            message: message.to_string(),
        }
    }
}
