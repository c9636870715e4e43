use axum::{
    Json,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::shared::errors::error_code::{ErrorCode, ErrorResponse, FieldErrors};

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 아이디가 없거나 비밀번호가 틀림 (두 경우 동일한 응답)
    /// Unknown userId or wrong password; both surface identically
    #[error("Invalid user id or password")]
    InvalidCredentials,

    /// 서명/구조 검증 실패
    #[error("Invalid token")]
    InvalidToken,

    /// 토큰 파싱 실패 (JwtService 내부용, 응답은 InvalidToken과 동일)
    /// Token could not be parsed or verified
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token expired")]
    ExpiredToken,

    /// 현재 저장된 리프레시 토큰이 아님 (로그아웃/재로그인으로 대체됨)
    /// Well-formed refresh token that is no longer the live one
    #[error("Refresh token is not active")]
    InvalidRefreshToken,

    #[error("Email already exists: {email}")]
    DuplicateEmail { email: String },

    #[error("User id already exists: {user_id}")]
    DuplicateUserId { user_id: String },

    #[error("User not found: user_id={user_id}")]
    UserNotFound { user_id: String },

    #[error("Invalid input: {errors:?}")]
    InvalidInputValue { errors: FieldErrors },

    #[error("Missing input: {errors:?}")]
    MissingInputValue { errors: FieldErrors },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to hash password: {0}")]
    PasswordHashing(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    /// 단일 필드 입력 오류
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        AuthError::InvalidInputValue {
            errors: FieldErrors::from([(field.to_string(), message.into())]),
        }
    }

    /// 단일 필드 누락
    pub fn missing_input(field: &str, message: impl Into<String>) -> Self {
        AuthError::MissingInputValue {
            errors: FieldErrors::from([(field.to_string(), message.into())]),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::InvalidToken | AuthError::MalformedToken(_) => ErrorCode::InvalidToken,
            AuthError::ExpiredToken => ErrorCode::ExpiredToken,
            AuthError::InvalidRefreshToken => ErrorCode::InvalidRefreshToken,
            AuthError::DuplicateEmail { .. } => ErrorCode::DuplicateEmail,
            AuthError::DuplicateUserId { .. } => ErrorCode::DuplicateUserId,
            AuthError::UserNotFound { .. } => ErrorCode::UserNotFound,
            AuthError::InvalidInputValue { .. } => ErrorCode::InvalidInputValue,
            AuthError::MissingInputValue { .. } => ErrorCode::MissingInputValue,
            AuthError::Database(_) | AuthError::PasswordHashing(_) | AuthError::Internal(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
/// 내부 에러는 로그에만 상세 내용을 남기고, 클라이언트에는 일반 메시지만 반환
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = self.error_code();

        if code == ErrorCode::InternalServerError {
            tracing::error!(code = code.code(), error = %self, "unexpected error");
        } else {
            tracing::debug!(code = code.code(), error = %self, "request rejected");
        }

        let body = match self {
            AuthError::InvalidInputValue { errors } | AuthError::MissingInputValue { errors } => {
                ErrorResponse::of(code).with_errors(errors)
            }
            _ => ErrorResponse::of(code),
        };

        (code.status(), Json(body)).into_response()
    }
}
