use std::collections::BTreeMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// 필드 → 메시지 (입력값 검증 실패 시)
/// Field name to message pairs for input-validation failures
pub type FieldErrors = BTreeMap<String, String>;

/// 에러 코드 (응답의 `code` 필드와 HTTP 상태 결정)
/// Stable wire codes; each one fixes the HTTP status and default message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCredentials,
    InvalidToken,
    ExpiredToken,
    InvalidRefreshToken,
    DuplicateEmail,
    DuplicateUserId,
    UserNotFound,
    InvalidInputValue,
    MissingInputValue,
    InternalServerError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::InvalidToken
            | ErrorCode::ExpiredToken
            | ErrorCode::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            ErrorCode::DuplicateEmail | ErrorCode::DuplicateUserId => StatusCode::CONFLICT,
            ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidInputValue | ErrorCode::MissingInputValue => StatusCode::BAD_REQUEST,
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "AUTH-001",
            ErrorCode::InvalidToken => "AUTH-002",
            ErrorCode::ExpiredToken => "AUTH-003",
            ErrorCode::InvalidRefreshToken => "AUTH-004",
            ErrorCode::DuplicateEmail => "USER-001",
            ErrorCode::DuplicateUserId => "USER-002",
            ErrorCode::UserNotFound => "USER-003",
            ErrorCode::InvalidInputValue => "COMMON-001",
            ErrorCode::MissingInputValue => "COMMON-002",
            ErrorCode::InternalServerError => "COMMON-003",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "아이디 또는 비밀번호가 잘못되었습니다",
            ErrorCode::InvalidToken => "유효하지 않은 토큰입니다",
            ErrorCode::ExpiredToken => "만료된 토큰입니다",
            ErrorCode::InvalidRefreshToken => "유효하지 않은 리프레시 토큰입니다",
            ErrorCode::DuplicateEmail => "이미 사용 중인 이메일입니다",
            ErrorCode::DuplicateUserId => "이미 사용 중인 아이디입니다",
            ErrorCode::UserNotFound => "사용자를 찾을 수 없습니다",
            ErrorCode::InvalidInputValue => "입력값이 올바르지 않습니다",
            ErrorCode::MissingInputValue => "필수 입력값이 누락되었습니다",
            ErrorCode::InternalServerError => "서버 오류가 발생했습니다",
        }
    }
}

/// 에러 응답 모델
/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// 항상 false
    #[schema(example = false)]
    pub success: bool,

    #[schema(example = "AUTH-001")]
    pub code: String,

    #[schema(example = "아이디 또는 비밀번호가 잘못되었습니다")]
    pub message: String,

    pub timestamp: DateTime<Utc>,

    /// 입력값 검증 실패 시 필드별 메시지
    /// Per-field messages, present only for input-validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn of(code: ErrorCode) -> Self {
        Self {
            success: false,
            code: code.code().to_string(),
            message: code.message().to_string(),
            timestamp: Utc::now(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}
