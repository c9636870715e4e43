use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domains::auth::services::JwtService;
use crate::shared::errors::AuthError;
use crate::shared::services::AppState;

/// 인증 없이 접근 가능한 경로
/// Paths the authenticator skips entirely
pub const PUBLIC_PATHS: &[&str] = &[
    "/auth/signup",
    "/auth/login",
    "/auth/refresh",
    "/auth/check-userid",
];

/// API 문서 경로 (prefix)
pub const PUBLIC_PREFIXES: &[&str] = &["/api-docs", "/swagger-ui"];

/// 인증된 사용자 (JWT subject)
/// Authenticated principal; carries no roles or authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// 요청 인증 미들웨어
/// 역할: Bearer 토큰이 유효하면 AuthenticatedUser를 extensions에 넣음
///
/// 실패해도 요청을 거부하지 않는다. 보호된 핸들러는 `AuthenticatedUser`
/// extractor로 인증 여부를 판단한다.
pub async fn authenticate(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_public_path(request.uri().path()) {
        if let Some(principal) = resolve_principal(&app_state.auth_state.jwt_service, request.headers()) {
            request.extensions_mut().insert(principal);
        }
    }

    next.run(request).await
}

/// Authorization 헤더에서 principal 추출 (extract_subject → validate 순서)
pub fn resolve_principal(jwt_service: &JwtService, headers: &HeaderMap) -> Option<AuthenticatedUser> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    let user_id = match jwt_service.extract_subject(token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(error = %e, "JWT 토큰 파싱 실패");
            return None;
        }
    };

    if !jwt_service.validate_token(token) {
        tracing::debug!(user_id = %user_id, "bearer token expired");
        return None;
    }

    Some(AuthenticatedUser { user_id })
}

/// 보호된 핸들러용 extractor
/// 인증 미들웨어가 principal을 넣지 않았으면 401 (InvalidToken)
///
/// 사용법:
/// ```ignore
/// pub async fn logout(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,
/// ) -> Result<StatusCode, AuthError> { ... }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
