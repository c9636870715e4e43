use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::domains::auth::models::{
    CheckAvailabilityResponse, CheckUserIdQuery, LoginRequest, LoginResponse,
    RefreshTokenRequest, SignupRequest, TokenResponse, UserInfo,
};
use crate::shared::errors::{AuthError, ErrorResponse};
use crate::shared::middleware::{AppJson, AuthenticatedUser};
use crate::shared::services::AppState;

// 회원가입 핸들러
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserInfo),
        (status = 400, description = "Invalid or missing input", body = ErrorResponse),
        (status = 409, description = "Email or user id already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AuthError> {
    request.validate(&app_state.config.signup)?;

    let user = app_state.auth_state.auth_service.signup(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing input", body = ErrorResponse),
        (status = 401, description = "Invalid user id or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request.validate()?;

    let response = app_state.auth_state.auth_service.login(request).await?;

    Ok(Json(response))
}

/// 로그아웃 핸들러
/// Logout handler (clears the caller's stored refresh token)
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<StatusCode, AuthError> {
    app_state
        .auth_state
        .auth_service
        .logout(&authenticated_user.user_id)
        .await?;

    Ok(StatusCode::OK)
}

/// 토큰 갱신 핸들러
/// Refresh token handler
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Missing refresh token", body = ErrorResponse),
        (status = 401, description = "Invalid, superseded or expired refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    request.validate()?;

    let response = app_state
        .auth_state
        .auth_service
        .refresh_token(&request.refresh_token)
        .await?;

    Ok(Json(response))
}

// 아이디 중복 체크
#[utoipa::path(
    get,
    path = "/auth/check-userid",
    params(CheckUserIdQuery),
    responses(
        (status = 200, description = "Availability of the user id", body = CheckAvailabilityResponse),
        (status = 400, description = "Missing userId", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn check_user_id(
    State(app_state): State<AppState>,
    Query(query): Query<CheckUserIdQuery>,
) -> Result<Json<CheckAvailabilityResponse>, AuthError> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AuthError::missing_input("userId", "아이디는 필수입니다."))?;

    let available = app_state
        .auth_state
        .auth_service
        .is_user_id_available(&user_id)
        .await?;

    Ok(Json(CheckAvailabilityResponse::new(available)))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "User info retrieved successfully", body = UserInfo),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserInfo>, AuthError> {
    let user = app_state
        .auth_state
        .auth_service
        .get_user_info(&authenticated_user.user_id)
        .await?;

    Ok(Json(user))
}
