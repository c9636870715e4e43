use utoipa::OpenApi;

use crate::domains::auth::models::*;
use crate::shared::errors::ErrorResponse;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::signup,
        crate::domains::auth::handlers::auth_handler::login,
        crate::domains::auth::handlers::auth_handler::logout,
        crate::domains::auth::handlers::auth_handler::refresh,
        crate::domains::auth::handlers::auth_handler::check_user_id,
        crate::domains::auth::handlers::auth_handler::get_me
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        LoginResponse,
        RefreshTokenRequest,
        TokenResponse,
        CheckAvailabilityResponse,
        UserInfo,
        ErrorResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Authentication API endpoints")
    ),
    info(
        title = "Solips Auth Server",
        description = "Signup, login, logout and JWT access/refresh token issuance",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
