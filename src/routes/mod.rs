// Routes module: 라우팅 설정
// 역할: 도메인 라우터 조합 + 공통 레이어(인증, CORS, 트레이싱)
// Routes module: combines domain routers and shared layers

pub mod api_doc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domains::auth::routes::create_auth_router;
use crate::routes::api_doc::ApiDoc;
use crate::shared::middleware::authenticate;
use crate::shared::services::AppState;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/auth", create_auth_router())
}

/// 전체 애플리케이션 생성 (라우터 + Swagger + 미들웨어 + 상태)
/// Build the complete application
pub fn create_app(app_state: AppState) -> Router {
    let mut app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(app_state.clone(), authenticate))
        .layer(TraceLayer::new_for_http());

    // CORS 설정 (CORS_ORIGIN이 있을 때만)
    if let Some(origin) = app_state.config.server.cors_origin.as_deref() {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
                    .allow_credentials(true);
                app = app.layer(cors);
            }
            Err(e) => tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS_ORIGIN"),
        }
    }

    app.with_state(app_state)
}
