// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 인메모리 저장소로 전체 라우터를 구성하고 HTTP 요청을 보내는 헬퍼 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = TestApp::new();
//     let (status, body) = app.login("alice", "Passw0rd!").await;
// }
// ```
// =====================================================

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use argon2::Params;
use auth_server::domains::auth::models::Claims;
use auth_server::domains::auth::services::Argon2PasswordHasher;
use auth_server::routes::create_app;
use auth_server::shared::config::AppConfig;
use auth_server::shared::database::InMemoryUserRepository;
use auth_server::shared::services::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

// 테스트용 상수
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_EMAIL: &str = "s12345@gsm.hs.kr";
pub const TEST_USER_ID: &str = "alice";
pub const TEST_PASSWORD: &str = "Passw0rd!";
pub const ACCESS_TTL_SECS: i64 = 900;

pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("JWT_SECRET", TEST_SECRET.to_string()),
        ("JWT_ACCESS_TOKEN_EXPIRATION", ACCESS_TTL_SECS.to_string()),
        ("JWT_REFRESH_TOKEN_EXPIRATION", "86400".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryUserRepository>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserRepository::new());
        // 테스트에서는 낮은 비용의 Argon2 파라미터 사용
        let hasher = Arc::new(Argon2PasswordHasher::with_params(
            Params::new(8, 1, 1, None).expect("argon2 params"),
        ));
        let state = AppState::with_components(test_config(), store.clone(), hasher);
        let router = create_app(state.clone());

        Self { state, store, router }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON body")
        };
        (status, body)
    }

    pub async fn post_raw(&self, uri: &str, body: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value, bearer: Option<&str>) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string(), bearer).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    /// 회원가입
    pub async fn signup(&self, email: &str, user_id: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/auth/signup",
            json!({ "email": email, "userId": user_id, "password": password }),
            None,
        )
        .await
    }

    /// 로그인
    pub async fn login(&self, user_id: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/auth/login",
            json!({ "userId": user_id, "password": password }),
            None,
        )
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> (StatusCode, Value) {
        self.post_json("/auth/refresh", json!({ "refreshToken": refresh_token }), None)
            .await
    }

    pub async fn logout(&self, bearer: Option<&str>) -> (StatusCode, Value) {
        self.post_raw("/auth/logout", "", bearer).await
    }

    /// 기본 테스트 사용자 가입 + 로그인, 로그인 응답 반환
    pub async fn signup_and_login(&self) -> Value {
        let (status, body) = self.signup(TEST_EMAIL, TEST_USER_ID, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        let (status, body) = self.login(TEST_USER_ID, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body
    }
}

/// 서명은 올바르지만 한 시간 전에 만료된 토큰 (기본 issuer/audience)
pub fn expired_token(subject: &str) -> String {
    let claims = Claims::new(
        subject,
        "solips",
        "solips-client",
        Utc::now() - Duration::hours(2),
        Duration::hours(1),
    );
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("sign expired token")
}

/// 에러 응답 형식 확인 후 code 반환
pub fn error_code(body: &Value) -> &str {
    assert_eq!(body["success"], false, "not an error body: {}", body);
    assert!(body["timestamp"].is_string(), "missing timestamp: {}", body);
    assert!(body["message"].is_string(), "missing message: {}", body);
    body["code"].as_str().expect("code")
}
