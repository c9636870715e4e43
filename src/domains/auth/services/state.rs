// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;

use crate::domains::auth::services::{AuthService, JwtService, PasswordHasher};
use crate::shared::database::UserStore;

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
}

impl AuthState {
    /// AuthState 생성 (저장소, 해셔, JWT 서비스 주입)
    pub fn new(
        users: Arc<dyn UserStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            auth_service: AuthService::new(users, password_hasher, jwt_service.clone()),
            jwt_service,
        }
    }
}
