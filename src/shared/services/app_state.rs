use std::sync::Arc;

use anyhow::Result;

use crate::domains::auth::services::{Argon2PasswordHasher, AuthState, JwtService, PasswordHasher};
use crate::shared::config::AppConfig;
use crate::shared::database::{Database, InMemoryUserRepository, UserRepository, UserStore};

/// Application state (combines all domain states)
/// 애플리케이션 상태 (설정 + 도메인 상태)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_state: AuthState,
}

impl AppState {
    /// 설정에 따라 저장소를 선택하여 AppState 생성
    /// DATABASE_URL이 있으면 PostgreSQL(마이그레이션 실행), 없으면 인메모리
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let users: Arc<dyn UserStore> = match config.server.database_url.as_deref() {
            Some(db_url) => {
                let db = Database::connect(db_url, config.server.max_connections).await?;
                db.initialize().await?;
                tracing::info!(max_connections = config.server.max_connections, "using PostgreSQL user store");
                Arc::new(UserRepository::new(db.pool().clone()))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory user store (data is lost on restart)");
                Arc::new(InMemoryUserRepository::new())
            }
        };

        Ok(Self::with_components(config, users, Arc::new(Argon2PasswordHasher::new())))
    }

    /// 구성요소를 직접 주입 (테스트용으로도 사용)
    pub fn with_components(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt);
        let auth_state = AuthState::new(users, password_hasher, jwt_service);

        Self {
            config: Arc::new(config),
            auth_state,
        }
    }
}
