use std::sync::Arc;

use chrono::Utc;

use crate::domains::auth::models::{
    LoginRequest, LoginResponse, NewUser, SignupRequest, TOKEN_TYPE_BEARER, TokenResponse,
    UserInfo,
};
use crate::domains::auth::services::{JwtService, PasswordHasher};
use crate::shared::database::{DuplicateField, UserStore};
use crate::shared::errors::AuthError;

// 인증 서비스
// AuthService: signup, login, logout and access-token refresh
//
// 사용자별 상태: Registered -> LoggedIn(T1) -> LoggedIn(T2) -> LoggedOut
// 리프레시 토큰은 사용자당 하나만 저장 (새 로그인이 이전 토큰을 즉시 무효화)
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    password_hasher: Arc<dyn PasswordHasher>,
    jwt_service: JwtService,
    // 없는 아이디로 로그인할 때 검증할 해시 (응답 시간을 맞추기 위함)
    dummy_hash: Arc<str>,
}

/// 더미 해시 원문. 어떤 사용자 비밀번호와도 무관
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-user";

fn database_error(action: &str, err: anyhow::Error) -> AuthError {
    AuthError::Database(format!("{}: {:#}", action, err))
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        jwt_service: JwtService,
    ) -> Self {
        let dummy_hash = match password_hasher.hash(DUMMY_PASSWORD) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(error = %e, "failed to precompute dummy password hash");
                String::new()
            }
        };

        Self {
            users,
            password_hasher,
            jwt_service,
            dummy_hash: Arc::from(dummy_hash),
        }
    }

    // 회원가입
    // 중복 체크(이메일 → 아이디 순서)를 해싱보다 먼저 수행
    pub async fn signup(&self, request: SignupRequest) -> Result<UserInfo, AuthError> {
        tracing::info!(user_id = %request.user_id, email = %request.email, "signup attempt");

        // 1. 이메일 중복 확인
        let existing = self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(|e| database_error("Failed to check email existence", e))?;
        if existing.is_some() {
            return Err(AuthError::DuplicateEmail { email: request.email });
        }

        // 2. 아이디 중복 확인
        let existing = self
            .users
            .find_by_user_id(&request.user_id)
            .await
            .map_err(|e| database_error("Failed to check user id existence", e))?;
        if existing.is_some() {
            return Err(AuthError::DuplicateUserId { user_id: request.user_id });
        }

        // 3. 비밀번호 해싱
        let password_hash = self.password_hasher.hash(&request.password)?;

        // 4. 사용자 생성 (동시 가입 경쟁은 저장소의 유니크 제약으로 판정)
        let email = request.email;
        let user_id = request.user_id;
        let user = self
            .users
            .create(NewUser {
                email: email.clone(),
                user_id: user_id.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e.downcast_ref::<DuplicateField>().copied() {
                Some(DuplicateField::Email) => AuthError::DuplicateEmail { email },
                Some(DuplicateField::UserId) => AuthError::DuplicateUserId { user_id },
                None => database_error("Failed to create user", e),
            })?;

        tracing::info!(id = user.id, user_id = %user.user_id, "signup succeeded");
        Ok(UserInfo::from(&user))
    }

    // 로그인
    // 아이디 없음 / 비밀번호 불일치는 같은 에러로 응답
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .find_by_user_id(&request.user_id)
            .await
            .map_err(|e| database_error("Failed to fetch user", e))?;

        let Some(user) = user else {
            // 비밀번호 불일치와 같은 비용을 치르도록 더미 해시 검증
            let _ = self.password_hasher.verify(&request.password, &self.dummy_hash);
            tracing::warn!("login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            tracing::warn!("login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt_service.issue_access_token(&user.user_id)?;
        let refresh_token = self.jwt_service.issue_refresh_token(&user.user_id)?;
        let expires_at = self.jwt_service.refresh_token_expires_at();

        // 이전 리프레시 토큰을 덮어씀 (토큰+만료를 한 번에 저장)
        self.users
            .update_refresh_token(&user.user_id, &refresh_token, expires_at)
            .await
            .map_err(|e| database_error("Failed to store refresh token", e))?;

        tracing::info!(user_id = %user.user_id, "login succeeded");

        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt_service.access_token_ttl_secs(),
            user: UserInfo::from(&user),
        })
    }

    /// 로그아웃 - 저장된 리프레시 토큰 제거 (멱등)
    /// Logout - clears the stored refresh token; idempotent
    pub async fn logout(&self, user_id: &str) -> Result<(), AuthError> {
        self.users
            .clear_refresh_token(user_id)
            .await
            .map_err(|e| database_error("Failed to clear refresh token", e))?;

        tracing::info!(user_id = %user_id, "logout");
        Ok(())
    }

    /// Refresh Token 검증 및 새 Access Token 발급
    /// Verify refresh token and issue a new access token (the refresh token is not rotated)
    pub async fn refresh_token(&self, presented: &str) -> Result<TokenResponse, AuthError> {
        // 1. 서명/만료 검증
        if !self.jwt_service.validate_token(presented) {
            return Err(AuthError::InvalidToken);
        }

        // 2. 현재 저장된 토큰인지 확인 (재로그인/로그아웃으로 대체된 토큰 거부)
        let user = self
            .users
            .find_by_refresh_token(presented)
            .await
            .map_err(|e| database_error("Failed to find refresh token", e))?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let stored = user
            .refresh_token
            .as_ref()
            .filter(|stored| stored.token == presented)
            .ok_or(AuthError::InvalidRefreshToken)?;

        // 3. 저장소의 만료 시각 확인
        if stored.expires_at < Utc::now() {
            return Err(AuthError::ExpiredToken);
        }

        let access_token = self.jwt_service.issue_access_token(&user.user_id)?;
        tracing::debug!(user_id = %user.user_id, "access token refreshed");

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt_service.access_token_ttl_secs(),
        })
    }

    // 아이디 사용 가능 여부
    pub async fn is_user_id_available(&self, user_id: &str) -> Result<bool, AuthError> {
        let existing = self
            .users
            .find_by_user_id(user_id)
            .await
            .map_err(|e| database_error("Failed to check user id existence", e))?;

        Ok(existing.is_none())
    }

    pub async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .users
            .find_by_user_id(user_id)
            .await
            .map_err(|e| database_error("Failed to fetch user", e))?
            .ok_or_else(|| AuthError::UserNotFound { user_id: user_id.to_string() })?;

        Ok(UserInfo::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::services::Argon2PasswordHasher;
    use crate::shared::config::JwtConfig;
    use crate::shared::database::InMemoryUserRepository;
    use crate::domains::auth::models::Claims;
    use argon2::Params;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// verify 호출 횟수를 세는 해셔
    struct CountingHasher {
        inner: Argon2PasswordHasher,
        verify_calls: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            self.inner.hash(password)
        }

        fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, password_hash)
        }
    }

    struct Fixture {
        store: Arc<InMemoryUserRepository>,
        jwt: JwtService,
        service: AuthService,
    }

    fn jwt_service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "unit-test-secret-0123456789abcdefghij".to_string(),
            issuer: "solips".to_string(),
            audience: "solips-client".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 86_400,
        })
    }

    fn cheap_hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).unwrap())
    }

    fn fixture() -> Fixture {
        let jwt = jwt_service();
        let store = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(cheap_hasher());
        let service = AuthService::new(store.clone(), hasher, jwt.clone());
        Fixture { store, jwt, service }
    }

    fn signup_request(email: &str, user_id: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            user_id: user_id.to_string(),
            password: "Passw0rd!".to_string(),
        }
    }

    fn login_request(user_id: &str, password: &str) -> LoginRequest {
        LoginRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
        }
    }

    async fn registered() -> Fixture {
        let f = fixture();
        f.service.signup(signup_request("s12345@gsm.hs.kr", "alice")).await.unwrap();
        f
    }

    #[tokio::test]
    async fn test_signup_returns_identity_without_secret() {
        let f = fixture();
        let info = f.service.signup(signup_request("s12345@gsm.hs.kr", "alice")).await.unwrap();

        assert_eq!(info.email, "s12345@gsm.hs.kr");
        assert_eq!(info.user_id, "alice");

        let stored = f.store.find_by_user_id("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Passw0rd!");
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_signup_email_collision_wins_over_user_id() {
        let f = registered().await;

        let err = f.service.signup(signup_request("s12345@gsm.hs.kr", "alice")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail { .. }));

        let err = f.service.signup(signup_request("s54321@gsm.hs.kr", "alice")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUserId { .. }));

        assert_eq!(f.store.len(), 1);
    }

    #[tokio::test]
    async fn test_login_issues_tokens_and_persists_refresh() {
        let f = registered().await;
        let response = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.user.user_id, "alice");
        assert_eq!(f.jwt.extract_subject(&response.access_token).unwrap(), "alice");
        assert_eq!(f.jwt.extract_subject(&response.refresh_token).unwrap(), "alice");

        let stored = f.store.find_by_user_id("alice").await.unwrap().unwrap();
        let slot = stored.refresh_token.unwrap();
        assert_eq!(slot.token, response.refresh_token);
        assert!(slot.expires_at > Utc::now() + Duration::seconds(86_000));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let f = registered().await;

        let unknown = f.service.login(login_request("bob", "Passw0rd!")).await.unwrap_err();
        let wrong = f.service.login(login_request("alice", "wrong")).await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    /// 테스트: 없는 아이디도 비밀번호 검증을 거침
    #[tokio::test]
    async fn test_unknown_user_login_still_verifies_password() {
        let store = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(CountingHasher {
            inner: cheap_hasher(),
            verify_calls: AtomicUsize::new(0),
        });
        let service = AuthService::new(store, hasher.clone(), jwt_service());
        service.signup(signup_request("s12345@gsm.hs.kr", "alice")).await.unwrap();

        let err = service.login(login_request("bob", "Passw0rd!")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(hasher.verify_calls.load(Ordering::SeqCst), 1);

        let err = service.login(login_request("alice", "wrong")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(hasher.verify_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token_only() {
        let f = registered().await;
        let login = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();

        let refreshed = f.service.refresh_token(&login.refresh_token).await.unwrap();
        assert_eq!(f.jwt.extract_subject(&refreshed.access_token).unwrap(), "alice");
        assert_ne!(refreshed.access_token, login.access_token);
        assert_eq!(refreshed.expires_in, 900);

        // 리프레시 토큰은 회전하지 않으므로 재사용 가능
        let stored = f.store.find_by_user_id("alice").await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.unwrap().token, login.refresh_token);
        assert!(f.service.refresh_token(&login.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_second_login_supersedes_first_refresh_token() {
        let f = registered().await;
        let first = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();
        let second = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(f.jwt.validate_token(&first.refresh_token));

        let err = f.service.refresh_token(&first.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
        assert!(f.service.refresh_token(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_invalid_token() {
        let f = registered().await;
        let err = f.service.refresh_token("not-a-token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    /// 테스트: 서명은 맞지만 내장 exp가 지난 리프레시 토큰
    ///
    /// 저장소에 현재 토큰으로 있어도 토큰 검증 단계에서 InvalidToken
    #[tokio::test]
    async fn test_refresh_rejects_token_past_embedded_expiry() {
        let f = registered().await;
        let claims = Claims::new(
            "alice",
            "solips",
            "solips-client",
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );
        let expired = f.jwt.sign(&claims).unwrap();
        assert_eq!(f.jwt.extract_subject(&expired).unwrap(), "alice");

        f.store
            .update_refresh_token("alice", &expired, Utc::now() + Duration::days(1))
            .await
            .unwrap();

        let err = f.service.refresh_token(&expired).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_expired_store_record() {
        let f = registered().await;
        let login = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();

        // 토큰 자체는 유효하지만 저장소 만료 시각이 지남
        f.store
            .update_refresh_token("alice", &login.refresh_token, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        let err = f.service.refresh_token(&login.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent_and_invalidates_refresh() {
        let f = registered().await;
        let login = f.service.login(login_request("alice", "Passw0rd!")).await.unwrap();

        f.service.logout("alice").await.unwrap();
        f.service.logout("alice").await.unwrap();

        let stored = f.store.find_by_user_id("alice").await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        let err = f.service.refresh_token(&login.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_user_id_availability_and_lookup() {
        let f = registered().await;

        assert!(!f.service.is_user_id_available("alice").await.unwrap());
        assert!(f.service.is_user_id_available("bob").await.unwrap());

        assert_eq!(f.service.get_user_info("alice").await.unwrap().email, "s12345@gsm.hs.kr");
        assert!(matches!(
            f.service.get_user_info("bob").await.unwrap_err(),
            AuthError::UserNotFound { .. }
        ));
    }
}
