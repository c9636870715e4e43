// src/domains/auth/services/jwt_service.rs
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domains::auth::models::jwt::Claims;
use crate::shared::config::JwtConfig;
use crate::shared::errors::AuthError;

/// JWT 서비스
/// JWT Service for token generation and verification
///
/// Access / Refresh 토큰은 구조가 같고 TTL만 다르다.
/// 만료는 `exp > now` (strict) 로 직접 검사한다. leeway 없음.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // 서명/발급자/대상만 jsonwebtoken이 검증, 만료는 validate_token_at에서
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_ttl: Duration::seconds(config.access_token_ttl_secs),
            refresh_token_ttl: Duration::seconds(config.refresh_token_ttl_secs),
        }
    }

    /// Access Token 발급 (짧은 수명)
    /// Generate Access Token (short lifetime)
    pub fn issue_access_token(&self, subject: &str) -> Result<String, AuthError> {
        self.sign(&self.claims_for(subject, Utc::now(), self.access_token_ttl))
    }

    /// Refresh Token 발급 (긴 수명, DB에 저장할 것)
    /// Generate Refresh Token (long lifetime, to be stored in DB)
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, AuthError> {
        self.sign(&self.claims_for(subject, Utc::now(), self.refresh_token_ttl))
    }

    fn claims_for(&self, subject: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Claims {
        Claims::new(subject, &self.issuer, &self.audience, issued_at, ttl)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// 토큰 검증: 서명이 맞고 만료 시각이 현재보다 미래일 때만 true
    /// 어떤 입력에도 panic/에러 없이 bool 반환
    pub fn validate_token(&self, token: &str) -> bool {
        self.validate_token_at(token, Utc::now())
    }

    /// 기준 시각을 지정한 검증
    /// Validate against an explicit clock reading
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.decode_claims(token) {
            Ok(claims) => claims.exp > now.timestamp(),
            Err(_) => false,
        }
    }

    /// 토큰에서 subject(userId) 추출
    /// 파싱/서명 검증 실패 시 MalformedToken. 만료 여부는 검사하지 않음
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::MalformedToken(e.to_string()))
    }

    /// 지금 발급하는 리프레시 토큰의 저장용 만료 시각
    /// Expiry to persist alongside a refresh token issued now
    pub fn refresh_token_expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.refresh_token_ttl
    }

    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }
}
