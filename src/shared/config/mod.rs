// 애플리케이션 설정
// 역할: 시작 시 한 번 환경 변수에서 읽고, 이후에는 불변으로 주입
// Process-wide configuration, loaded once at startup and injected into services

use regex::Regex;
use thiserror::Error;

/// 기본값
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ISSUER: &str = "solips";
const DEFAULT_AUDIENCE: &str = "solips-client";
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 14 * 24 * 60 * 60;
const DEFAULT_EMAIL_PATTERN: &str = r"^s\d{5}@gsm\.hs\.kr$";

/// HS256 키는 최소 256비트
/// HS256 keys must be at least 256 bits
const MIN_SECRET_BYTES: usize = 32;

/// 설정 에러
/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// JWT 설정 (비밀키, 발급자, TTL)
/// JWT settings: signing secret, issuer/audience and both token lifetimes
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

/// 서버 설정
/// HTTP listener and storage settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// 없으면 인메모리 저장소 사용
    /// When absent the in-memory credential store is used
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub cors_origin: Option<String>,
}

/// 회원가입 입력 정책
#[derive(Debug, Clone)]
pub struct SignupPolicy {
    pub email_pattern: Regex,
}

impl Default for SignupPolicy {
    fn default() -> Self {
        Self {
            email_pattern: Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern is valid"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub signup: SignupPolicy,
}

impl AppConfig {
    /// 환경 변수에서 설정 읽기
    /// Read configuration from the process environment
    ///
    /// | Variable                        | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `JWT_SECRET`                    | required (>= 32 bytes)  |
    /// | `JWT_ISSUER`                    | `solips`                |
    /// | `JWT_AUDIENCE`                  | `solips-client`         |
    /// | `JWT_ACCESS_TOKEN_EXPIRATION`   | `3600` (seconds)        |
    /// | `JWT_REFRESH_TOKEN_EXPIRATION`  | `1209600` (seconds)     |
    /// | `BIND_ADDR`                     | `0.0.0.0:8080`          |
    /// | `DATABASE_URL`                  | unset (in-memory store) |
    /// | `DATABASE_MAX_CONNECTIONS`      | `5`                     |
    /// | `CORS_ORIGIN`                   | unset (no CORS layer)   |
    /// | `SIGNUP_EMAIL_PATTERN`          | `^s\d{5}@gsm\.hs\.kr$`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 key-value 소스에서 설정 읽기 (테스트용으로도 사용)
    /// Read configuration from an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_BYTES),
            });
        }

        let jwt = JwtConfig {
            secret,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            access_token_ttl_secs: parse_ttl(
                "JWT_ACCESS_TOKEN_EXPIRATION",
                get("JWT_ACCESS_TOKEN_EXPIRATION"),
                DEFAULT_ACCESS_TOKEN_TTL_SECS,
            )?,
            refresh_token_ttl_secs: parse_ttl(
                "JWT_REFRESH_TOKEN_EXPIRATION",
                get("JWT_REFRESH_TOKEN_EXPIRATION"),
                DEFAULT_REFRESH_TOKEN_TTL_SECS,
            )?,
        };

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("expected a positive integer, got '{}'", raw),
                }
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let server = ServerConfig {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL"),
            max_connections,
            cors_origin: get("CORS_ORIGIN"),
        };

        let signup = match get("SIGNUP_EMAIL_PATTERN") {
            Some(pattern) => SignupPolicy {
                email_pattern: Regex::new(&pattern).map_err(|e| ConfigError::Invalid {
                    name: "SIGNUP_EMAIL_PATTERN",
                    reason: e.to_string(),
                })?,
            },
            None => SignupPolicy::default(),
        };

        Ok(Self { server, jwt, signup })
    }
}

fn parse_ttl(name: &'static str, raw: Option<String>, default: i64) -> Result<i64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    raw.parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("expected a positive number of seconds, got '{}'", raw),
        })
}
