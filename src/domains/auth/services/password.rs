use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _};

use crate::shared::errors::AuthError;

/// 비밀번호 해싱 (단방향 해시 + 검증)
/// One-way password hashing capability
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// 일치하지 않으면 Ok(false)
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id (PHC 문자열, 랜덤 salt)
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 비용 파라미터 지정 (테스트에서는 낮은 비용 사용)
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashing(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::PasswordHashing(format!("Invalid password hash: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("Passw0rd!").unwrap();

        assert_ne!(hash, "Passw0rd!");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("Passw0rd!", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let hasher = hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let err = hasher().verify("Passw0rd!", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AuthError::PasswordHashing(_)));
    }
}
