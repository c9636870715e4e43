use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::auth::models::user::{NewUser, StoredRefreshToken, User};
use crate::shared::database::repositories::auth::user_store::{DuplicateField, UserStore};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";
const USER_ID_UNIQUE_CONSTRAINT: &str = "users_user_id_key";

/// PostgreSQL 사용자 저장소
/// PostgreSQL-backed user store. Every write is a single statement.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>> {
        let sql = format!(
            r#"
            SELECT id, email, user_id, password_hash, refresh_token, refresh_token_expires_at, created_at
            FROM users
            WHERE {} = $1
            LIMIT 1
            "#,
            column
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch user by {}", column))?;

        Ok(row.as_ref().map(map_user))
    }
}

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        user_id: row.get("user_id"),
        password_hash: row.get("password_hash"),
        refresh_token: StoredRefreshToken::from_columns(
            row.get("refresh_token"),
            row.get("refresh_token_expires_at"),
        ),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    // 이메일로 사용자 조회 (중복 체크용)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one("email", email).await
    }

    // 아이디로 사용자 조회 (로그인용)
    // Get user by user id (for login)
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>> {
        self.find_one("user_id", user_id).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>> {
        self.find_one("refresh_token", token).await
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, user_id, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, user_id, password_hash, refresh_token, refresh_token_expires_at, created_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.user_id)
        .bind(&new_user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(map_user(&row)),
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) => {
                Err(DuplicateField::Email.into())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some(USER_ID_UNIQUE_CONSTRAINT) => {
                Err(DuplicateField::UserId.into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to create user")),
        }
    }

    async fn update_refresh_token(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $1, refresh_token_expires_at = $2
            WHERE user_id = $3
            "#,
        )
        .bind(token)
        .bind(expires_at)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to update refresh token")?;

        Ok(())
    }

    async fn clear_refresh_token(&self, user_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = NULL, refresh_token_expires_at = NULL
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to clear refresh token")?;

        Ok(())
    }
}
