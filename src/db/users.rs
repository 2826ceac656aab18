//! User persistence: the repository capability and its Postgres implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

pub(crate) const DUPLICATE_EMAIL: &str = "Email already registered";
pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Store-backed user CRUD. Email uniqueness is the store's job, not the caller's.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert and return the stored row. `AppError::Duplicate` when the email is taken.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// Replace email, hash and confirmation flag of an existing row.
    async fn update(&self, user: &User) -> AppResult<User>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Every user, ordered by id.
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn confirm_email(&self, email: &str) -> AppResult<()>;
}

/// Maps the store's generic duplicate/not-found errors to user-facing messages.
fn user_error(e: AppError) -> AppError {
    match e {
        AppError::Duplicate(detail) => {
            debug!(detail = %detail, "unique constraint rejected user write");
            AppError::Duplicate(DUPLICATE_EMAIL.to_string())
        }
        AppError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
        other => other,
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, email_confirmed
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_error(e.into()))?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, email_confirmed FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_error(e.into()))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, email_confirmed FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_error(e.into()))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, email_confirmed = $4
            WHERE id = $1
            RETURNING id, email, password_hash, email_confirmed
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.email_confirmed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_error(e.into()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<()> {
        let r = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if r.rows_affected() == 0 {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, email_confirmed FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn confirm_email(&self, email: &str) -> AppResult<()> {
        let r = sqlx::query("UPDATE users SET email_confirmed = TRUE WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        if r.rows_affected() == 0 {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
