use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::ResetTokenRepository;
use crate::domain::user::reset::NewResetToken;
use crate::domain::user::reset::PasswordResetToken;
use crate::user::errors::UserError;

/// Reset-token persistence.
///
/// `reset_tokens.user_id` carries a UNIQUE constraint, so the
/// one-active-token-per-user invariant holds at the database even when two
/// requests race past the delete.
pub struct PostgresResetTokenRepository {
    pool: PgPool,
}

impl PostgresResetTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ResetTokenRow {
    id: i64,
    token: String,
    user_id: i64,
    expiry_date: DateTime<Utc>,
    used: bool,
}

impl From<ResetTokenRow> for PasswordResetToken {
    fn from(row: ResetTokenRow) -> Self {
        PasswordResetToken {
            id: row.id,
            token: row.token,
            user_id: UserId(row.user_id),
            expiry_date: row.expiry_date,
            used: row.used,
        }
    }
}

#[async_trait]
impl ResetTokenRepository for PostgresResetTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, UserError> {
        let row: Option<ResetTokenRow> = sqlx::query_as(
            "SELECT id, token, user_id, expiry_date, used FROM reset_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(PasswordResetToken::from))
    }

    async fn replace_for_user(&self, token: NewResetToken) -> Result<(), UserError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM reset_tokens WHERE user_id = $1")
            .bind(token.user_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO reset_tokens (token, user_id, expiry_date, used)
            VALUES ($1, $2, $3, FALSE)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.expiry_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    async fn consume(
        &self,
        token: &str,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserError> {
        // Password overwrite and the used flip commit together; a crash
        // cannot leave a live token alongside an already-changed password.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id.0)
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE reset_tokens SET used = TRUE WHERE token = $1 AND used = FALSE",
        )
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        // A concurrent consumer got here first; abandon our write
        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;
            return Err(UserError::InvalidToken);
        }

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    async fn delete_expired(&self) -> Result<u64, UserError> {
        let result = sqlx::query("DELETE FROM reset_tokens WHERE expiry_date < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
