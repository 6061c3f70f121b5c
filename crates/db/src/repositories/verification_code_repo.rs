//! Repository for the `verification_codes` table.
//!
//! Rows are never deleted by the service; superseded and exhausted codes
//! are marked consumed and expiry is evaluated lazily by the ledger rules.
//!
//! Send-path methods take `&mut PgConnection` so the caller can run the
//! cooldown check, supersession, and insert in one transaction under the
//! owner's profile-row lock.

use sqlx::{PgConnection, PgPool};

use eygar_core::types::{DbId, Timestamp};

use crate::models::verification_code::VerificationCode;

/// Column list for `verification_codes` queries.
const COLUMNS: &str = "id, user_id, code, expires_at, attempts_remaining, consumed, created_at";

/// Provides persistence operations for mobile verification codes.
pub struct VerificationCodeRepo;

impl VerificationCodeRepo {
    /// Insert a freshly generated code.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        code: &str,
        expires_at: Timestamp,
        attempts_remaining: i32,
    ) -> Result<VerificationCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO verification_codes (user_id, code, expires_at, attempts_remaining) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(user_id)
            .bind(code)
            .bind(expires_at)
            .bind(attempts_remaining)
            .fetch_one(&mut *conn)
            .await
    }

    /// The most recent code for a user regardless of state. Used for the
    /// resend cooldown.
    pub async fn latest_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<VerificationCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_codes \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// The most recent unconsumed code for a user. Expiry and attempt
    /// exhaustion are checked by the ledger rules, not here.
    pub async fn active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<VerificationCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_codes \
             WHERE user_id = $1 AND NOT consumed \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark every unconsumed code for a user as consumed. A new send always
    /// supersedes earlier codes.
    pub async fn invalidate_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE verification_codes SET consumed = TRUE WHERE user_id = $1 AND NOT consumed")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Spend one attempt after a mismatch.
    pub async fn decrement_attempts(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE verification_codes \
             SET attempts_remaining = attempts_remaining - 1 \
             WHERE id = $1 AND attempts_remaining > 0",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a code consumed (successful confirmation or exhaustion).
    pub async fn consume(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE verification_codes SET consumed = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
