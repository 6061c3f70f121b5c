//! Repository for the `profile_status_history` table.

use sqlx::{PgConnection, PgPool};

use eygar_core::types::DbId;

use crate::models::host_profile::StatusHistoryEntry;

/// Column list for `profile_status_history` queries.
const COLUMNS: &str =
    "id, host_profile_id, old_status, new_status, changed_by, change_reason, created_at";

/// Append-only record of profile status transitions.
pub struct StatusHistoryRepo;

impl StatusHistoryRepo {
    /// Record a status transition. Runs on the caller's transaction so the
    /// history row commits atomically with the transition itself.
    pub async fn record(
        conn: &mut PgConnection,
        host_profile_id: DbId,
        old_status: &str,
        new_status: &str,
        changed_by: DbId,
        change_reason: Option<&str>,
    ) -> Result<StatusHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO profile_status_history \
             (host_profile_id, old_status, new_status, changed_by, change_reason) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusHistoryEntry>(&query)
            .bind(host_profile_id)
            .bind(old_status)
            .bind(new_status)
            .bind(changed_by)
            .bind(change_reason)
            .fetch_one(&mut *conn)
            .await
    }

    /// Transition history for a profile, newest first.
    pub async fn list_for_profile(
        pool: &PgPool,
        host_profile_id: DbId,
    ) -> Result<Vec<StatusHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profile_status_history \
             WHERE host_profile_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, StatusHistoryEntry>(&query)
            .bind(host_profile_id)
            .fetch_all(pool)
            .await
    }
}
