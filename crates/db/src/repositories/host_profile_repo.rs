//! Repository for the `host_profiles` table.
//!
//! Mutating methods take `&mut PgConnection` so the caller can wrap
//! lock-check-update sequences in one transaction; the row lock acquired by
//! [`HostProfileRepo::lock_by_user`] serializes concurrent step submissions
//! for the same owner.

use sqlx::{PgConnection, PgPool};

use eygar_core::host_profile::{ProfileStatus, ProfileStep, StepFlags};
use eygar_core::types::DbId;

use crate::models::host_profile::HostProfile;

/// Column list for `host_profiles` queries.
const COLUMNS: &str = "id, user_id, status, current_step, \
     business_completed, identity_completed, contact_completed, submission_completed, \
     business_data, identity_data, contact_data, submission_data, \
     review_notes, reviewed_by, reviewed_at, submitted_at, created_at, updated_at";

/// The JSONB and flag columns backing a submittable step.
fn step_columns(step: ProfileStep) -> Option<(&'static str, &'static str)> {
    match step {
        ProfileStep::BusinessProfile => Some(("business_data", "business_completed")),
        ProfileStep::IdentityVerification => Some(("identity_data", "identity_completed")),
        ProfileStep::ContactDetails => Some(("contact_data", "contact_completed")),
        ProfileStep::ReviewSubmission => Some(("submission_data", "submission_completed")),
        ProfileStep::Completed => None,
    }
}

/// Provides persistence operations for host profiles.
pub struct HostProfileRepo;

impl HostProfileRepo {
    /// Fetch the profile for a user, creating an empty draft if none exists.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<HostProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO host_profiles (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HostProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM host_profiles WHERE id = $1");
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by its owner.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<HostProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM host_profiles WHERE user_id = $1");
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the owner's profile row for the duration of the transaction.
    pub async fn lock_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<HostProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM host_profiles WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Lock a profile row by ID for the duration of the transaction.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<HostProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM host_profiles WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Persist a validated step record, set its flag, and recompute the
    /// derived `current_step`.
    pub async fn save_step(
        conn: &mut PgConnection,
        id: DbId,
        step: ProfileStep,
        data: &serde_json::Value,
        flags_after: StepFlags,
    ) -> Result<HostProfile, sqlx::Error> {
        let (data_col, flag_col) =
            step_columns(step).expect("save_step called with a submittable step");
        let query = format!(
            "UPDATE host_profiles \
             SET {data_col} = $2, {flag_col} = TRUE, current_step = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(id)
            .bind(data)
            .bind(flags_after.current_step().as_str())
            .fetch_one(&mut *conn)
            .await
    }

    /// Transition a fully completed draft to `submitted`. `submitted_at` is
    /// stamped only on the first submission.
    pub async fn mark_submitted(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<HostProfile, sqlx::Error> {
        let query = format!(
            "UPDATE host_profiles \
             SET status = 'submitted', \
                 submitted_at = COALESCE(submitted_at, NOW()), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Record an admin decision: new status, reviewer, notes, timestamp.
    pub async fn apply_review(
        conn: &mut PgConnection,
        id: DbId,
        new_status: ProfileStatus,
        notes: Option<&str>,
        reviewer_id: DbId,
    ) -> Result<HostProfile, sqlx::Error> {
        let query = format!(
            "UPDATE host_profiles \
             SET status = $2, review_notes = $3, reviewed_by = $4, \
                 reviewed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(id)
            .bind(new_status.as_str())
            .bind(notes)
            .bind(reviewer_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Profiles awaiting an admin decision, most recently submitted first.
    pub async fn list_reviewable(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HostProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM host_profiles \
             WHERE status IN ('submitted', 'pending', 'on_hold') \
             ORDER BY submitted_at DESC NULLS LAST \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, HostProfile>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flip the stored contact record's `mobile_verified` field to
    /// `verified`. No-op when the contact step has not been saved.
    pub async fn set_mobile_verified(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE host_profiles \
             SET contact_data = jsonb_set(contact_data, '{mobile_verified}', '\"verified\"'), \
                 updated_at = NOW() \
             WHERE id = $1 AND contact_data IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
