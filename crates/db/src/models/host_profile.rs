//! Host-profile entity model.
//!
//! One row per owner. Step payloads are stored as JSONB documents
//! (`business_data`, `identity_data`, `contact_data`, `submission_data`),
//! so the per-owner serialization needed by the workflow is a single
//! row-level `FOR UPDATE`.

use serde::Serialize;
use sqlx::FromRow;

use eygar_core::error::CoreError;
use eygar_core::host_profile::{ProfileStatus, StepFlags};
use eygar_core::types::{DbId, Timestamp};

/// A row from the `host_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub current_step: String,
    pub business_completed: bool,
    pub identity_completed: bool,
    pub contact_completed: bool,
    pub submission_completed: bool,
    pub business_data: Option<serde_json::Value>,
    pub identity_data: Option<serde_json::Value>,
    pub contact_data: Option<serde_json::Value>,
    pub submission_data: Option<serde_json::Value>,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HostProfile {
    /// The row's completion flags as the domain type.
    pub fn step_flags(&self) -> StepFlags {
        StepFlags {
            business: self.business_completed,
            identity: self.identity_completed,
            contact: self.contact_completed,
            submission: self.submission_completed,
        }
    }

    /// The row's status as the domain enum.
    pub fn profile_status(&self) -> Result<ProfileStatus, CoreError> {
        ProfileStatus::from_str_db(&self.status)
    }
}

/// A row from the `profile_status_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusHistoryEntry {
    pub id: DbId,
    pub host_profile_id: DbId,
    pub old_status: String,
    pub new_status: String,
    pub changed_by: Option<DbId>,
    pub change_reason: Option<String>,
    pub created_at: Timestamp,
}
