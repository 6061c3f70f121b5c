//! Mobile verification code entity model.

use sqlx::FromRow;

use eygar_core::types::{DbId, Timestamp};
use eygar_core::verification::PendingCode;

/// A row from the `verification_codes` table.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationCode {
    pub id: DbId,
    pub user_id: DbId,
    pub code: String,
    pub expires_at: Timestamp,
    pub attempts_remaining: i32,
    pub consumed: bool,
    pub created_at: Timestamp,
}

impl VerificationCode {
    /// View of the row the ledger rules operate on.
    pub fn as_pending(&self) -> PendingCode {
        PendingCode {
            code: self.code.clone(),
            expires_at: self.expires_at,
            attempts_remaining: self.attempts_remaining,
            consumed: self.consumed,
        }
    }
}
