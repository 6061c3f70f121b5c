use crate::types::DbId;

/// Domain-level error shared across the workspace.
///
/// The workflow-discipline variants (`StepOutOfOrder`, `ProfileLocked`,
/// `NotReviewable`) and the verification-ledger variants are distinct from
/// plain `Validation` so the API layer can map each to its own HTTP status
/// and error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Step out of order: {0}")]
    StepOutOfOrder(String),

    #[error("Profile locked: {0}")]
    ProfileLocked(String),

    #[error("Not reviewable: {0}")]
    NotReviewable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("No pending verification code")]
    NoPendingCode,

    #[error("Verification code mismatch ({attempts_remaining} attempts remaining)")]
    CodeMismatch { attempts_remaining: i32 },

    #[error("Verification attempts exhausted")]
    AttemptsExhausted,

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
