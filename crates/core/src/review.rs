//! Admin review decisions and status transitions.
//!
//! The review workflow resolves a submitted profile: approve and reject are
//! terminal, hold parks the profile (still reviewable) for a later decision.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::host_profile::ProfileStatus;

/// Maximum length for reviewer notes.
pub const MAX_REVIEW_NOTES_LENGTH: usize = 2_000;

/// An admin/moderator decision on a submitted profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
    Hold,
}

impl ReviewDecision {
    /// Parse a decision string from a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "hold" => Ok(Self::Hold),
            _ => Err(CoreError::Validation(format!(
                "Invalid review decision '{s}'. Must be one of: approve, reject, hold"
            ))),
        }
    }

    /// Convert to a wire-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Hold => "hold",
        }
    }

    /// The status a reviewable profile moves to under this decision.
    pub fn resulting_status(&self) -> ProfileStatus {
        match self {
            Self::Approve => ProfileStatus::Approved,
            Self::Reject => ProfileStatus::Rejected,
            Self::Hold => ProfileStatus::OnHold,
        }
    }
}

/// Compute the status transition for a review decision.
///
/// Fails with `NotReviewable` unless the current status is one of
/// submitted, pending, or on_hold. Holding an already on-hold profile is
/// accepted and leaves the status unchanged.
pub fn review_transition(
    status: ProfileStatus,
    decision: ReviewDecision,
) -> Result<ProfileStatus, CoreError> {
    if !status.is_reviewable() {
        return Err(CoreError::NotReviewable(format!(
            "Profile with status '{}' cannot be reviewed",
            status.as_str()
        )));
    }
    Ok(decision.resulting_status())
}

/// Validate reviewer notes length.
pub fn validate_review_notes(notes: &str) -> Result<(), CoreError> {
    if notes.len() > MAX_REVIEW_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review notes exceed maximum length of {MAX_REVIEW_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_from_str_valid() {
        assert_eq!(
            ReviewDecision::from_str_db("approve").unwrap(),
            ReviewDecision::Approve
        );
        assert_eq!(
            ReviewDecision::from_str_db("reject").unwrap(),
            ReviewDecision::Reject
        );
        assert_eq!(
            ReviewDecision::from_str_db("hold").unwrap(),
            ReviewDecision::Hold
        );
    }

    #[test]
    fn decision_from_str_invalid() {
        assert!(ReviewDecision::from_str_db("approved").is_err());
        assert!(ReviewDecision::from_str_db("").is_err());
    }

    #[test]
    fn submitted_transitions() {
        assert_eq!(
            review_transition(ProfileStatus::Submitted, ReviewDecision::Approve).unwrap(),
            ProfileStatus::Approved
        );
        assert_eq!(
            review_transition(ProfileStatus::Submitted, ReviewDecision::Reject).unwrap(),
            ProfileStatus::Rejected
        );
        assert_eq!(
            review_transition(ProfileStatus::Submitted, ReviewDecision::Hold).unwrap(),
            ProfileStatus::OnHold
        );
    }

    #[test]
    fn on_hold_can_be_resolved() {
        assert_eq!(
            review_transition(ProfileStatus::OnHold, ReviewDecision::Approve).unwrap(),
            ProfileStatus::Approved
        );
        assert_eq!(
            review_transition(ProfileStatus::OnHold, ReviewDecision::Reject).unwrap(),
            ProfileStatus::Rejected
        );
    }

    #[test]
    fn holding_on_hold_is_a_no_op_transition() {
        assert_eq!(
            review_transition(ProfileStatus::OnHold, ReviewDecision::Hold).unwrap(),
            ProfileStatus::OnHold
        );
    }

    #[test]
    fn pending_is_reviewable() {
        assert_eq!(
            review_transition(ProfileStatus::Pending, ReviewDecision::Approve).unwrap(),
            ProfileStatus::Approved
        );
    }

    #[test]
    fn draft_and_terminal_statuses_are_not_reviewable() {
        for status in [
            ProfileStatus::Draft,
            ProfileStatus::Approved,
            ProfileStatus::Rejected,
        ] {
            for decision in [
                ReviewDecision::Approve,
                ReviewDecision::Reject,
                ReviewDecision::Hold,
            ] {
                let err = review_transition(status, decision).unwrap_err();
                assert!(matches!(err, CoreError::NotReviewable(_)));
            }
        }
    }

    #[test]
    fn review_notes_length_cap() {
        assert!(validate_review_notes("looks good").is_ok());
        assert!(validate_review_notes(&"x".repeat(MAX_REVIEW_NOTES_LENGTH)).is_ok());
        assert!(validate_review_notes(&"x".repeat(MAX_REVIEW_NOTES_LENGTH + 1)).is_err());
    }
}
