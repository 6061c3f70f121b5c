//! Host-profile state machine.
//!
//! Defines the status and step enumerations, the per-step completion flags,
//! and the pure transition checks the API and repository layers apply before
//! mutating a profile. The rules:
//!
//! - `current_step` is always the first incomplete step in the fixed order
//!   (business, identity, contact, submission), or `completed`.
//! - `completion_percentage` is 25 times the number of completed steps.
//! - Step data may only change while the profile status is `draft`; once it
//!   leaves draft the profile is locked for user edits.
//! - A step may be submitted if it is the current step or an
//!   already-completed step (re-edits before submission are allowed).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Profile status
// ---------------------------------------------------------------------------

/// Lifecycle status of a host profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Draft,
    Submitted,
    Pending,
    Approved,
    Rejected,
    OnHold,
}

impl ProfileStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "on_hold" => Ok(Self::OnHold),
            _ => Err(CoreError::Validation(format!(
                "Invalid profile status '{s}'. Must be one of: draft, submitted, pending, \
                 approved, rejected, on_hold"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::OnHold => "on_hold",
        }
    }

    /// Whether an admin decision may be applied in this status.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Submitted | Self::Pending | Self::OnHold)
    }

    /// Whether the owner may still edit step data.
    pub fn allows_step_edits(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

// ---------------------------------------------------------------------------
// Profile steps
// ---------------------------------------------------------------------------

/// The four ordered stages of host-profile completion, plus the terminal
/// `completed` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStep {
    BusinessProfile,
    IdentityVerification,
    ContactDetails,
    ReviewSubmission,
    Completed,
}

/// The submittable steps in order. `Completed` is a derived marker, never a
/// submission target.
pub const STEP_ORDER: [ProfileStep; 4] = [
    ProfileStep::BusinessProfile,
    ProfileStep::IdentityVerification,
    ProfileStep::ContactDetails,
    ProfileStep::ReviewSubmission,
];

impl ProfileStep {
    /// Parse a step string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "business_profile" => Ok(Self::BusinessProfile),
            "identity_verification" => Ok(Self::IdentityVerification),
            "contact_details" => Ok(Self::ContactDetails),
            "review_submission" => Ok(Self::ReviewSubmission),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid profile step '{s}'. Must be one of: business_profile, \
                 identity_verification, contact_details, review_submission, completed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessProfile => "business_profile",
            Self::IdentityVerification => "identity_verification",
            Self::ContactDetails => "contact_details",
            Self::ReviewSubmission => "review_submission",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::BusinessProfile => "Business Profile",
            Self::IdentityVerification => "Identity Verification",
            Self::ContactDetails => "Contact Details",
            Self::ReviewSubmission => "Review Submission",
            Self::Completed => "Completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Step flags
// ---------------------------------------------------------------------------

/// Per-step completion flags. A flag is true iff the step's data record is
/// present and passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFlags {
    pub business: bool,
    pub identity: bool,
    pub contact: bool,
    pub submission: bool,
}

impl StepFlags {
    /// Read the flag for a submittable step. `Completed` has no flag.
    pub fn get(&self, step: ProfileStep) -> bool {
        match step {
            ProfileStep::BusinessProfile => self.business,
            ProfileStep::IdentityVerification => self.identity,
            ProfileStep::ContactDetails => self.contact,
            ProfileStep::ReviewSubmission => self.submission,
            ProfileStep::Completed => self.is_complete(),
        }
    }

    /// Return a copy with the given step's flag set.
    pub fn with_completed(mut self, step: ProfileStep) -> Self {
        match step {
            ProfileStep::BusinessProfile => self.business = true,
            ProfileStep::IdentityVerification => self.identity = true,
            ProfileStep::ContactDetails => self.contact = true,
            ProfileStep::ReviewSubmission => self.submission = true,
            ProfileStep::Completed => {}
        }
        self
    }

    /// Number of completed steps (0..=4).
    pub fn completed_count(&self) -> u8 {
        [self.business, self.identity, self.contact, self.submission]
            .iter()
            .filter(|f| **f)
            .count() as u8
    }

    /// Whether all four steps are complete.
    pub fn is_complete(&self) -> bool {
        self.business && self.identity && self.contact && self.submission
    }

    /// Whether the three data steps preceding submission are complete.
    pub fn ready_for_submission(&self) -> bool {
        self.business && self.identity && self.contact
    }

    /// The first incomplete step in the fixed order, or `Completed`.
    pub fn current_step(&self) -> ProfileStep {
        for step in STEP_ORDER {
            if !self.get(step) {
                return step;
            }
        }
        ProfileStep::Completed
    }

    /// Completion percentage: 25 per completed step.
    pub fn completion_percentage(&self) -> i32 {
        i32::from(self.completed_count()) * 25
    }
}

// ---------------------------------------------------------------------------
// Transition checks
// ---------------------------------------------------------------------------

/// Reject step submissions once the profile has left `draft`.
pub fn ensure_editable(status: ProfileStatus) -> Result<(), CoreError> {
    if status.allows_step_edits() {
        Ok(())
    } else {
        Err(CoreError::ProfileLocked(format!(
            "Profile is {} and no longer accepts step submissions",
            status.as_str()
        )))
    }
}

/// Reject a step that is neither the current step nor an already-completed
/// step. Re-editing a completed step is allowed while the profile is in
/// draft; skipping ahead is not.
pub fn ensure_step_allowed(flags: StepFlags, step: ProfileStep) -> Result<(), CoreError> {
    if step == ProfileStep::Completed {
        return Err(CoreError::StepOutOfOrder(
            "'completed' is not a submittable step".to_string(),
        ));
    }
    if step == flags.current_step() || flags.get(step) {
        return Ok(());
    }
    Err(CoreError::StepOutOfOrder(format!(
        "Cannot submit step '{}' yet. Complete '{}' first.",
        step.as_str(),
        flags.current_step().as_str()
    )))
}

/// Check that a profile with the given flags may transition to `submitted`.
///
/// The submission step itself is about to be marked complete, so only the
/// three preceding data steps are required here.
pub fn ensure_ready_for_submission(flags: StepFlags) -> Result<(), CoreError> {
    if flags.ready_for_submission() {
        Ok(())
    } else {
        Err(CoreError::StepOutOfOrder(
            "All previous steps must be completed before submission".to_string(),
        ))
    }
}
