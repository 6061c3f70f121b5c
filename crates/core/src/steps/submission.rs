//! Review-submission step (step 4).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::optional_text;

/// Maximum length for the free-text notes accompanying a submission.
pub const MAX_ADDITIONAL_NOTES_LENGTH: usize = 2_000;

/// Raw client payload for the submission step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub privacy_policy_accepted: bool,
    pub additional_notes: Option<String>,
}

/// Normalized submission record stored on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionData {
    pub terms_accepted: bool,
    pub privacy_policy_accepted: bool,
    pub additional_notes: Option<String>,
}

/// Validate the submission step: both consents must be given and the notes
/// must fit the length cap.
pub fn validate_submission(payload: SubmissionPayload) -> Result<SubmissionData, CoreError> {
    if !payload.terms_accepted {
        return Err(CoreError::Validation(
            "terms_accepted: the terms and conditions must be accepted".to_string(),
        ));
    }
    if !payload.privacy_policy_accepted {
        return Err(CoreError::Validation(
            "privacy_policy_accepted: the privacy policy must be accepted".to_string(),
        ));
    }
    if let Some(notes) = &payload.additional_notes {
        if notes.len() > MAX_ADDITIONAL_NOTES_LENGTH {
            return Err(CoreError::Validation(format!(
                "additional_notes: exceeds maximum length of {MAX_ADDITIONAL_NOTES_LENGTH} \
                 characters"
            )));
        }
    }

    Ok(SubmissionData {
        terms_accepted: true,
        privacy_policy_accepted: true,
        additional_notes: optional_text(payload.additional_notes),
    })
}
