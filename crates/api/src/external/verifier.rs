//! Mock implementation of the [`IdentityVerifier`] trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use eygar_core::error::CoreError;
use eygar_core::external::{IdentityDocument, IdentityVerifier, VerificationOutcome};
use eygar_core::steps::identity::{ExtractedIdentity, VerificationStatus};

/// Minimum document-number length the mock treats as verifiable.
const MIN_DOCUMENT_NUMBER_LENGTH: usize = 8;

/// Deterministic stand-in for a real document-verification provider.
///
/// Verifies any document whose number is at least eight characters long and
/// fails the rest. Successful verifications carry a canned extraction; a
/// real provider returns the fields it read off the document.
pub struct MockIdentityVerifier;

/// The extraction every successful mock verification returns.
fn canned_extraction() -> ExtractedIdentity {
    ExtractedIdentity {
        full_name: Some("John Doe".to_string()),
        fathers_name: Some("Richard Doe".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
        address_line1: Some("123 Main St".to_string()),
        city: Some("Cityville".to_string()),
        state: Some("State".to_string()),
        postal_code: Some("12345".to_string()),
        country: Some("Country".to_string()),
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, document: &IdentityDocument) -> Result<VerificationOutcome, CoreError> {
        let outcome = if document.document_number.trim().len() >= MIN_DOCUMENT_NUMBER_LENGTH {
            VerificationOutcome {
                status: VerificationStatus::Verified,
                notes: Some("Document verified successfully".to_string()),
                extracted: Some(canned_extraction()),
            }
        } else {
            VerificationOutcome {
                status: VerificationStatus::Failed,
                notes: Some(format!(
                    "Document number must be at least {MIN_DOCUMENT_NUMBER_LENGTH} characters"
                )),
                extracted: None,
            }
        };

        tracing::debug!(
            document_type = document.document_type.as_str(),
            status = ?outcome.status,
            "Mock identity verification completed"
        );
        Ok(outcome)
    }
}
