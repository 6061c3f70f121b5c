//! Identity-verification step (step 2).
//!
//! Structural validation only: document type, number, and images. The
//! external verification outcome is attached afterwards via
//! [`IdentityData::with_outcome`] and does not gate step completion — a
//! `failed` verification is stored but the step still counts as complete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::{validate_upload, FileUpload};

/// Maximum document image size: 5 MiB.
pub const MAX_DOCUMENT_IMAGE_BYTES: i64 = 5 * 1024 * 1024;

/// Allowed document image formats.
pub const DOCUMENT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Accepted identity document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    NationalId,
    Passport,
    DrivingLicense,
}

impl DocumentType {
    /// Parse a document type string.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "national_id" => Ok(Self::NationalId),
            "passport" => Ok(Self::Passport),
            "driving_license" => Ok(Self::DrivingLicense),
            _ => Err(CoreError::Validation(format!(
                "Invalid document type '{s}'. Must be one of: national_id, passport, \
                 driving_license"
            ))),
        }
    }

    /// Convert to a wire-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::Passport => "passport",
            Self::DrivingLicense => "driving_license",
        }
    }

    /// Two-sided documents require a back image.
    pub fn requires_back_image(&self) -> bool {
        matches!(self, Self::NationalId | Self::DrivingLicense)
    }
}

/// Outcome of the external document verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
}

/// Fields the verification service extracts from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIdentity {
    pub full_name: Option<String>,
    pub fathers_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Raw client payload for the identity-verification step.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityPayload {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub front_image: Option<FileUpload>,
    pub back_image: Option<FileUpload>,
}

/// Normalized identity record stored on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityData {
    pub document_type: DocumentType,
    pub document_number: String,
    pub front_image: FileUpload,
    pub back_image: Option<FileUpload>,
    pub verification_status: VerificationStatus,
    pub verification_notes: Option<String>,
    pub extracted: Option<ExtractedIdentity>,
}

impl IdentityData {
    /// Attach the external verification outcome to a validated record.
    pub fn with_outcome(
        mut self,
        status: VerificationStatus,
        notes: Option<String>,
        extracted: Option<ExtractedIdentity>,
    ) -> Self {
        self.verification_status = status;
        self.verification_notes = notes;
        self.extracted = extracted;
        self
    }
}

/// Validate and normalize an identity payload.
///
/// The returned record carries `verification_status: Pending`; the caller
/// runs the external verification and attaches the outcome.
pub fn validate_identity(payload: IdentityPayload) -> Result<IdentityData, CoreError> {
    let document_type = match payload.document_type.as_deref() {
        Some(s) => DocumentType::from_str_db(s)?,
        None => {
            return Err(CoreError::Validation(
                "document_type: must not be empty".to_string(),
            ))
        }
    };
    let document_number = super::require_text("document_number", payload.document_number)?;

    let front_image = payload.front_image.ok_or_else(|| {
        CoreError::Validation("front_image: a front document image is required".to_string())
    })?;
    validate_upload(
        "front_image",
        &front_image,
        DOCUMENT_IMAGE_EXTENSIONS,
        MAX_DOCUMENT_IMAGE_BYTES,
    )?;

    if document_type.requires_back_image() && payload.back_image.is_none() {
        return Err(CoreError::Validation(format!(
            "back_image: a back image is required for document type '{}'",
            document_type.as_str()
        )));
    }
    if let Some(back) = &payload.back_image {
        validate_upload(
            "back_image",
            back,
            DOCUMENT_IMAGE_EXTENSIONS,
            MAX_DOCUMENT_IMAGE_BYTES,
        )?;
    }

    Ok(IdentityData {
        document_type,
        document_number,
        front_image,
        back_image: payload.back_image,
        verification_status: VerificationStatus::Pending,
        verification_notes: None,
        extracted: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> FileUpload {
        FileUpload {
            storage_key: format!("identity/{name}"),
            file_name: name.to_string(),
            size_bytes: 512 * 1024,
        }
    }

    fn valid_payload() -> IdentityPayload {
        IdentityPayload {
            document_type: Some("national_id".to_string()),
            document_number: Some("AB12345678".to_string()),
            front_image: Some(image("front.jpg")),
            back_image: Some(image("back.jpg")),
        }
    }

    #[test]
    fn document_type_roundtrip() {
        for dt in [
            DocumentType::NationalId,
            DocumentType::Passport,
            DocumentType::DrivingLicense,
        ] {
            assert_eq!(DocumentType::from_str_db(dt.as_str()).unwrap(), dt);
        }
        assert!(DocumentType::from_str_db("voter_card").is_err());
    }

    #[test]
    fn two_sided_documents_require_back_image() {
        assert!(DocumentType::NationalId.requires_back_image());
        assert!(DocumentType::DrivingLicense.requires_back_image());
        assert!(!DocumentType::Passport.requires_back_image());
    }

    #[test]
    fn valid_payload_starts_pending() {
        let data = validate_identity(valid_payload()).unwrap();
        assert_eq!(data.verification_status, VerificationStatus::Pending);
        assert!(data.extracted.is_none());
    }

    #[test]
    fn missing_back_image_rejected_for_national_id() {
        let mut p = valid_payload();
        p.back_image = None;
        let err = validate_identity(p).unwrap_err();
        assert!(err.to_string().contains("back_image"));
    }

    #[test]
    fn passport_needs_no_back_image() {
        let p = IdentityPayload {
            document_type: Some("passport".to_string()),
            document_number: Some("P9876543".to_string()),
            front_image: Some(image("front.png")),
            back_image: None,
        };
        assert!(validate_identity(p).is_ok());
    }

    #[test]
    fn missing_front_image_rejected() {
        let mut p = valid_payload();
        p.front_image = None;
        assert!(validate_identity(p).is_err());
    }

    #[test]
    fn pdf_document_image_rejected() {
        let mut p = valid_payload();
        p.front_image = Some(FileUpload {
            storage_key: "identity/front.pdf".to_string(),
            file_name: "front.pdf".to_string(),
            size_bytes: 1024,
        });
        assert!(validate_identity(p).is_err());
    }

    #[test]
    fn oversized_image_rejected() {
        let mut p = valid_payload();
        p.back_image = Some(FileUpload {
            storage_key: "identity/back.jpg".to_string(),
            file_name: "back.jpg".to_string(),
            size_bytes: MAX_DOCUMENT_IMAGE_BYTES + 1,
        });
        assert!(validate_identity(p).is_err());
    }

    #[test]
    fn with_outcome_attaches_failed_status() {
        let data = validate_identity(valid_payload()).unwrap().with_outcome(
            VerificationStatus::Failed,
            Some("Document verification failed".to_string()),
            None,
        );
        assert_eq!(data.verification_status, VerificationStatus::Failed);
        assert!(data.verification_notes.is_some());
    }
}
