//! Step validators.
//!
//! Each step has a pure validator `(payload) -> Result<StepData, CoreError>`
//! that checks completeness and format and returns a normalized record.
//! Validators never touch profile state; the caller decides what to persist.

pub mod business;
pub mod contact;
pub mod identity;
pub mod submission;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use business::{validate_business, BusinessData, BusinessPayload};
pub use contact::{validate_contact, ContactData, ContactPayload, MobileVerification};
pub use identity::{
    validate_identity, DocumentType, ExtractedIdentity, IdentityData, IdentityPayload,
    VerificationStatus,
};
pub use submission::{validate_submission, SubmissionData, SubmissionPayload};

/// Reference to a file previously stored via the file-store collaborator.
///
/// Size and name are recorded at upload time; validators check both against
/// the per-field limits, and the caller checks `storage_key` existence
/// before persisting the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Opaque key under which the file store holds the bytes.
    pub storage_key: String,
    /// Original file name, used for extension checks.
    pub file_name: String,
    /// Size in bytes as recorded by the file store.
    pub size_bytes: i64,
}

impl FileUpload {
    /// Lowercased extension of the original file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Validate an uploaded file against an extension allowlist and size limit.
pub fn validate_upload(
    field: &str,
    upload: &FileUpload,
    allowed_extensions: &[&str],
    max_bytes: i64,
) -> Result<(), CoreError> {
    if upload.storage_key.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{field}: storage key must not be empty"
        )));
    }
    if upload.size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "{field}: file size exceeds the {} MB limit",
            max_bytes / (1024 * 1024)
        )));
    }
    match upload.extension() {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "{field}: file must be one of: {}",
            allowed_extensions.join(", ")
        ))),
    }
}

/// Require a non-empty (after trimming) string field, returning the trimmed
/// value.
pub(crate) fn require_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!("{field}: must not be empty"))),
    }
}

/// Normalize an optional string field: trimmed, empty becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, size: i64) -> FileUpload {
        FileUpload {
            storage_key: format!("uploads/{name}"),
            file_name: name.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(upload("Scan.PDF", 1).extension().as_deref(), Some("pdf"));
        assert_eq!(upload("photo.jpeg", 1).extension().as_deref(), Some("jpeg"));
    }

    #[test]
    fn missing_extension_is_none() {
        assert_eq!(upload("README", 1).extension(), None);
        assert_eq!(upload("archive.", 1).extension(), None);
    }

    #[test]
    fn upload_within_limits_is_accepted() {
        assert!(validate_upload("license_document", &upload("scan.pdf", 1024), &["pdf"], 2048).is_ok());
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let err =
            validate_upload("license_document", &upload("scan.pdf", 4096), &["pdf"], 2048)
                .unwrap_err();
        assert!(err.to_string().contains("license_document"));
    }

    #[test]
    fn disallowed_extension_is_rejected() {
        assert!(validate_upload("logo", &upload("logo.bmp", 10), &["jpg", "png"], 2048).is_err());
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        let mut u = upload("scan.pdf", 10);
        u.storage_key = "  ".to_string();
        assert!(validate_upload("license_document", &u, &["pdf"], 2048).is_err());
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(
            require_text("name", Some("  Acme  ".to_string())).unwrap(),
            "Acme"
        );
        assert!(require_text("name", Some("   ".to_string())).is_err());
        assert!(require_text("name", None).is_err());
    }

    #[test]
    fn optional_text_normalizes_blank_to_none() {
        assert_eq!(optional_text(Some(" hi ".to_string())).as_deref(), Some("hi"));
        assert_eq!(optional_text(Some("   ".to_string())), None);
        assert_eq!(optional_text(None), None);
    }
}
