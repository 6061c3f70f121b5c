//! Collaborator traits for external capabilities.
//!
//! The domain consumes file storage, SMS delivery, and document
//! verification through these narrow interfaces. Implementations live in
//! the API crate; the domain never knows which provider backs them.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::steps::identity::{DocumentType, ExtractedIdentity, VerificationStatus};

/// Stored-file lookup. Implementations must be timeout-bound; a timeout is
/// surfaced as [`CoreError::UpstreamTimeout`].
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Whether a previously stored file exists under `storage_key`.
    async fn exists(&self, storage_key: &str) -> Result<bool, CoreError>;
}

/// Outbound SMS delivery.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a message to a mobile number. A provider failure is
    /// [`CoreError::Delivery`], never silently swallowed.
    async fn send(&self, mobile_number: &str, body: &str) -> Result<(), CoreError>;
}

/// A document submitted for identity verification.
#[derive(Debug, Clone)]
pub struct IdentityDocument {
    pub document_type: DocumentType,
    pub document_number: String,
}

/// Result of an identity verification call. A `Failed` status is a valid
/// outcome, not an error; errors are reserved for the service itself being
/// unreachable or timing out.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    pub notes: Option<String>,
    pub extracted: Option<ExtractedIdentity>,
}

/// External identity-document verification.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, document: &IdentityDocument) -> Result<VerificationOutcome, CoreError>;
}
