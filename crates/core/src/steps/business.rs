//! Business-profile step (step 1).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::{optional_text, require_text, validate_upload, FileUpload};

/// Maximum license document size: 5 MiB.
pub const MAX_LICENSE_DOCUMENT_BYTES: i64 = 5 * 1024 * 1024;

/// Maximum business logo size: 2 MiB.
pub const MAX_LOGO_BYTES: i64 = 2 * 1024 * 1024;

/// Allowed license document formats.
pub const LICENSE_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Allowed logo formats.
pub const LOGO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Raw client payload for the business-profile step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessPayload {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub license_number: Option<String>,
    pub license_document: Option<FileUpload>,
    pub business_logo: Option<FileUpload>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

/// Normalized business-profile record stored on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessData {
    pub business_name: String,
    pub business_type: String,
    pub license_number: String,
    pub license_document: Option<FileUpload>,
    pub business_logo: Option<FileUpload>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub description: Option<String>,
}

/// Validate and normalize a business-profile payload.
pub fn validate_business(payload: BusinessPayload) -> Result<BusinessData, CoreError> {
    let business_name = require_text("business_name", payload.business_name)?;
    let business_type = require_text("business_type", payload.business_type)?;
    let license_number = require_text("license_number", payload.license_number)?;

    if let Some(doc) = &payload.license_document {
        validate_upload(
            "license_document",
            doc,
            LICENSE_DOCUMENT_EXTENSIONS,
            MAX_LICENSE_DOCUMENT_BYTES,
        )?;
    }
    if let Some(logo) = &payload.business_logo {
        validate_upload("business_logo", logo, LOGO_EXTENSIONS, MAX_LOGO_BYTES)?;
    }

    Ok(BusinessData {
        business_name,
        business_type,
        license_number,
        license_document: payload.license_document,
        business_logo: payload.business_logo,
        address_line1: require_text("address_line1", payload.address_line1)?,
        address_line2: optional_text(payload.address_line2),
        city: require_text("city", payload.city)?,
        state: require_text("state", payload.state)?,
        postal_code: require_text("postal_code", payload.postal_code)?,
        country: require_text("country", payload.country)?,
        description: optional_text(payload.description),
    })
}
