//! Contact-details step (step 3).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::{optional_text, require_text};

/// E.164-like mobile number pattern: optional `+`, optional leading `1`,
/// 9 to 15 digits.
const MOBILE_PATTERN: &str = r"^\+?1?\d{9,15}$";

fn mobile_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MOBILE_PATTERN).expect("mobile pattern is valid"))
}

/// Mobile verification state; flipped to `Verified` by the verification
/// ledger, never by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileVerification {
    Pending,
    Verified,
}

/// Raw client payload for the contact-details step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub mobile_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub telegram_username: Option<String>,
    pub facebook_page_url: Option<String>,
}

/// Normalized contact record stored on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactData {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub mobile_number: String,
    pub mobile_verified: MobileVerification,
    pub whatsapp_number: Option<String>,
    pub telegram_username: Option<String>,
    pub facebook_page_url: Option<String>,
}

/// Validate a phone number against the E.164-like pattern.
pub fn validate_mobile_number(field: &str, number: &str) -> Result<(), CoreError> {
    if mobile_regex().is_match(number) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field}: must match the format '+999999999' with 9 to 15 digits"
        )))
    }
}

/// Validate and normalize a contact-details payload.
pub fn validate_contact(payload: ContactPayload) -> Result<ContactData, CoreError> {
    let mobile_number = require_text("mobile_number", payload.mobile_number)?;
    validate_mobile_number("mobile_number", &mobile_number)?;

    if let Some(lat) = payload.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::Validation(
                "latitude: must be between -90 and 90".to_string(),
            ));
        }
    }
    if let Some(lon) = payload.longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::Validation(
                "longitude: must be between -180 and 180".to_string(),
            ));
        }
    }

    let whatsapp_number = optional_text(payload.whatsapp_number);
    if let Some(wa) = &whatsapp_number {
        validate_mobile_number("whatsapp_number", wa)?;
    }

    let facebook_page_url = optional_text(payload.facebook_page_url);
    if let Some(url) = &facebook_page_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CoreError::Validation(
                "facebook_page_url: must be an http(s) URL".to_string(),
            ));
        }
    }

    Ok(ContactData {
        address_line1: require_text("address_line1", payload.address_line1)?,
        address_line2: optional_text(payload.address_line2),
        city: require_text("city", payload.city)?,
        state: optional_text(payload.state),
        postal_code: require_text("postal_code", payload.postal_code)?,
        country: require_text("country", payload.country)?,
        latitude: payload.latitude,
        longitude: payload.longitude,
        mobile_number,
        mobile_verified: MobileVerification::Pending,
        whatsapp_number,
        telegram_username: optional_text(payload.telegram_username),
        facebook_page_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> ContactPayload {
        ContactPayload {
            address_line1: Some("12 Harbour Road".to_string()),
            address_line2: None,
            city: Some("Portville".to_string()),
            state: Some("Coastal".to_string()),
            postal_code: Some("10400".to_string()),
            country: Some("Atlantis".to_string()),
            latitude: Some(41.25),
            longitude: Some(-8.61),
            mobile_number: Some("+15551234567".to_string()),
            whatsapp_number: None,
            telegram_username: None,
            facebook_page_url: None,
        }
    }

    #[test]
    fn valid_payload_starts_unverified() {
        let data = validate_contact(valid_payload()).unwrap();
        assert_eq!(data.mobile_verified, MobileVerification::Pending);
        assert_eq!(data.mobile_number, "+15551234567");
    }

    #[test]
    fn mobile_pattern_accepts_e164_shapes() {
        for number in ["+15551234567", "15551234567", "+999999999", "123456789"] {
            assert!(validate_mobile_number("mobile_number", number).is_ok(), "{number}");
        }
    }

    #[test]
    fn mobile_pattern_rejects_malformed_numbers() {
        for number in ["", "12345678", "+1 555 123 4567", "phone", "+1234567890123456"] {
            assert!(validate_mobile_number("mobile_number", number).is_err(), "{number}");
        }
    }

    #[test]
    fn missing_required_address_fields_rejected() {
        for strip in ["address_line1", "city", "postal_code", "country"] {
            let mut p = valid_payload();
            match strip {
                "address_line1" => p.address_line1 = None,
                "city" => p.city = None,
                "postal_code" => p.postal_code = None,
                _ => p.country = None,
            }
            let err = validate_contact(p).unwrap_err();
            assert!(err.to_string().contains(strip), "{strip}");
        }
    }

    #[test]
    fn coordinates_are_range_checked() {
        let mut p = valid_payload();
        p.latitude = Some(90.01);
        assert!(validate_contact(p).is_err());

        let mut p = valid_payload();
        p.longitude = Some(-180.5);
        assert!(validate_contact(p).is_err());

        let mut p = valid_payload();
        p.latitude = Some(-90.0);
        p.longitude = Some(180.0);
        assert!(validate_contact(p).is_ok());
    }

    #[test]
    fn coordinates_are_optional() {
        let mut p = valid_payload();
        p.latitude = None;
        p.longitude = None;
        assert!(validate_contact(p).is_ok());
    }

    #[test]
    fn whatsapp_number_is_pattern_checked_when_present() {
        let mut p = valid_payload();
        p.whatsapp_number = Some("not-a-number".to_string());
        assert!(validate_contact(p).is_err());

        let mut p = valid_payload();
        p.whatsapp_number = Some("+15559876543".to_string());
        assert!(validate_contact(p).is_ok());
    }

    #[test]
    fn facebook_url_must_be_http() {
        let mut p = valid_payload();
        p.facebook_page_url = Some("ftp://pages.example/host".to_string());
        assert!(validate_contact(p).is_err());

        let mut p = valid_payload();
        p.facebook_page_url = Some("https://facebook.com/sunrisestays".to_string());
        assert!(validate_contact(p).is_ok());
    }
}
