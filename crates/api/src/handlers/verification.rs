//! Handlers for the mobile-verification ledger.
//!
//! Codes are six digits, valid for ten minutes, with five confirmation
//! attempts and a sixty-second resend cooldown. Sending a new code
//! supersedes any earlier unconsumed one. Expiry is evaluated lazily at
//! confirmation time; nothing runs on a timer.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use eygar_core::error::CoreError;
use eygar_core::steps::ContactData;
use eygar_core::types::{DbId, Timestamp};
use eygar_core::verification::{
    confirm_code, ensure_resend_allowed, expires_at, generate_code, CODE_TTL_MINS, MAX_ATTEMPTS,
};
use eygar_db::models::host_profile::HostProfile;
use eygar_db::repositories::{HostProfileRepo, VerificationCodeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /verify/mobile/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmCodeRequest {
    pub code: String,
}

/// Response for `POST /verify/mobile/send`.
#[derive(Debug, Serialize)]
pub struct SendCodeResponse {
    pub expires_at: Timestamp,
    pub attempts_allowed: i32,
}

/// Response for `POST /verify/mobile/confirm`.
#[derive(Debug, Serialize)]
pub struct ConfirmCodeResponse {
    pub verified: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The saved contact record on a profile.
///
/// A code can only be sent or confirmed once the contact-details step has
/// been saved; until then there is no number to verify.
fn contact_from_profile(profile: &HostProfile) -> AppResult<ContactData> {
    let value = profile.contact_data.clone().ok_or_else(|| {
        AppError::Core(CoreError::StepOutOfOrder(
            "Save the contact details step before verifying a mobile number".to_string(),
        ))
    })?;
    serde_json::from_value(value)
        .map_err(|e| AppError::InternalError(format!("Corrupt contact record: {e}")))
}

/// The owner's profile with its saved contact record.
async fn profile_with_contact(
    state: &AppState,
    user_id: DbId,
) -> AppResult<(HostProfile, ContactData)> {
    let profile = HostProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HostProfile",
                id: user_id,
            })
        })?;
    let contact = contact_from_profile(&profile)?;
    Ok((profile, contact))
}

// ---------------------------------------------------------------------------
// POST /verify/mobile/send
// ---------------------------------------------------------------------------

/// Generate and send a verification code to the saved mobile number.
///
/// The cooldown check, supersession of earlier codes, and insert run in one
/// transaction under the owner's profile-row lock, so two racing sends
/// cannot both pass the cooldown and leave two live codes behind.
pub async fn send_code(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let profile = HostProfileRepo::lock_by_user(&mut *tx, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HostProfile",
                id: auth.user_id,
            })
        })?;
    let contact = contact_from_profile(&profile)?;

    let now = Utc::now();
    let latest = VerificationCodeRepo::latest_for_user(&mut *tx, auth.user_id).await?;
    ensure_resend_allowed(latest.map(|c| c.created_at), now)?;

    // A new send supersedes every outstanding code.
    VerificationCodeRepo::invalidate_for_user(&mut *tx, auth.user_id).await?;

    let code = generate_code();
    let expires = expires_at(now);
    VerificationCodeRepo::create(&mut *tx, auth.user_id, &code, expires, MAX_ATTEMPTS).await?;
    tx.commit().await?;

    let body = format!(
        "Your Eygar verification code is {code}. It expires in {CODE_TTL_MINS} minutes."
    );
    state.sms.send(&contact.mobile_number, &body).await?;

    tracing::info!(user_id = auth.user_id, "Verification code sent");

    Ok(Json(DataResponse {
        data: SendCodeResponse {
            expires_at: expires,
            attempts_allowed: MAX_ATTEMPTS,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /verify/mobile/confirm
// ---------------------------------------------------------------------------

/// Confirm a previously sent verification code.
///
/// On a mismatch the attempt is spent; on the final mismatch the code is
/// invalidated. On a match the code is consumed and the stored contact
/// record is flipped to verified.
pub async fn confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ConfirmCodeRequest>,
) -> AppResult<impl IntoResponse> {
    let (profile, _) = profile_with_contact(&state, auth.user_id).await?;

    let stored = VerificationCodeRepo::active_for_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NoPendingCode))?;

    match confirm_code(&stored.as_pending(), input.code.trim(), Utc::now()) {
        Ok(()) => {
            VerificationCodeRepo::consume(&state.pool, stored.id).await?;
            HostProfileRepo::set_mobile_verified(&state.pool, profile.id).await?;

            tracing::info!(
                user_id = auth.user_id,
                profile_id = profile.id,
                "Mobile number verified"
            );
            Ok(Json(DataResponse {
                data: ConfirmCodeResponse { verified: true },
            }))
        }
        Err(CoreError::CodeMismatch { attempts_remaining }) => {
            VerificationCodeRepo::decrement_attempts(&state.pool, stored.id).await?;
            Err(AppError::Core(CoreError::CodeMismatch {
                attempts_remaining,
            }))
        }
        Err(CoreError::AttemptsExhausted) => {
            VerificationCodeRepo::consume(&state.pool, stored.id).await?;
            Err(AppError::Core(CoreError::AttemptsExhausted))
        }
        Err(other) => Err(AppError::Core(other)),
    }
}
