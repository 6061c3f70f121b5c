//! Handlers for the owner-facing host-profile workflow.
//!
//! Every step submission follows the same guarded sequence inside one
//! transaction: lock the owner's row, check the profile is still editable,
//! check the step is allowed, validate the payload, then persist. The row
//! lock serializes concurrent submissions for the same owner, so two racing
//! requests cannot both pass the guards.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sqlx::PgConnection;

use eygar_core::error::CoreError;
use eygar_core::external::IdentityDocument;
use eygar_core::host_profile::{
    ensure_editable, ensure_ready_for_submission, ensure_step_allowed, ProfileStatus, ProfileStep,
    StepFlags, STEP_ORDER,
};
use eygar_core::notify::ProfileEvent;
use eygar_core::steps::{
    validate_business, validate_contact, validate_identity, validate_submission, BusinessPayload,
    ContactPayload, FileUpload, IdentityPayload, SubmissionPayload,
};
use eygar_core::types::DbId;
use eygar_db::models::host_profile::HostProfile;
use eygar_db::repositories::{HostProfileRepo, StatusHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::dispatch_notification;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lock the owner's profile row for the rest of the transaction.
async fn lock_profile(conn: &mut PgConnection, user_id: DbId) -> AppResult<HostProfile> {
    HostProfileRepo::lock_by_user(conn, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HostProfile",
                id: user_id,
            })
        })
}

/// Run the shared pre-submission guards for a step.
fn check_step_guards(profile: &HostProfile, step: ProfileStep) -> AppResult<StepFlags> {
    let status = profile.profile_status()?;
    ensure_editable(status)?;
    let flags = profile.step_flags();
    ensure_step_allowed(flags, step)?;
    Ok(flags)
}

/// Confirm that a referenced upload actually exists in the file store.
async fn ensure_upload_stored(
    state: &AppState,
    field: &str,
    upload: &FileUpload,
) -> AppResult<()> {
    if !state.file_store.exists(&upload.storage_key).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field}: no stored file found under key '{}'",
            upload.storage_key
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /profiles/host
// ---------------------------------------------------------------------------

/// Fetch the authenticated user's host profile, creating an empty draft on
/// first access.
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let profile = HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// GET /profiles/host/status
// ---------------------------------------------------------------------------

/// Per-step progress summary.
#[derive(Debug, Serialize)]
pub struct StepProgress {
    pub step: &'static str,
    pub label: &'static str,
    pub completed: bool,
}

/// Workflow progress for the status endpoint.
#[derive(Debug, Serialize)]
pub struct ProfileStatusSummary {
    pub status: &'static str,
    pub current_step: &'static str,
    pub completion_percentage: i32,
    pub steps: Vec<StepProgress>,
}

/// Summarize the authenticated user's workflow progress.
pub async fn current_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let profile = HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;
    let status = profile.profile_status()?;
    let flags = profile.step_flags();

    let steps = STEP_ORDER
        .iter()
        .map(|&step| StepProgress {
            step: step.as_str(),
            label: step.label(),
            completed: flags.get(step),
        })
        .collect();

    let summary = ProfileStatusSummary {
        status: status.as_str(),
        current_step: flags.current_step().as_str(),
        completion_percentage: flags.completion_percentage(),
        steps,
    };

    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// POST /profiles/host/business_profile
// ---------------------------------------------------------------------------

/// Submit the business-profile step.
pub async fn submit_business_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BusinessPayload>,
) -> AppResult<impl IntoResponse> {
    HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;

    let mut tx = state.pool.begin().await?;
    let profile = lock_profile(&mut *tx, auth.user_id).await?;
    let flags = check_step_guards(&profile, ProfileStep::BusinessProfile)?;

    let data = validate_business(payload)?;
    if let Some(doc) = &data.license_document {
        ensure_upload_stored(&state, "license_document", doc).await?;
    }
    if let Some(logo) = &data.business_logo {
        ensure_upload_stored(&state, "business_logo", logo).await?;
    }

    let value = serde_json::to_value(&data)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize step data: {e}")))?;
    let updated = HostProfileRepo::save_step(
        &mut *tx,
        profile.id,
        ProfileStep::BusinessProfile,
        &value,
        flags.with_completed(ProfileStep::BusinessProfile),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        profile_id = profile.id,
        user_id = auth.user_id,
        "Business profile step saved"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /profiles/host/identity_verification
// ---------------------------------------------------------------------------

/// Submit the identity-verification step.
///
/// The external verification runs after structural validation; its outcome
/// (verified or failed) is stored on the record but does not gate step
/// completion. Only an unreachable verifier fails the request.
pub async fn submit_identity_verification(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<IdentityPayload>,
) -> AppResult<impl IntoResponse> {
    HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;

    let mut tx = state.pool.begin().await?;
    let profile = lock_profile(&mut *tx, auth.user_id).await?;
    let flags = check_step_guards(&profile, ProfileStep::IdentityVerification)?;

    let data = validate_identity(payload)?;
    ensure_upload_stored(&state, "front_image", &data.front_image).await?;
    if let Some(back) = &data.back_image {
        ensure_upload_stored(&state, "back_image", back).await?;
    }

    let outcome = state
        .verifier
        .verify(&IdentityDocument {
            document_type: data.document_type,
            document_number: data.document_number.clone(),
        })
        .await?;
    let data = data.with_outcome(outcome.status, outcome.notes, outcome.extracted);

    let value = serde_json::to_value(&data)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize step data: {e}")))?;
    let updated = HostProfileRepo::save_step(
        &mut *tx,
        profile.id,
        ProfileStep::IdentityVerification,
        &value,
        flags.with_completed(ProfileStep::IdentityVerification),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        profile_id = profile.id,
        user_id = auth.user_id,
        verification_status = ?data.verification_status,
        "Identity verification step saved"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /profiles/host/contact_details
// ---------------------------------------------------------------------------

/// Submit the contact-details step.
///
/// The mobile number is stored unverified; the verification ledger flips it
/// to verified independently of step completion.
pub async fn submit_contact_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ContactPayload>,
) -> AppResult<impl IntoResponse> {
    HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;

    let mut tx = state.pool.begin().await?;
    let profile = lock_profile(&mut *tx, auth.user_id).await?;
    let flags = check_step_guards(&profile, ProfileStep::ContactDetails)?;

    let data = validate_contact(payload)?;

    let value = serde_json::to_value(&data)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize step data: {e}")))?;
    let updated = HostProfileRepo::save_step(
        &mut *tx,
        profile.id,
        ProfileStep::ContactDetails,
        &value,
        flags.with_completed(ProfileStep::ContactDetails),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        profile_id = profile.id,
        user_id = auth.user_id,
        "Contact details step saved"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /profiles/host/submit_for_review
// ---------------------------------------------------------------------------

/// Complete the final step and move the profile to `submitted`.
///
/// Requires the three preceding data steps to be complete and both consents
/// to be given. The submission record, status change, and history entry
/// commit atomically; the notification is dispatched after commit.
pub async fn submit_for_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SubmissionPayload>,
) -> AppResult<impl IntoResponse> {
    HostProfileRepo::get_or_create(&state.pool, auth.user_id).await?;

    let mut tx = state.pool.begin().await?;
    let profile = lock_profile(&mut *tx, auth.user_id).await?;
    let flags = check_step_guards(&profile, ProfileStep::ReviewSubmission)?;
    ensure_ready_for_submission(flags)?;

    let data = validate_submission(payload)?;

    let value = serde_json::to_value(&data)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize step data: {e}")))?;
    HostProfileRepo::save_step(
        &mut *tx,
        profile.id,
        ProfileStep::ReviewSubmission,
        &value,
        flags.with_completed(ProfileStep::ReviewSubmission),
    )
    .await?;

    let updated = HostProfileRepo::mark_submitted(&mut *tx, profile.id).await?;
    StatusHistoryRepo::record(
        &mut *tx,
        profile.id,
        profile.status.as_str(),
        ProfileStatus::Submitted.as_str(),
        auth.user_id,
        None,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        profile_id = profile.id,
        user_id = auth.user_id,
        "Host profile submitted for review"
    );

    dispatch_notification(
        &state,
        auth.user_id,
        ProfileEvent::ProfileSubmitted,
        serde_json::json!({ "profile_id": profile.id }),
    );

    Ok(Json(DataResponse { data: updated }))
}
