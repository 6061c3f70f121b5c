//! Handlers for the admin review queue.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use eygar_core::error::CoreError;
use eygar_core::notify::ProfileEvent;
use eygar_core::review::{review_transition, validate_review_notes, ReviewDecision};
use eygar_core::types::DbId;
use eygar_db::models::host_profile::{HostProfile, StatusHistoryEntry};
use eygar_db::repositories::{HostProfileRepo, StatusHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::dispatch_notification;
use crate::middleware::rbac::RequireReviewer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for the review queue.
const DEFAULT_PAGE_SIZE: i64 = 25;

/// Maximum page size for the review queue.
const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Pagination parameters for listing reviewable profiles.
#[derive(Debug, Deserialize)]
pub struct ListReviewsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/reviews/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: String,
    pub notes: Option<String>,
}

/// A profile together with its transition history, for the detail view.
#[derive(Debug, Serialize)]
pub struct ReviewDetail {
    pub profile: HostProfile,
    pub history: Vec<StatusHistoryEntry>,
}

// ---------------------------------------------------------------------------
// GET /admin/reviews
// ---------------------------------------------------------------------------

/// List profiles awaiting a decision, most recently submitted first.
pub async fn list_reviewable(
    State(state): State<AppState>,
    RequireReviewer(_user): RequireReviewer,
    Query(params): Query<ListReviewsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let items = HostProfileRepo::list_reviewable(&state.pool, limit, offset).await?;

    tracing::debug!(count = items.len(), "Listed reviewable profiles");

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /admin/reviews/{id}
// ---------------------------------------------------------------------------

/// Fetch one profile with its status history.
pub async fn get_review(
    State(state): State<AppState>,
    RequireReviewer(_user): RequireReviewer,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = HostProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HostProfile",
                id,
            })
        })?;
    let history = StatusHistoryRepo::list_for_profile(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ReviewDetail { profile, history },
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/reviews/{id}/review
// ---------------------------------------------------------------------------

/// Apply a review decision to a profile.
///
/// The row is locked for the decision so two reviewers cannot resolve the
/// same profile concurrently; the second request sees the new status and
/// fails the reviewability check.
pub async fn review(
    State(state): State<AppState>,
    RequireReviewer(user): RequireReviewer,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let decision = ReviewDecision::from_str_db(&input.decision)?;
    if let Some(notes) = &input.notes {
        validate_review_notes(notes)?;
    }

    let mut tx = state.pool.begin().await?;
    let profile = HostProfileRepo::lock_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HostProfile",
                id,
            })
        })?;

    let old_status = profile.profile_status()?;
    let new_status = review_transition(old_status, decision)?;

    let updated = HostProfileRepo::apply_review(
        &mut *tx,
        id,
        new_status,
        input.notes.as_deref(),
        user.user_id,
    )
    .await?;
    StatusHistoryRepo::record(
        &mut *tx,
        id,
        old_status.as_str(),
        new_status.as_str(),
        user.user_id,
        input.notes.as_deref(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        profile_id = id,
        reviewer_id = user.user_id,
        decision = decision.as_str(),
        new_status = new_status.as_str(),
        "Review decision applied"
    );

    dispatch_notification(
        &state,
        updated.user_id,
        ProfileEvent::ProfileReviewed(decision),
        serde_json::json!({
            "profile_id": id,
            "decision": decision.as_str(),
            "review_notes": input.notes,
        }),
    );

    Ok(Json(DataResponse { data: updated }))
}
