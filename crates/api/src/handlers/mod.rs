//! HTTP handlers, grouped by resource.

pub mod admin_review;
pub mod auth;
pub mod host_profile;
pub mod verification;

use std::sync::Arc;

use eygar_core::notify::ProfileEvent;
use eygar_core::types::DbId;

use crate::state::AppState;

/// Fire-and-forget notification dispatch.
///
/// Spawned so a slow or failing notifier never delays or rolls back the
/// state transition that triggered it. Failures are logged and dropped.
pub(crate) fn dispatch_notification(
    state: &AppState,
    owner_id: DbId,
    event: ProfileEvent,
    payload: serde_json::Value,
) {
    let notifier = Arc::clone(&state.notifier);
    tokio::spawn(async move {
        if let Err(err) = notifier.notify(owner_id, event, payload).await {
            tracing::warn!(owner_id, ?event, error = %err, "Notification dispatch failed");
        }
    });
}
