//! Notification dispatch hook.
//!
//! The state machine fires an event on submission and on every review
//! decision. Delivery is best-effort: callers spawn the dispatch and log
//! failures; a failed notification never rolls back a state transition.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::review::ReviewDecision;
use crate::types::DbId;

/// Workflow events that trigger a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "decision")]
pub enum ProfileEvent {
    ProfileSubmitted,
    ProfileReviewed(ReviewDecision),
}

/// Best-effort notification delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        owner_id: DbId,
        event: ProfileEvent,
        payload: serde_json::Value,
    ) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tagged_decision() {
        let submitted = serde_json::to_value(ProfileEvent::ProfileSubmitted).unwrap();
        assert_eq!(submitted["event"], "profile_submitted");

        let reviewed =
            serde_json::to_value(ProfileEvent::ProfileReviewed(ReviewDecision::Approve)).unwrap();
        assert_eq!(reviewed["event"], "profile_reviewed");
        assert_eq!(reviewed["decision"], "approve");
    }
}
