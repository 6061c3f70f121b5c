//! Email implementation of the [`Notifier`] trait.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use eygar_core::error::CoreError;
use eygar_core::notify::{Notifier, ProfileEvent};
use eygar_core::review::ReviewDecision;
use eygar_core::types::DbId;
use eygar_db::repositories::UserRepo;
use eygar_db::DbPool;

use crate::config::SmtpConfig;

/// Sends workflow notifications to the profile owner's email address.
///
/// When no SMTP relay is configured the message is logged instead, so
/// development setups exercise the full dispatch path without a mail server.
pub struct SmtpNotifier {
    pool: DbPool,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl SmtpNotifier {
    /// Build the notifier from configuration.
    ///
    /// # Panics
    ///
    /// Panics at startup if the configured relay hostname is invalid.
    pub fn new(pool: DbPool, config: &SmtpConfig) -> Self {
        let transport = config.relay.as_deref().map(|relay| {
            AsyncSmtpTransport::<Tokio1Executor>::relay(relay)
                .unwrap_or_else(|e| panic!("Invalid SMTP relay '{relay}': {e}"))
                .build()
        });

        Self {
            pool,
            transport,
            from_address: config.from_address.clone(),
        }
    }

    /// Subject and body for a workflow event.
    fn render(event: ProfileEvent, payload: &serde_json::Value) -> (String, String) {
        match event {
            ProfileEvent::ProfileSubmitted => (
                "Host profile submitted for review".to_string(),
                "Your host profile has been submitted and is now awaiting review. \
                 We will notify you once a decision has been made."
                    .to_string(),
            ),
            ProfileEvent::ProfileReviewed(decision) => {
                let subject = match decision {
                    ReviewDecision::Approve => "Your host profile has been approved",
                    ReviewDecision::Reject => "Your host profile has been rejected",
                    ReviewDecision::Hold => "Your host profile review is on hold",
                };
                let mut body = match decision {
                    ReviewDecision::Approve => {
                        "Congratulations! Your host profile has been approved.".to_string()
                    }
                    ReviewDecision::Reject => {
                        "Unfortunately your host profile has been rejected.".to_string()
                    }
                    ReviewDecision::Hold => {
                        "Your host profile review has been placed on hold pending further checks."
                            .to_string()
                    }
                };
                if let Some(notes) = payload.get("review_notes").and_then(|n| n.as_str()) {
                    body.push_str("\n\nReviewer notes: ");
                    body.push_str(notes);
                }
                (subject.to_string(), body)
            }
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(
        &self,
        owner_id: DbId,
        event: ProfileEvent,
        payload: serde_json::Value,
    ) -> Result<(), CoreError> {
        let user = UserRepo::find_by_id(&self.pool, owner_id)
            .await
            .map_err(|e| CoreError::Internal(format!("User lookup failed: {e}")))?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: owner_id,
            })?;

        let (subject, body) = Self::render(event, &payload);

        let Some(transport) = &self.transport else {
            tracing::info!(
                owner_id,
                email = %user.email,
                %subject,
                "SMTP relay not configured; notification logged only"
            );
            return Ok(());
        };

        let from: Mailbox = self
            .from_address
            .parse()
            .map_err(|e| CoreError::Internal(format!("Invalid from address: {e}")))?;
        let to: Mailbox = user
            .email
            .parse()
            .map_err(|e| CoreError::Delivery(format!("Invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(&subject)
            .body(body)
            .map_err(|e| CoreError::Internal(format!("Failed to build email: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| CoreError::Delivery(format!("SMTP send failed: {e}")))?;

        tracing::info!(owner_id, %subject, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submitted_event_renders_review_pending_body() {
        let (subject, body) = SmtpNotifier::render(ProfileEvent::ProfileSubmitted, &json!({}));
        assert!(subject.contains("submitted"));
        assert!(body.contains("awaiting review"));
    }

    #[test]
    fn review_event_includes_notes_when_present() {
        let (subject, body) = SmtpNotifier::render(
            ProfileEvent::ProfileReviewed(ReviewDecision::Reject),
            &json!({ "review_notes": "License document unreadable" }),
        );
        assert!(subject.contains("rejected"));
        assert!(body.contains("License document unreadable"));
    }

    #[test]
    fn hold_event_renders_without_notes() {
        let (_, body) = SmtpNotifier::render(
            ProfileEvent::ProfileReviewed(ReviewDecision::Hold),
            &json!({}),
        );
        assert!(body.contains("on hold"));
        assert!(!body.contains("Reviewer notes"));
    }
}
