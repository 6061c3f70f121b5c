//! Log-only implementation of the [`SmsSender`] trait.

use async_trait::async_trait;

use eygar_core::error::CoreError;
use eygar_core::external::SmsSender;

/// Writes outbound messages to the log instead of a gateway.
///
/// Stands in until an SMS provider is wired up; the handler flow (cooldowns,
/// code storage, delivery errors) is identical either way.
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send(&self, mobile_number: &str, body: &str) -> Result<(), CoreError> {
        tracing::info!(mobile_number, body, "SMS (log-only delivery)");
        Ok(())
    }
}
