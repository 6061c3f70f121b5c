use std::sync::Arc;

use eygar_core::external::{FileStore, IdentityVerifier, SmsSender};
use eygar_core::notify::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The external collaborators are trait objects so tests can substitute fakes
/// without touching the handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eygar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Uploaded-file lookup.
    pub file_store: Arc<dyn FileStore>,
    /// Outbound SMS delivery for verification codes.
    pub sms: Arc<dyn SmsSender>,
    /// Identity-document verification provider.
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Best-effort workflow notifications.
    pub notifier: Arc<dyn Notifier>,
}
