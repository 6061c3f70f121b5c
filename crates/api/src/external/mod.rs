//! Concrete implementations of the domain's collaborator traits.
//!
//! The domain crate defines the interfaces (`FileStore`, `SmsSender`,
//! `IdentityVerifier`, `Notifier`); this module provides the deployable
//! implementations that are wired into [`crate::state::AppState`] at startup.

pub mod file_store;
pub mod notifier;
pub mod sms;
pub mod verifier;

pub use file_store::LocalFileStore;
pub use notifier::SmtpNotifier;
pub use sms::LogSmsSender;
pub use verifier::MockIdentityVerifier;
