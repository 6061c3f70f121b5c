//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! an executor as the first argument: `&PgPool` for standalone queries,
//! `&mut PgConnection` for the mutating profile operations so callers can
//! serialize them per owner inside a transaction.

pub mod host_profile_repo;
pub mod status_history_repo;
pub mod user_repo;
pub mod verification_code_repo;

pub use host_profile_repo::HostProfileRepo;
pub use status_history_repo::StatusHistoryRepo;
pub use user_repo::UserRepo;
pub use verification_code_repo::VerificationCodeRepo;
