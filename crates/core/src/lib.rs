//! Domain logic for the Eygar host-profile service.
//!
//! Everything in this crate is pure with respect to persistence: the state
//! machine, step validators, verification-ledger rules, and review
//! transitions operate on plain values and return [`error::CoreError`] on
//! failure. External collaborators (file store, SMS, identity verification,
//! notifications) are reached only through the traits in [`external`] and
//! [`notify`]; the API crate wires in the concrete implementations.

pub mod error;
pub mod external;
pub mod host_profile;
pub mod notify;
pub mod review;
pub mod roles;
pub mod steps;
pub mod types;
pub mod verification;
