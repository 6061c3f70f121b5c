//! Route definitions for the host-profile workflow.
//!
//! Mounted at `/profiles/host` by `api_routes()`.
//!
//! ```text
//! GET    /                          get_my_profile
//! GET    /status                    current_status
//! POST   /business_profile          submit_business_profile
//! POST   /identity_verification     submit_identity_verification
//! POST   /contact_details           submit_contact_details
//! POST   /submit_for_review         submit_for_review
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::host_profile;
use crate::state::AppState;

/// Host-profile workflow routes — mounted at `/profiles/host`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(host_profile::get_my_profile))
        .route("/status", get(host_profile::current_status))
        .route(
            "/business_profile",
            post(host_profile::submit_business_profile),
        )
        .route(
            "/identity_verification",
            post(host_profile::submit_identity_verification),
        )
        .route(
            "/contact_details",
            post(host_profile::submit_contact_details),
        )
        .route("/submit_for_review", post(host_profile::submit_for_review))
}
